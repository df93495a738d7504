//! Reference lists: read-only collections a page needs to show names for
//! foreign keys and to fill its selectors.

use crate::models::{Account, Category, Subcategory};

/// Label shown when a referenced record is not in the loaded list.
pub const MISSING_REFERENCE: &str = "N/A";

/// Which reference collections a page loads with its own list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceNeeds {
    pub categories: bool,
    pub subcategories: bool,
    pub accounts: bool,
}

impl ReferenceNeeds {
    pub const NONE: Self = Self {
        categories: false,
        subcategories: false,
        accounts: false,
    };

    pub const ALL: Self = Self {
        categories: true,
        subcategories: true,
        accounts: true,
    };

    pub fn any(&self) -> bool {
        self.categories || self.subcategories || self.accounts
    }
}

/// Reference collections fetched once per page load.
///
/// The consuming page never mutates these; a full load replaces them wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLists {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub accounts: Vec<Account>,
}

impl ReferenceLists {
    pub fn find_category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_subcategory(&self, id: i64) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }

    pub fn find_account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Display name, or the placeholder when the category is not loaded.
    pub fn category_name(&self, id: i64) -> &str {
        self.find_category(id)
            .map_or(MISSING_REFERENCE, |c| c.name.as_str())
    }

    pub fn subcategory_name(&self, id: i64) -> &str {
        self.find_subcategory(id)
            .map_or(MISSING_REFERENCE, |s| s.name.as_str())
    }

    pub fn account_name(&self, id: i64) -> &str {
        self.find_account(id)
            .map_or(MISSING_REFERENCE, |a| a.description.as_str())
    }

    /// Subcategory selector options for the chosen category.
    pub fn subcategories_of(&self, category_id: i64) -> Vec<&Subcategory> {
        self.subcategories
            .iter()
            .filter(|s| s.category_id == category_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn lists() -> ReferenceLists {
        ReferenceLists {
            categories: vec![Category {
                id: 1,
                name: "Home".to_string(),
                description: String::new(),
            }],
            subcategories: vec![
                Subcategory {
                    id: 10,
                    name: "Rent".to_string(),
                    description: String::new(),
                    category_id: 1,
                },
                Subcategory {
                    id: 11,
                    name: "Fuel".to_string(),
                    description: String::new(),
                    category_id: 2,
                },
            ],
            accounts: vec![Account {
                id: 5,
                description: "Checking".to_string(),
                balance: Decimal::ZERO,
            }],
        }
    }

    #[test]
    fn resolves_known_names() {
        let refs = lists();
        assert_eq!(refs.category_name(1), "Home");
        assert_eq!(refs.subcategory_name(11), "Fuel");
        assert_eq!(refs.account_name(5), "Checking");
    }

    #[test]
    fn unknown_ids_degrade_to_placeholder() {
        let refs = lists();
        assert_eq!(refs.category_name(99), MISSING_REFERENCE);
        assert_eq!(refs.account_name(0), MISSING_REFERENCE);
    }

    #[test]
    fn selector_lists_only_subcategories_of_category() {
        let refs = lists();
        let names: Vec<&str> = refs
            .subcategories_of(1)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rent"]);
    }
}
