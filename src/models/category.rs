//! Category data models.

use serde::{Deserialize, Serialize};

use crate::models::{FieldErrors, ReferenceLists, Resource, require_text};

/// A spending/income category from the `/category` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
}

/// Request body for `POST /category` and `PATCH /category/{id}`.
#[derive(Debug, Serialize)]
pub struct CategoryBody {
    pub name: String,
    pub description: String,
}

impl Resource for Category {
    type Fields = CategoryFields;
    type CreateBody = CategoryBody;
    type UpdateBody = CategoryBody;
    type Summary = ();

    const COLLECTION: &'static str = "/category";
    const LABEL: &'static str = "Category";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> CategoryFields {
        CategoryFields {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    fn validate(fields: &CategoryFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &fields.name, "Name is required");
        errors
    }

    fn create_body(fields: &CategoryFields) -> CategoryBody {
        CategoryBody {
            name: fields.name.trim().to_string(),
            description: fields.description.trim().to_string(),
        }
    }

    fn update_body(fields: &CategoryFields) -> CategoryBody {
        Self::create_body(fields)
    }

    fn search_text(&self, _refs: &ReferenceLists) -> Vec<String> {
        vec![self.name.clone(), self.description.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_the_only_error() {
        let errors = Category::validate(&CategoryFields {
            name: String::new(),
            description: "x".to_string(),
        });
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn complete_draft_is_valid() {
        let errors = Category::validate(&CategoryFields {
            name: "Housing".to_string(),
            description: String::new(),
        });
        assert!(errors.is_empty());
    }
}
