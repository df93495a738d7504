//! Subcategory data models.
//!
//! A subcategory belongs to one category. The API names that reference
//! `categoryId` (camelCase), unlike the snake_case transaction fields.

use serde::{Deserialize, Serialize};

use crate::models::{
    FieldErrors, ReferenceLists, ReferenceNeeds, Resource, require_selection, require_text,
};

/// A subcategory record from the `/subcategory` collection.
///
/// # JSON Example
///
/// ```json
/// { "id": 7, "name": "Groceries", "description": "Supermarket", "categoryId": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,

    /// Owning category
    #[serde(default)]
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubcategoryFields {
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
}

/// Request body for `POST /subcategory` and `PATCH /subcategory/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryBody {
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
}

impl Resource for Subcategory {
    type Fields = SubcategoryFields;
    type CreateBody = SubcategoryBody;
    type UpdateBody = SubcategoryBody;
    type Summary = ();

    const COLLECTION: &'static str = "/subcategory";
    const LABEL: &'static str = "Subcategory";
    const NEEDS: ReferenceNeeds = ReferenceNeeds {
        categories: true,
        subcategories: false,
        accounts: false,
    };
    const CONFIRM_SUBMIT: bool = true;

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> SubcategoryFields {
        SubcategoryFields {
            name: self.name.clone(),
            description: self.description.clone(),
            category_id: Some(self.category_id).filter(|id| *id > 0),
        }
    }

    fn validate(fields: &SubcategoryFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &fields.name, "Name is required");
        require_text(&mut errors, "description", &fields.description, "Description is required");
        require_selection(&mut errors, "category", fields.category_id, "Category is required");
        errors
    }

    fn create_body(fields: &SubcategoryFields) -> SubcategoryBody {
        SubcategoryBody {
            name: fields.name.trim().to_string(),
            description: fields.description.trim().to_string(),
            category_id: fields.category_id,
        }
    }

    fn update_body(fields: &SubcategoryFields) -> SubcategoryBody {
        Self::create_body(fields)
    }

    /// Name, description and the category name when the category is loaded.
    fn search_text(&self, refs: &ReferenceLists) -> Vec<String> {
        let mut texts = vec![self.name.clone(), self.description.clone()];
        texts.extend(refs.find_category(self.category_id).map(|c| c.name.clone()));
        texts
    }
}
