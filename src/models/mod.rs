//! Data models for the REST collections the pages edit.
//!
//! Each entity has:
//! - a record type, as read from its collection
//! - a form field type, the editable part of the record
//! - typed write bodies for create and update
//!
//! The `Resource` trait ties those together so one controller can drive every page.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Bank account model
pub mod account;
/// Category model
pub mod category;
/// Date (de)serialization helpers shared by the models
pub mod date_format;
/// Read-only reference lists used to resolve foreign keys
pub mod references;
/// Subcategory model
pub mod subcategory;
/// Transaction model
pub mod transaction;
/// Wishlist and wishlist item models
pub mod wishlist;

pub use account::{Account, AccountFields};
pub use category::{Category, CategoryFields};
pub use references::{ReferenceLists, ReferenceNeeds, MISSING_REFERENCE};
pub use subcategory::{Subcategory, SubcategoryFields};
pub use transaction::{Transaction, TransactionFields, TransactionKind};
pub use wishlist::{Wishlist, WishlistFields, WishlistItem, WishlistItemFields};

/// Validation result: field name → message. Empty means valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// An entity type backed by one REST collection.
pub trait Resource: Clone + Send + Sync + DeserializeOwned + 'static {
    /// Editable form fields.
    type Fields: Clone + Default + PartialEq + Send + Sync + 'static;

    /// Body sent with POST.
    type CreateBody: Serialize;

    /// Body sent with PATCH.
    type UpdateBody: Serialize;

    /// Aggregates recomputed whenever the list is replaced.
    type Summary: Clone + Default + Send + Sync + 'static;

    /// Collection path, e.g. `/category`.
    const COLLECTION: &'static str;

    /// Singular name used in notifications.
    const LABEL: &'static str;

    /// Reference collections loaded alongside this one.
    const NEEDS: ReferenceNeeds = ReferenceNeeds::NONE;

    /// Ask for confirmation before create/update as well as before delete.
    const CONFIRM_SUBMIT: bool = false;

    /// Identity; positive once persisted.
    fn id(&self) -> i64;

    /// Copy of the editable fields, used when editing an existing record.
    fn fields(&self) -> Self::Fields;

    /// Required-field checks.
    fn validate(fields: &Self::Fields) -> FieldErrors;

    fn create_body(fields: &Self::Fields) -> Self::CreateBody;

    fn update_body(fields: &Self::Fields) -> Self::UpdateBody;

    /// Display texts the filter matches against (reference names included).
    fn search_text(&self, refs: &ReferenceLists) -> Vec<String>;

    fn summarize(_items: &[Self]) -> Self::Summary {
        Self::Summary::default()
    }
}

/// Record a "required" error when a text field is blank.
pub(crate) fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Record a "required" error when a selection is missing.
pub(crate) fn require_selection(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<i64>,
    message: &str,
) {
    if !matches!(value, Some(id) if id > 0) {
        errors.insert(field, message.to_string());
    }
}

/// Case-insensitive substring filter over the records' display texts.
///
/// An empty term keeps every record, in order. Only the local list is searched.
pub fn filter_items<R: Resource>(items: &[R], refs: &ReferenceLists, term: &str) -> Vec<R> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_text(refs)
                    .iter()
                    .any(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
