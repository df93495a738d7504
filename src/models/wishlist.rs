//! Wishlist models.
//!
//! Wishlists have no server-side collection; they live in a `MemoryGateway`
//! under the `/wishlist` and `/wishlist-item` paths and are edited through the
//! same controller as the REST-backed pages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FieldErrors, ReferenceLists, Resource, require_selection, require_text};
use crate::services::aggregate::{self, WishlistTotals};

/// A named wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistFields {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct WishlistBody {
    pub name: String,
}

impl Resource for Wishlist {
    type Fields = WishlistFields;
    type CreateBody = WishlistBody;
    type UpdateBody = WishlistBody;
    type Summary = ();

    const COLLECTION: &'static str = "/wishlist";
    const LABEL: &'static str = "Wishlist";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> WishlistFields {
        WishlistFields {
            name: self.name.clone(),
        }
    }

    fn validate(fields: &WishlistFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &fields.name, "Name is required");
        errors
    }

    fn create_body(fields: &WishlistFields) -> WishlistBody {
        WishlistBody {
            name: fields.name.trim().to_string(),
        }
    }

    fn update_body(fields: &WishlistFields) -> WishlistBody {
        Self::create_body(fields)
    }

    fn search_text(&self, _refs: &ReferenceLists) -> Vec<String> {
        vec![self.name.clone()]
    }
}

/// Something wanted, kept on one wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(default)]
    pub id: i64,

    pub wishlist_id: i64,

    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Store page, if any
    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub bought: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistItemFields {
    pub wishlist_id: Option<i64>,
    pub name: String,
    pub price: Decimal,
    pub link: String,
    pub notes: String,
}

/// Write body for items; `bought` starts false on create and is toggled separately.
#[derive(Debug, Serialize)]
pub struct WishlistItemBody {
    pub wishlist_id: Option<i64>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub link: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought: Option<bool>,
}

/// Partial update flipping the bought flag.
#[derive(Debug, Serialize)]
pub struct BoughtBody {
    pub bought: bool,
}

impl WishlistItemFields {
    fn body(&self, bought: Option<bool>) -> WishlistItemBody {
        WishlistItemBody {
            wishlist_id: self.wishlist_id,
            name: self.name.trim().to_string(),
            price: self.price,
            link: self.link.trim().to_string(),
            notes: self.notes.trim().to_string(),
            bought,
        }
    }
}

impl Resource for WishlistItem {
    type Fields = WishlistItemFields;
    type CreateBody = WishlistItemBody;
    type UpdateBody = WishlistItemBody;
    type Summary = WishlistTotals;

    const COLLECTION: &'static str = "/wishlist-item";
    const LABEL: &'static str = "Wishlist item";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> WishlistItemFields {
        WishlistItemFields {
            wishlist_id: Some(self.wishlist_id).filter(|id| *id > 0),
            name: self.name.clone(),
            price: self.price,
            link: self.link.clone(),
            notes: self.notes.clone(),
        }
    }

    fn validate(fields: &WishlistItemFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &fields.name, "Name is required");
        require_selection(&mut errors, "wishlist", fields.wishlist_id, "Wishlist is required");
        if fields.price < Decimal::ZERO {
            errors.insert("price", "Price cannot be negative".to_string());
        }
        errors
    }

    fn create_body(fields: &WishlistItemFields) -> WishlistItemBody {
        fields.body(Some(false))
    }

    fn update_body(fields: &WishlistItemFields) -> WishlistItemBody {
        fields.body(None)
    }

    fn search_text(&self, _refs: &ReferenceLists) -> Vec<String> {
        vec![self.name.clone(), self.notes.clone()]
    }

    fn summarize(items: &[Self]) -> WishlistTotals {
        aggregate::wishlist_totals(items)
    }
}
