//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: record from the `/transaction` collection
//! - `TransactionFields`: the editable form fields
//! - `CreateTransactionBody` / `UpdateTransactionBody`: write bodies
//! - `PaymentBody`: body of `PATCH /transaction/{id}/payment`

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{
    FieldErrors, ReferenceLists, ReferenceNeeds, Resource, date_format, require_selection,
    require_text,
};
use crate::services::aggregate::{self, Totals};

/// Owner sent with every new transaction until the API exposes users.
pub const DEFAULT_USER_ID: i64 = 1;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

/// Represents a transaction record from the API.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 12,
///   "name": "Electricity",
///   "description": "March bill",
///   "amount": 80.0,
///   "due_date": "2024-03-10",
///   "payment_date": null,
///   "category_id": 1,
///   "subcategory_id": 4,
///   "account_id": 2,
///   "user_id": 1,
///   "paid_amount": 80.0,
///   "type": "EXPENSE"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    #[serde(default, with = "date_format::option")]
    pub due_date: Option<NaiveDate>,

    /// Set once a payment is registered; `None` means pending
    #[serde(default, with = "date_format::option")]
    pub payment_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "id_or_zero")]
    pub category_id: i64,

    #[serde(default, deserialize_with = "id_or_zero")]
    pub subcategory_id: i64,

    #[serde(default, deserialize_with = "id_or_zero")]
    pub account_id: i64,

    #[serde(default)]
    pub user_id: i64,

    #[serde(default, with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,

    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
}

/// Reference ids arrive as `null` when unset; they are kept as 0.
fn id_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl Transaction {
    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }
}

/// Editable transaction fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFields {
    pub name: String,
    pub description: String,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub account_id: Option<i64>,
    pub kind: TransactionKind,
}

/// Request body for `POST /transaction`.
///
/// A new transaction starts unpaid with `paid_amount` equal to `amount`.
#[derive(Debug, Serialize)]
pub struct CreateTransactionBody {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "date_format::option")]
    pub due_date: Option<NaiveDate>,
    #[serde(with = "date_format::option")]
    pub payment_date: Option<NaiveDate>,
    pub subcategory_id: Option<i64>,
    pub category_id: Option<i64>,
    pub user_id: i64,
    pub account_id: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Request body for `PATCH /transaction/{id}`.
///
/// Payment fields are left alone; they change only through the payment endpoint.
#[derive(Debug, Serialize)]
pub struct UpdateTransactionBody {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "date_format::option")]
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub account_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Request body for `PATCH /transaction/{id}/payment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentBody {
    #[serde(with = "date_format::option")]
    pub payment_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
}

impl Resource for Transaction {
    type Fields = TransactionFields;
    type CreateBody = CreateTransactionBody;
    type UpdateBody = UpdateTransactionBody;
    type Summary = Totals;

    const COLLECTION: &'static str = "/transaction";
    const LABEL: &'static str = "Transaction";
    const NEEDS: ReferenceNeeds = ReferenceNeeds::ALL;

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> TransactionFields {
        let positive = |id: i64| Some(id).filter(|id| *id > 0);
        TransactionFields {
            name: self.name.clone(),
            description: self.description.clone(),
            amount: self.amount,
            due_date: self.due_date,
            category_id: positive(self.category_id),
            subcategory_id: positive(self.subcategory_id),
            account_id: positive(self.account_id),
            kind: self.kind,
        }
    }

    /// Name, a positive amount, a due date, a category and an account are required.
    /// The subcategory is optional.
    fn validate(fields: &TransactionFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &fields.name, "Name is required");
        if fields.amount <= Decimal::ZERO {
            errors.insert("amount", "Amount must be greater than zero".to_string());
        }
        if fields.due_date.is_none() {
            errors.insert("due_date", "Due date is required".to_string());
        }
        require_selection(&mut errors, "category", fields.category_id, "Category is required");
        require_selection(&mut errors, "account", fields.account_id, "Account is required");
        errors
    }

    fn create_body(fields: &TransactionFields) -> CreateTransactionBody {
        CreateTransactionBody {
            name: fields.name.trim().to_string(),
            description: fields.description.trim().to_string(),
            amount: fields.amount,
            due_date: fields.due_date,
            payment_date: None,
            subcategory_id: fields.subcategory_id,
            category_id: fields.category_id,
            user_id: DEFAULT_USER_ID,
            account_id: fields.account_id,
            paid_amount: fields.amount,
            kind: fields.kind,
        }
    }

    fn update_body(fields: &TransactionFields) -> UpdateTransactionBody {
        UpdateTransactionBody {
            name: fields.name.trim().to_string(),
            description: fields.description.trim().to_string(),
            amount: fields.amount,
            due_date: fields.due_date,
            category_id: fields.category_id,
            subcategory_id: fields.subcategory_id,
            account_id: fields.account_id,
            kind: fields.kind,
        }
    }

    /// Name, description and whichever of the category and subcategory names resolve.
    fn search_text(&self, refs: &ReferenceLists) -> Vec<String> {
        let mut texts = vec![self.name.clone(), self.description.clone()];
        texts.extend(refs.find_category(self.category_id).map(|c| c.name.clone()));
        texts.extend(refs.find_subcategory(self.subcategory_id).map(|s| s.name.clone()));
        texts
    }

    fn summarize(items: &[Self]) -> Totals {
        aggregate::totals(items)
    }
}
