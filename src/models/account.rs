//! Bank account data models and API request types.
//!
//! This module defines:
//! - `Account`: record from the `/bank-account` collection
//! - `AccountFields`: the editable form fields
//! - `AccountBody`: request body for create and update

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FieldErrors, ReferenceLists, Resource, require_text};

/// Represents a bank account record from the API.
///
/// # JSON Example
///
/// ```json
/// { "id": 3, "description": "Checking", "balance": 1520.75 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier; 0 only for records not yet saved
    #[serde(default)]
    pub id: i64,

    /// Display name of the account
    pub description: String,

    /// Current balance as reported by the API
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Editable account fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFields {
    pub description: String,
    pub balance: Decimal,
}

/// Request body for both `POST /bank-account` and `PATCH /bank-account/{id}`.
#[derive(Debug, Serialize)]
pub struct AccountBody {
    pub description: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl Resource for Account {
    type Fields = AccountFields;
    type CreateBody = AccountBody;
    type UpdateBody = AccountBody;
    type Summary = ();

    const COLLECTION: &'static str = "/bank-account";
    const LABEL: &'static str = "Account";

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> AccountFields {
        AccountFields {
            description: self.description.clone(),
            balance: self.balance,
        }
    }

    /// Only the description is required; a zero balance is a valid opening balance.
    fn validate(fields: &AccountFields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "description", &fields.description, "Description is required");
        errors
    }

    fn create_body(fields: &AccountFields) -> AccountBody {
        AccountBody {
            description: fields.description.trim().to_string(),
            balance: fields.balance,
        }
    }

    fn update_body(fields: &AccountFields) -> AccountBody {
        Self::create_body(fields)
    }

    fn search_text(&self, _refs: &ReferenceLists) -> Vec<String> {
        vec![self.description.clone(), self.balance.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_integer_and_fractional_balances() {
        let accounts: Vec<Account> = serde_json::from_value(json!([
            {"id": 1, "description": "Wallet", "balance": 40},
            {"id": 2, "description": "Savings", "balance": 1520.75}
        ]))
        .unwrap();
        assert_eq!(accounts[0].balance, Decimal::from(40));
        assert_eq!(accounts[1].balance, Decimal::new(152075, 2));
    }

    #[test]
    fn blank_description_is_rejected() {
        let errors = Account::validate(&AccountFields {
            description: "   ".to_string(),
            balance: Decimal::ZERO,
        });
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("description"));
    }

    #[test]
    fn body_sends_balance_as_number() {
        let body = Account::create_body(&AccountFields {
            description: " Wallet ".to_string(),
            balance: Decimal::new(1050, 2),
        });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"description": "Wallet", "balance": 10.5})
        );
    }
}
