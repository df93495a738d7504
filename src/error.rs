//! Error types and user-facing error messages.
//!
//! This module defines all application errors and how they are turned
//! into the text shown in error notifications.

use reqwest::{Method, StatusCode};

use crate::models::FieldErrors;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur while a page talks to
/// the REST API or edits its draft.
///
/// # Error Categories
///
/// - **Validation Errors**: local, block submission, shown inline per field
/// - **Network/Server Errors**: failed fetch or non-success status, shown as a notification
/// - **Page State Errors**: busy controller, torn-down page, payment flow misuse
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request never produced a response (connection refused, timeout, ...).
    ///
    /// This wraps any reqwest::Error using the `#[from]` attribute.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with anything other than 200 or 201.
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
    },

    /// A body could not be encoded, or a response did not match the record shape.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Draft failed local validation; no request was sent.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// A submit, delete or payment is already in flight on this page.
    #[error("Another operation is still in progress")]
    Busy,

    /// The page was torn down; the result of the operation was discarded.
    #[error("Page closed")]
    Closed,

    /// Record does not exist in an in-memory collection.
    #[error("{resource} {id} not found")]
    NotFound { resource: String, id: i64 },

    /// Payment registration is only offered for unpaid transactions.
    #[error("Transaction {0} is already paid")]
    AlreadyPaid(i64),

    /// Payment confirmation without an open payment context.
    #[error("No payment registration is open")]
    NoPaymentOpen,
}

impl AppError {
    /// Human-readable message for an error notification.
    ///
    /// Server and transport details stay in the logs; the user sees a short message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Could not reach the server".to_string(),
            AppError::Status { .. } | AppError::Json(_) => {
                "The server rejected the request, check the data".to_string()
            }
            AppError::Validation(errors) => {
                let fields: Vec<&str> = errors.keys().copied().collect();
                format!("Please fill in: {}", fields.join(", "))
            }
            other => other.to_string(),
        }
    }

    /// True for failures that came from the remote collection.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Status { .. } | AppError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_request() {
        let error = AppError::Status {
            method: Method::PATCH,
            path: "/category/3".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            error.to_string(),
            "PATCH /category/3 failed with status 500 Internal Server Error"
        );
        assert!(error.is_remote());
    }

    #[test]
    fn validation_message_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required".to_string());
        errors.insert("description", "Description is required".to_string());
        let message = AppError::Validation(errors).user_message();
        assert_eq!(message, "Please fill in: description, name");
    }

    #[test]
    fn page_state_errors_are_local() {
        assert!(!AppError::Busy.is_remote());
        assert_eq!(AppError::AlreadyPaid(7).user_message(), "Transaction 7 is already paid");
    }
}
