//! Remote collection access.
//!
//! A `Gateway` moves JSON to and from REST-style collection paths
//! (`/category`, `/category/{id}`, `/transaction/{id}/payment`).
//! Pages never talk to reqwest directly; they go through this trait so the
//! same controller runs against the real API or an in-process store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

pub mod memory;
pub mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

/// HTTP verb used for a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// One recorded gateway call, used for call-target assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub verb: Verb,
    pub path: String,
}

impl Call {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
        }
    }
}

/// Access to a set of REST collections.
///
/// Every method resolves only on success (status 200 or 201); anything else is an error.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Read a whole collection (or a single record) as JSON.
    async fn get(&self, path: &str) -> Result<Value, AppError>;

    /// Create a record in a collection.
    async fn post(&self, path: &str, body: Value) -> Result<(), AppError>;

    /// Partially update a record.
    async fn patch(&self, path: &str, body: Value) -> Result<(), AppError>;

    /// Delete a record.
    async fn delete(&self, path: &str) -> Result<(), AppError>;
}

/// Path of a single record inside a collection.
pub fn item_path(collection: &str, id: i64) -> String {
    format!("{}/{}", collection, id)
}
