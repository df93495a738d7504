//! HTTP client construction.
//!
//! One `reqwest::Client` is built at startup and shared by every page.
//! The client keeps a connection pool internally, so cloning it is cheap and
//! all pages reuse the same connections.

use crate::config::Config;
use crate::error::AppError;

/// Create the shared HTTP client.
///
/// # Configuration
///
/// - No authentication header (the API is unauthenticated)
/// - Timeout only if `REQUEST_TIMEOUT_SECS` was configured
/// - No retries; a failed request is reported and abandoned
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn create_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}
