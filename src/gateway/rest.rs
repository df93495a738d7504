//! REST gateway backed by reqwest.
//!
//! Sends plain JSON requests to the configured API and treats any status
//! other than 200 OK / 201 Created as a failure.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::http;

/// Gateway talking to the external REST API.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    config: Config,
}

impl RestGateway {
    /// Build a gateway with its own HTTP client.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = http::create_client(&config)?;
        Ok(Self { client, config })
    }

    /// Build a gateway reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Send a request and check its status.
    ///
    /// # Headers Sent
    ///
    /// - `Content-Type: application/json` (only when a body is present)
    ///
    /// # Errors
    ///
    /// - `Network`: the request never produced a response
    /// - `Status`: the response status was not 200 or 201
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.config.endpoint(path);
        tracing::debug!(method = %method, url = %url, "dispatching request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            // .json() sets Content-Type: application/json
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, path = %path, "request failed: {}", e);
            AppError::Network(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            tracing::error!(method = %method, path = %path, status = %status, "unexpected status");
            return Err(AppError::Status {
                method,
                path: path.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let response = self.send(Method::GET, path, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post(&self, path: &str, body: Value) -> Result<(), AppError> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    async fn patch(&self, path: &str, body: Value) -> Result<(), AppError> {
        self.send(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
