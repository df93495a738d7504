//! In-process gateway.
//!
//! Holds collections as JSON arrays keyed by collection path and answers the
//! same verbs as the REST API. Pages without a server-side collection (the
//! wishlist) run on it. A recording gateway also logs every call so tests can
//! assert which endpoint an operation targeted.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::{Mutex, Semaphore};

use crate::error::AppError;
use crate::gateway::{Call, Gateway, Verb};

#[derive(Debug, Default)]
struct Store {
    collections: BTreeMap<String, Vec<Value>>,
    next_id: i64,
    /// Only kept by recording gateways
    calls: Vec<Call>,
    /// One-shot failures, consumed by the next matching call; `None` path matches any
    failures: VecDeque<(Verb, Option<String>)>,
}

/// Collections kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    store: Arc<Mutex<Store>>,
    /// When present, every call waits for a permit before it resolves
    gate: Option<Arc<Semaphore>>,
    recording: bool,
}

/// A path split into collection, record id and optional sub-resource.
struct Target<'a> {
    collection: String,
    id: Option<i64>,
    suffix: Option<&'a str>,
}

fn parse_path(path: &str) -> Result<Target<'_>, AppError> {
    let mut segments = path.trim_matches('/').splitn(3, '/');
    let collection = format!("/{}", segments.next().unwrap_or_default());
    let id = match segments.next() {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| AppError::NotFound {
            resource: collection.clone(),
            id: 0,
        })?),
        None => None,
    };
    Ok(Target {
        collection,
        id,
        suffix: segments.next(),
    })
}

fn record_id(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

fn method_of(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
    }
}

impl MemoryGateway {
    /// Gateway without a call log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that keeps every call for `calls` and `count`.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    /// A recording gateway whose calls block until `release` hands out permits.
    pub fn gated() -> Self {
        Self {
            store: Arc::default(),
            gate: Some(Arc::new(Semaphore::new(0))),
            recording: true,
        }
    }

    /// Let `n` blocked (or future) calls through the gate.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Replace a collection's contents; ids continue after the largest seeded id.
    pub async fn seed(&self, collection: &str, items: Vec<Value>) {
        let mut store = self.store.lock().await;
        let max_id = items.iter().filter_map(record_id).max().unwrap_or(0);
        store.next_id = store.next_id.max(max_id);
        store.collections.insert(collection.to_string(), items);
    }

    /// Make the next call with this verb fail with a 500 status.
    pub async fn fail_next(&self, verb: Verb) {
        self.store.lock().await.failures.push_back((verb, None));
    }

    /// Make the next call with this verb on exactly `path` fail with a 500 status.
    pub async fn fail_next_at(&self, verb: Verb, path: &str) {
        self.store
            .lock()
            .await
            .failures
            .push_back((verb, Some(path.to_string())));
    }

    /// Every call received so far, in order. Empty unless the gateway records.
    pub async fn calls(&self) -> Vec<Call> {
        self.store.lock().await.calls.clone()
    }

    /// Number of calls matching a verb and exact path.
    pub async fn count(&self, verb: Verb, path: &str) -> usize {
        self.store
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.verb == verb && c.path == path)
            .count()
    }

    /// Snapshot of a collection.
    pub async fn items(&self, collection: &str) -> Vec<Value> {
        self.store
            .lock()
            .await
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Record the call, wait at the gate, then check for an injected failure.
    async fn enter(&self, verb: Verb, path: &str) -> Result<(), AppError> {
        if self.recording {
            self.store.lock().await.calls.push(Call::new(verb, path));
        }

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let mut store = self.store.lock().await;
        let matches = |(v, p): &(Verb, Option<String>)| {
            *v == verb && p.as_deref().is_none_or(|p| p == path)
        };
        if let Some(pos) = store.failures.iter().position(matches) {
            store.failures.remove(pos);
            return Err(AppError::Status {
                method: method_of(verb),
                path: path.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        self.enter(Verb::Get, path).await?;
        let target = parse_path(path)?;
        let store = self.store.lock().await;
        let items = store
            .collections
            .get(&target.collection)
            .cloned()
            .unwrap_or_default();

        match target.id {
            None => Ok(Value::Array(items)),
            Some(id) => items
                .into_iter()
                .find(|item| record_id(item) == Some(id))
                .ok_or(AppError::NotFound {
                    resource: target.collection,
                    id,
                }),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<(), AppError> {
        self.enter(Verb::Post, path).await?;
        let target = parse_path(path)?;
        let mut store = self.store.lock().await;
        store.next_id += 1;
        let id = store.next_id;

        let mut record = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("id".to_string(), Value::from(id));

        store
            .collections
            .entry(target.collection)
            .or_default()
            .push(Value::Object(record));
        Ok(())
    }

    async fn patch(&self, path: &str, body: Value) -> Result<(), AppError> {
        self.enter(Verb::Patch, path).await?;
        let target = parse_path(path)?;
        let id = target.id.ok_or(AppError::NotFound {
            resource: target.collection.clone(),
            id: 0,
        })?;
        if let Some(suffix) = target.suffix {
            tracing::debug!(suffix, id, "patching sub-resource fields onto record");
        }

        let mut store = self.store.lock().await;
        let record = store
            .collections
            .get_mut(&target.collection)
            .and_then(|items| items.iter_mut().find(|item| record_id(item) == Some(id)))
            .ok_or(AppError::NotFound {
                resource: target.collection.clone(),
                id,
            })?;

        // Partial update: only the fields present in the body change
        if let (Value::Object(existing), Value::Object(changes)) = (record, body) {
            for (key, value) in changes {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.enter(Verb::Delete, path).await?;
        let target = parse_path(path)?;
        let id = target.id.ok_or(AppError::NotFound {
            resource: target.collection.clone(),
            id: 0,
        })?;

        let mut store = self.store.lock().await;
        let items = store.collections.entry(target.collection.clone()).or_default();
        let before = items.len();
        items.retain(|item| record_id(item) != Some(id));

        if items.len() == before {
            return Err(AppError::NotFound {
                resource: target.collection,
                id,
            });
        }
        Ok(())
    }
}
