//! In-memory JSON collection.
//!
//! Backs every resource declared in the configuration file and gives the
//! integration tests a real handler to drive.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::resource::handler::ResourceHandler;
use crate::resource::outcome::{status, Outcome, Payload, QueryParameters};

/// Errors reported by [`MemoryResource`] to the client.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Invalid limit parameter: {0}")]
    InvalidLimit(String),
}

/// Instances are keyed by their ancestor IDs and their own ID, so the same ID
/// under two different parents names two different instances.
type InstanceKey = (Vec<String>, String);

#[derive(Serialize)]
struct Created<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct Listed {
    id: String,
    data: Value,
}

/// A thread-safe collection of JSON documents.
#[derive(Debug)]
pub struct MemoryResource {
    name: String,
    instances: DashMap<InstanceKey, Value>,
    next_id: AtomicU64,
}

impl MemoryResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instances: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored instances across all parents.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn key(id: &str, parent_ids: &[String]) -> InstanceKey {
        (parent_ids.to_vec(), id.to_string())
    }

    fn parse(payload: &Payload) -> Result<Value, MemoryError> {
        Ok(serde_json::from_slice(payload)?)
    }

    fn json(value: &impl Serialize) -> Outcome {
        match serde_json::to_vec(value) {
            Ok(body) => Outcome::ok(body),
            Err(e) => Outcome::failed(status::INTERNAL_SERVER_ERROR, e),
        }
    }

    fn limit(params: &QueryParameters) -> Result<Option<usize>, MemoryError> {
        match params.get("limit").and_then(|values| values.first()) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| MemoryError::InvalidLimit(raw.clone())),
            None => Ok(None),
        }
    }
}

/// Numeric IDs sort numerically, anything else after them in string order.
fn id_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

impl ResourceHandler for MemoryResource {
    fn create(&self, parent_ids: &[String], payload: Payload) -> Outcome {
        let value = match Self::parse(&payload) {
            Ok(v) => v,
            Err(e) => return Outcome::failed(status::BAD_REQUEST, e),
        };

        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        self.instances.insert(Self::key(&id, parent_ids), value);

        tracing::debug!(resource = %self.name, id = %id, parents = ?parent_ids, "Instance created");
        Self::json(&Created { id: &id })
    }

    fn read_one(&self, id: &str, parent_ids: &[String]) -> Outcome {
        match self.instances.get(&Self::key(id, parent_ids)) {
            Some(entry) => Self::json(entry.value()),
            None => Outcome::not_found(),
        }
    }

    fn read_many(&self, parent_ids: &[String], params: &QueryParameters) -> Outcome {
        let limit = match Self::limit(params) {
            Ok(l) => l,
            Err(e) => return Outcome::failed(status::BAD_REQUEST, e),
        };

        let mut listed: Vec<Listed> = self
            .instances
            .iter()
            .filter(|entry| entry.key().0 == parent_ids)
            .map(|entry| Listed {
                id: entry.key().1.clone(),
                data: entry.value().clone(),
            })
            .collect();
        listed.sort_by(|a, b| id_order(&a.id, &b.id));

        if let Some(limit) = limit {
            listed.truncate(limit);
        }

        Self::json(&listed)
    }

    fn update(&self, id: &str, parent_ids: &[String], payload: Payload) -> Outcome {
        let value = match Self::parse(&payload) {
            Ok(v) => v,
            Err(e) => return Outcome::failed(status::BAD_REQUEST, e),
        };

        match self.instances.get_mut(&Self::key(id, parent_ids)) {
            Some(mut entry) => {
                *entry.value_mut() = value;
                tracing::debug!(resource = %self.name, id = %id, parents = ?parent_ids, "Instance updated");
                Outcome::empty(status::OK)
            }
            None => Outcome::not_found(),
        }
    }

    fn delete(&self, id: &str, parent_ids: &[String]) -> Outcome {
        match self.instances.remove(&Self::key(id, parent_ids)) {
            Some(_) => {
                tracing::debug!(resource = %self.name, id = %id, parents = ?parent_ids, "Instance deleted");
                Outcome::empty(status::OK)
            }
            None => Outcome::not_found(),
        }
    }
}
