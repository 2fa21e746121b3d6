//! Mount prefix handling and the resolve-then-dispatch entry point.
//!
//! # Responsibilities
//! - Normalize the configured mount prefix
//! - Collect registrations at startup (`RouterBuilder`)
//! - Freeze them into an immutable `ResourceRouter`
//! - Turn (method, path, body, query) into exactly one `Outcome`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Building consumes the builder, so no registration can happen while serving
//! - Explicit not-found rather than a silent default

use crate::observability::metrics;
use crate::resource::{HandlerRef, Outcome};
use crate::routing::dispatch::{dispatch, RequestInput};
use crate::routing::tree::{ResourceTree, Resolved};

/// Normalize a mount prefix to the `/segment/.../` form.
///
/// `""` and `"/"` become `"/"`, `"api"` and `"/api"` become `"/api/"`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Collects resource registrations during startup.
#[derive(Debug)]
pub struct RouterBuilder {
    prefix: String,
    tree: ResourceTree,
    registered: usize,
}

impl RouterBuilder {
    pub fn new(prefix: &str) -> Self {
        let prefix = normalize_prefix(prefix);
        Self {
            tree: ResourceTree::new(prefix.clone()),
            prefix,
            registered: 0,
        }
    }

    /// Register `handler` for `path`, e.g. `"widgets"` or `"parent/*/child"`.
    ///
    /// Calls chain on a mutable builder; [`build`](Self::build) then takes it
    /// by value.
    pub fn register(&mut self, path: &str, handler: HandlerRef) -> &mut Self {
        tracing::debug!(prefix = %self.prefix, path = %path, "Registering resource");
        self.tree.register(path, handler);
        self.registered += 1;
        self
    }

    /// Freeze the registrations.
    pub fn build(self) -> ResourceRouter {
        tracing::info!(
            prefix = %self.prefix,
            registrations = self.registered,
            "Resource router built"
        );
        ResourceRouter {
            prefix: self.prefix,
            tree: self.tree,
        }
    }
}

/// Outcome of [`ResourceRouter::route`], with the resource that produced it.
#[derive(Debug)]
pub struct Routed {
    /// Segment of the resolved resource, `None` when nothing matched.
    pub resource: Option<String>,
    pub outcome: Outcome,
}

/// Immutable router shared by every request task.
#[derive(Debug)]
pub struct ResourceRouter {
    prefix: String,
    tree: ResourceTree,
}

impl ResourceRouter {
    pub fn builder(prefix: &str) -> RouterBuilder {
        RouterBuilder::new(prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    /// Resolve a full request path, mount prefix included.
    pub fn resolve(&self, full_path: &str) -> Option<Resolved<'_>> {
        let path = full_path.strip_prefix(self.prefix.as_str())?;
        self.tree.resolve(path)
    }

    /// Resolve `full_path` and dispatch `method` to the handler found there.
    ///
    /// Unknown paths answer `404` with an empty body and no error.
    pub fn handle(&self, method: &str, full_path: &str, input: RequestInput) -> Outcome {
        self.route(method, full_path, input).outcome
    }

    /// Like [`handle`](Self::handle), also reporting which resource answered.
    pub fn route(&self, method: &str, full_path: &str, input: RequestInput) -> Routed {
        let Some(resolved) = self.resolve(full_path) else {
            tracing::debug!(method = %method, path = %full_path, "No resource matched");
            metrics::record_not_found();
            return Routed {
                resource: None,
                outcome: Outcome::not_found(),
            };
        };

        tracing::debug!(
            method = %method,
            resource = %resolved.resource,
            id = ?resolved.id,
            parent_ids = ?resolved.parent_ids,
            "Dispatching request"
        );

        let outcome = dispatch(
            method,
            resolved.id.as_deref(),
            &resolved.parent_ids,
            input,
            resolved.handler,
        );
        Routed {
            resource: Some(resolved.resource.to_string()),
            outcome,
        }
    }
}
