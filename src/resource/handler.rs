//! The five-operation capability set every resource implements.

use std::sync::Arc;

use crate::resource::outcome::{status, Outcome, Payload, QueryParameters};

/// Shared, read-only reference to a registered handler.
pub type HandlerRef = Arc<dyn ResourceHandler>;

/// A REST resource.
///
/// Every operation has a default that answers `405 Method Not Allowed` with an
/// empty body and no error, so a handler only implements the verbs it supports.
///
/// `parent_ids` are the identifiers of the enclosing resources, nearest parent
/// first: for `/grandparent/1/parent/2/child/3` the `child` handler sees
/// `id = "3"` and `parent_ids = ["2", "1"]`.
///
/// Handlers may block and are called from many threads at once.
pub trait ResourceHandler: Send + Sync {
    /// Capability probe.
    fn options(&self) -> Outcome {
        Outcome::empty(status::OK)
    }

    /// `POST` on a collection.
    fn create(&self, parent_ids: &[String], payload: Payload) -> Outcome {
        let _ = (parent_ids, payload);
        Outcome::method_not_allowed()
    }

    /// `GET` on a single instance.
    fn read_one(&self, id: &str, parent_ids: &[String]) -> Outcome {
        let _ = (id, parent_ids);
        Outcome::method_not_allowed()
    }

    /// `GET` on a collection.
    fn read_many(&self, parent_ids: &[String], params: &QueryParameters) -> Outcome {
        let _ = (parent_ids, params);
        Outcome::method_not_allowed()
    }

    /// `PUT` on a single instance.
    fn update(&self, id: &str, parent_ids: &[String], payload: Payload) -> Outcome {
        let _ = (id, parent_ids, payload);
        Outcome::method_not_allowed()
    }

    /// `DELETE` on a single instance.
    fn delete(&self, id: &str, parent_ids: &[String]) -> Outcome {
        let _ = (id, parent_ids);
        Outcome::method_not_allowed()
    }
}
