//! Verb-to-operation dispatch.
//!
//! # Responsibilities
//! - Pick exactly one handler operation from (method, instance ID)
//! - Reject method/ID combinations that make no sense before the handler runs
//! - Pass the handler's outcome through untouched
//!
//! # Design Decisions
//! - Methods are matched case-sensitively, as sent on the wire
//! - An empty instance ID is treated as absent
//! - Selection is a pure function so it can be tested without a handler

use std::fmt;

use thiserror::Error;

use crate::resource::{status, Outcome, Payload, QueryParameters, ResourceHandler};

/// Request rejected by the dispatcher itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// An instance ID was supplied to a create.
    #[error("{method} requests must not provide an ID")]
    UnexpectedId { method: &'static str },

    /// No instance ID was supplied to an update or delete.
    #[error("{method} method must provide an ID")]
    MissingId { method: &'static str },

    /// Verb outside POST, GET, PUT and DELETE.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl DispatchError {
    /// Status code the rejection is reported with.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::UnexpectedId { .. } | DispatchError::MissingId { .. } => {
                status::BAD_REQUEST
            }
            DispatchError::MethodNotAllowed => status::METHOD_NOT_ALLOWED,
        }
    }
}

/// The five resource operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    ReadOne,
    ReadMany,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::ReadOne => "read_one",
            Operation::ReadMany => "read_many",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Request data a binding hands to the dispatcher. Each operation uses only
/// the half it needs: creates and updates read the body, collection reads
/// the query.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub body: Payload,
    pub query: QueryParameters,
}

impl RequestInput {
    pub fn new(body: impl Into<Payload>, query: QueryParameters) -> Self {
        Self {
            body: body.into(),
            query,
        }
    }
}

/// Choose the operation for `method`, first matching rule wins.
pub fn select(method: &str, id: Option<&str>) -> Result<Operation, DispatchError> {
    let has_id = id.is_some_and(|id| !id.is_empty());
    match method {
        "POST" if has_id => Err(DispatchError::UnexpectedId { method: "POST" }),
        "POST" => Ok(Operation::Create),
        "GET" if has_id => Ok(Operation::ReadOne),
        "GET" => Ok(Operation::ReadMany),
        "PUT" if has_id => Ok(Operation::Update),
        "PUT" => Err(DispatchError::MissingId { method: "PUT" }),
        "DELETE" if has_id => Ok(Operation::Delete),
        "DELETE" => Err(DispatchError::MissingId { method: "DELETE" }),
        _ => Err(DispatchError::MethodNotAllowed),
    }
}

/// Run the operation `method` selects on `handler`.
///
/// Rejections never reach the handler. Whatever the handler returns is passed
/// back as is, status code included.
pub fn dispatch(
    method: &str,
    id: Option<&str>,
    parent_ids: &[String],
    input: RequestInput,
    handler: &dyn ResourceHandler,
) -> Outcome {
    let operation = match select(method, id) {
        Ok(op) => op,
        Err(e) => {
            tracing::debug!(method = %method, id = ?id, error = %e, "Request rejected");
            return Outcome::failed(e.status(), e);
        }
    };

    tracing::trace!(method = %method, operation = %operation, "Operation selected");

    // select() only yields the instance operations when an ID is present
    let id = id.unwrap_or_default();
    match operation {
        Operation::Create => handler.create(parent_ids, input.body),
        Operation::ReadOne => handler.read_one(id, parent_ids),
        Operation::ReadMany => handler.read_many(parent_ids, &input.query),
        Operation::Update => handler.update(id, parent_ids, input.body),
        Operation::Delete => handler.delete(id, parent_ids),
    }
}
