//! Shared request/response types exchanged between bindings, router and handlers.

use std::collections::HashMap;

use bytes::Bytes;

/// Raw request or response body.
pub type Payload = Bytes;

/// Parsed query string. Repeated keys keep every value, in order.
pub type QueryParameters = HashMap<String, Vec<String>>;

/// Error carried by an [`Outcome`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body used when an operation has nothing to return.
pub const EMPTY_BODY: Payload = Bytes::new();

/// HTTP status codes used by the router.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Result of handling one request: `(status, body, error)`.
#[derive(Debug)]
pub struct Outcome {
    pub status: u16,
    pub body: Payload,
    pub error: Option<BoxError>,
}

impl Outcome {
    pub fn new(status: u16, body: impl Into<Payload>) -> Self {
        Self {
            status,
            body: body.into(),
            error: None,
        }
    }

    /// An outcome with no body and no error.
    pub fn empty(status: u16) -> Self {
        Self::new(status, EMPTY_BODY)
    }

    /// `200 OK` carrying `body`.
    pub fn ok(body: impl Into<Payload>) -> Self {
        Self::new(status::OK, body)
    }

    /// An outcome with no body and the given error.
    pub fn failed(status: u16, error: impl Into<BoxError>) -> Self {
        Self {
            status,
            body: EMPTY_BODY,
            error: Some(error.into()),
        }
    }

    pub fn not_found() -> Self {
        Self::empty(status::NOT_FOUND)
    }

    pub fn method_not_allowed() -> Self {
        Self::empty(status::METHOD_NOT_ALLOWED)
    }

    /// True when the body should be sent verbatim: `200` and no error.
    pub fn is_success(&self) -> bool {
        self.status == status::OK && self.error.is_none()
    }
}
