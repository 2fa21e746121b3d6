//! Request extraction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Percent-decode the request path before it is resolved
//! - Parse the query string into `QueryParameters`
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Repeated query keys keep every value, in the order sent

use std::borrow::Cow;

use axum::http::{HeaderMap, HeaderValue, Request};
use percent_encoding::percent_decode_str;
use thiserror::Error;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::resource::QueryParameters;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 request ID for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// The request ID header, or `"unknown"` when missing or not valid text.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// A request path that cannot be handed to the router.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Request path is not valid UTF-8 once decoded")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Percent-decode a request path, so literals and IDs are matched as text
/// rather than as wire encoding. `%2F` decodes to a real `/`.
pub fn decode_path(path: &str) -> Result<Cow<'_, str>, PathError> {
    Ok(percent_decode_str(path).decode_utf8()?)
}

/// Parse a raw query string (without the leading `?`).
pub fn parse_query(query: Option<&str>) -> QueryParameters {
    let mut params = QueryParameters::new();
    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }
    params
}
