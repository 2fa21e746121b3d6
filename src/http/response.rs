//! Outcome to HTTP response mapping.
//!
//! # Design Decisions
//! - `200` without an error: the body is sent verbatim
//! - Anything else: plain-text body with the error message, or the
//!   status's reason phrase when the handler gave no error
//! - Status codes axum cannot represent become `500`

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::resource::Outcome;

pub fn into_response(outcome: Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if outcome.is_success() {
        let mut response = Response::new(Body::from(outcome.body));
        *response.status_mut() = status;
        return response;
    }

    let message = match outcome.error {
        Some(e) => e.to_string(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    };
    (status, message).into_response()
}
