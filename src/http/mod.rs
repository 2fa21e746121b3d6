//! HTTP binding subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route, middleware)
//!     → request.rs (request ID, decoded path, body bytes, query multi-map)
//!     → routing::ResourceRouter (resolve + dispatch, on the blocking pool)
//!     → response.rs (Outcome → HTTP response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{decode_path, parse_query, PathError, UuidRequestId, X_REQUEST_ID};
pub use response::into_response;
pub use server::{AppState, HttpServer};
