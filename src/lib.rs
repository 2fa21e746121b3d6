//! Framework-agnostic REST resource router.
//!
//! Nested resource paths (`/parents/:id/children/:id`) are resolved through a
//! segment tree and dispatched onto a five-operation handler contract, with an
//! Axum binding to serve them over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resource;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resource::{HandlerRef, MemoryResource, Outcome, ResourceHandler};
pub use routing::{ResourceRouter, RouterBuilder};
