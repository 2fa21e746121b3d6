//! Resource handler contract.
//!
//! # Data Flow
//! ```text
//! HTTP binding (body bytes, query multi-map)
//!     → routing::dispatch picks one operation
//!     → handler.rs (ResourceHandler: create / read_one / read_many / update / delete)
//!     → outcome.rs (status, body, optional error)
//!     → HTTP binding maps the Outcome to its native response
//! ```
//!
//! # Design Decisions
//! - Status codes are plain integers so any transport can map them
//! - Every operation has a default that answers 405, handlers override what they support
//! - Handler errors are boxed and passed through untouched

pub mod handler;
pub mod memory;
pub mod outcome;

pub use handler::{HandlerRef, ResourceHandler};
pub use memory::MemoryResource;
pub use outcome::{status, BoxError, Outcome, Payload, QueryParameters, EMPTY_BODY};
