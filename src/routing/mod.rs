//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     "parent/*/child" + handler
//!     → router.rs (RouterBuilder, prefix normalized)
//!     → tree.rs (one PathNode per literal segment)
//!     → build() freezes into an immutable ResourceRouter
//!
//! Incoming request (method, path, body, query):
//!     → router.rs (strip mount prefix)
//!     → tree.rs (resolve: handler, instance ID, ancestor IDs)
//!     → dispatch.rs (select operation, validate ID presence)
//!     → Return: Outcome (status, body, error)
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex and no parameter patterns, literal segments only
//! - Deterministic: same input always resolves to the same handler
//! - Purely synchronous, no I/O of its own

pub mod dispatch;
pub mod router;
pub mod tree;

pub use dispatch::{dispatch, select, DispatchError, Operation, RequestInput};
pub use router::{normalize_prefix, ResourceRouter, Routed, RouterBuilder};
pub use tree::{PathNode, ResourceTree, Resolved, WILDCARD_DELIMITER};
