//! Startup orchestration.
//!
//! # Responsibilities
//! - Register every configured resource
//! - Freeze the router before the listener starts
//!
//! # Design Decisions
//! - Fail fast: configuration errors are reported before anything binds

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::resource::MemoryResource;
use crate::routing::ResourceRouter;

/// Build the router for `config`, one in-memory collection per configured resource.
pub fn build_router(config: &ServiceConfig) -> ResourceRouter {
    let mut builder = ResourceRouter::builder(&config.api.prefix);
    for resource in &config.resources {
        builder.register(&resource.path, Arc::new(MemoryResource::new(resource.path.clone())));
    }
    builder.build()
}
