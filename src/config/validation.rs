//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check resource paths are usable registration paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::routing::WILDCARD_DELIMITER;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("resources[{index}]: path must not be empty")]
    EmptyResourcePath { index: usize },

    #[error("resources[{index}]: path '{path}' must be relative to the API prefix")]
    AbsoluteResourcePath { index: usize, path: String },

    #[error("resources[{index}]: path '{path}' has a '/' outside the '/*/' delimiter")]
    UnreachableResourcePath { index: usize, path: String },

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "security.max_body_size" });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (index, resource) in config.resources.iter().enumerate() {
        if resource.path.is_empty() {
            errors.push(ValidationError::EmptyResourcePath { index });
        } else if resource.path.starts_with('/') {
            errors.push(ValidationError::AbsoluteResourcePath {
                index,
                path: resource.path.clone(),
            });
        } else if resource
            .path
            .split(WILDCARD_DELIMITER)
            .any(|segment| segment.contains('/'))
        {
            // Requests alternate literal and ID tokens, so such a node never resolves.
            errors.push(ValidationError::UnreachableResourcePath {
                index,
                path: resource.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
