//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject fallbacks that would produce an unusable request URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("defaults.{0} must not be empty")]
    Empty(&'static str),

    #[error("defaults.scheme must be \"http\" or \"https\", got {0:?}")]
    UnsupportedScheme(String),

    #[error("defaults.host {0:?} is not a valid authority")]
    InvalidHost(String),
}

/// Check a parsed configuration, collecting every problem.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let defaults = &config.defaults;
    let mut errors = Vec::new();

    if defaults.host.is_empty() {
        errors.push(ValidationError::Empty("host"));
    } else if defaults.host.parse::<Authority>().is_err() {
        errors.push(ValidationError::InvalidHost(defaults.host.clone()));
    }

    if defaults.source_ip.is_empty() {
        errors.push(ValidationError::Empty("source_ip"));
    }

    if defaults.remote_port.is_empty() {
        errors.push(ValidationError::Empty("remote_port"));
    }

    if !matches!(defaults.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(defaults.scheme.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
