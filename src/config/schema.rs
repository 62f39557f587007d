//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Emit `multiValueHeaders` instead of `headers` in the reply.
    ///
    /// Must match the target group's multi-value headers attribute; it is
    /// fixed per deployment, never per request.
    pub multi_value_headers: bool,

    /// Values substituted when the event lacks routing metadata.
    pub defaults: RequestDefaults,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Fallbacks used while translating an event into a request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RequestDefaults {
    /// Host used when neither `X-Forwarded-Host` nor `Host` is present.
    pub host: String,

    /// Client address used when `X-Forwarded-For` is absent.
    pub source_ip: String,

    /// Scheme used when `X-Forwarded-Proto` is absent.
    pub scheme: String,

    /// Port component of the request's remote address.
    /// Symbolic (a service name), not a real endpoint.
    pub remote_port: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            source_ip: "127.0.0.1".to_string(),
            scheme: "http".to_string(),
            remote_port: "http".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
