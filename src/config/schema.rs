//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, conditional listening).
    pub listener: ListenerConfig,

    /// Forwarding behavior (target parameter, upstream TLS policy).
    pub forwarder: ForwarderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// CORS response header settings.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Whether to start listening at all. Deployments that only export the
    /// handler (e.g., behind a serverless host) set this to false.
    pub enabled: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            enabled: true,
        }
    }
}

/// Forwarding behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Name of the query parameter carrying the target URL ("url" or "target").
    pub target_param: String,

    /// Skip TLS certificate verification for upstream connections.
    ///
    /// Off by default. Only the outbound client is affected; never enable
    /// this outside environments where the targets are known to present
    /// invalid certificates.
    pub insecure_skip_verify: bool,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            target_param: "url".to_string(),
            insecure_skip_verify: false,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time budget for handling one inbound request, in seconds.
    pub request_secs: u64,

    /// Deadline for the outbound call to the target, in seconds. Exceeding
    /// it is reported the same way as an unreachable target.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 60,
            upstream_secs: 30,
        }
    }
}

/// CORS response header settings.
///
/// Every response carries a wildcard allow-origin plus these allow-lists;
/// OPTIONS requests are answered directly with 200.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Methods advertised in Access-Control-Allow-Methods.
    pub allow_methods: Vec<String>,

    /// Headers advertised in Access-Control-Allow-Headers.
    pub allow_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "PUT".to_string(),
                "DELETE".to_string(),
            ],
            allow_headers: vec!["*".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
