//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `proxy.toml`.
//! Every section and field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

use crate::descriptor::SchemaVariant;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Descriptor contract and dispatch settings.
    pub relay: RelayConfig,

    /// Outbound client settings.
    pub client: ClientConfig,

    /// Inbound limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Replace the bind address with `host:port`, bracketing IPv6 literals.
    pub fn set_host_port(&mut self, host: &str, port: u16) {
        self.bind_address = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
    }
}

/// Descriptor handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Contract enforced on inbound descriptors ("strict" or "lenient").
    pub schema: SchemaVariant,

    /// GET timeout in seconds when `meta.timeout` is absent.
    pub default_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            schema: SchemaVariant::Strict,
            default_timeout_secs: 10,
        }
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Connection establishment timeout in seconds (unset = client default).
    pub connect_timeout_secs: Option<u64>,

    /// Idle pooled connections kept per origin host.
    pub pool_max_idle_per_host: Option<usize>,

    /// Ignore `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    pub no_proxy: bool,
}

/// Inbound hardening.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum descriptor size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
