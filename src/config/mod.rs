//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! proxy.toml layers (exe dir, ~/conf, ./) or --config PATH
//!     → loader.rs (parse, merge & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → consumed once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_search_paths, load_config, load_layered, ConfigError};
pub use schema::{
    ClientConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, RelayConfig, SecurityConfig,
};
