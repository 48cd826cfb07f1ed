//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or built-in defaults)
//!     → environment overrides (PORT, PROXY_TARGET_PARAM, PROXY_LISTEN)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the proxy runs with no config file at all
//! - Environment overrides apply before validation so an override can never
//!   smuggle in a value the file would have been rejected for
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{CorsConfig, ForwarderConfig, ListenerConfig, ProxyConfig, TimeoutConfig};
