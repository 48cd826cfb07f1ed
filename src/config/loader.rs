//! Configuration loading from disk and the environment.
//!
//! The original deployment of this proxy was driven entirely by environment
//! variables, so `PORT`, `PROXY_TARGET_PARAM`, and `PROXY_LISTEN` override
//! whatever the file (or the defaults) say.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: `{value}`")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Validation(Vec<ValidationError>),
}

/// Load configuration: optional TOML file, then environment overrides,
/// then semantic validation.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |var| env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides to a parsed configuration.
///
/// Takes the environment as a lookup function so tests can drive it without
/// touching process-global state.
fn apply_env_overrides(
    config: &mut ProxyConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(port) = env("PORT") {
        let port: u16 = port.parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
        // Keep the configured interface, swap the port.
        match config.listener.bind_address.parse::<std::net::SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                config.listener.bind_address = addr.to_string();
            }
            Err(_) => config.listener.bind_address = format!("0.0.0.0:{port}"),
        }
    }

    if let Some(param) = env("PROXY_TARGET_PARAM") {
        config.forwarder.target_param = param;
    }

    if let Some(flag) = env("PROXY_LISTEN") {
        config.listener.enabled = match flag.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigError::Env {
                    var: "PROXY_LISTEN",
                    value: flag,
                })
            }
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fake_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"

            [forwarder]
            target_param = "target"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.forwarder.target_param, "target");
        // Untouched sections keep their defaults
        assert_eq!(config.timeouts.upstream_secs, 30);
        assert!(!config.forwarder.insecure_skip_verify);
    }

    #[test]
    fn test_port_override_keeps_interface() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "127.0.0.1:3000".to_string();

        apply_env_overrides(&mut config, fake_env(&[("PORT", "9999")])).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_invalid_port_override_rejected() {
        let mut config = ProxyConfig::default();
        let err = apply_env_overrides(&mut config, fake_env(&[("PORT", "banana")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
    }

    #[test]
    fn test_target_param_and_listen_overrides() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(
            &mut config,
            fake_env(&[("PROXY_TARGET_PARAM", "target"), ("PROXY_LISTEN", "false")]),
        )
        .unwrap();

        assert_eq!(config.forwarder.target_param, "target");
        assert!(!config.listener.enabled);
    }

    #[test]
    fn test_empty_env_leaves_defaults() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, fake_env(&[])).unwrap();
        assert_eq!(config.forwarder.target_param, "url");
        assert!(config.listener.enabled);
    }
}
