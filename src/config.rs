//! Configuration management for the EMT portal
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::EmtPortalError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the EMT portal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmtPortalConfig {
    /// Routing backend configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Hospital and protocol content
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Routing backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the OpenRouteService compatible backend
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_routing_timeout")]
    pub timeout_seconds: u32,
    /// Maximum routing requests in flight per resolution
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,
}

/// Directory content locations. Embedded content is used when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub hospitals_path: Option<PathBuf>,
    pub protocols_path: Option<PathBuf>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_routing_timeout() -> u32 {
    10
}

fn default_max_concurrency() -> u32 {
    8
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            api_key: None,
            timeout_seconds: default_routing_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl EmtPortalConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. EMTPORTAL_ROUTING__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("EMTPORTAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: EmtPortalConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("emtportal").join("config.toml"))
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        if self.routing.base_url.is_empty() {
            self.routing.base_url = default_routing_base_url();
        }
        if self.routing.timeout_seconds == 0 {
            self.routing.timeout_seconds = default_routing_timeout();
        }
        if self.routing.max_concurrency == 0 {
            self.routing.max_concurrency = default_max_concurrency();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_routing()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_routing(&self) -> Result<()> {
        if let Some(api_key) = &self.routing.api_key {
            if api_key.trim().is_empty() {
                return Err(EmtPortalError::config(
                    "Routing API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if !self.routing.base_url.starts_with("http://")
            && !self.routing.base_url.starts_with("https://")
        {
            return Err(EmtPortalError::config(
                "Routing base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.routing.timeout_seconds > 120 {
            return Err(
                EmtPortalError::config("Routing timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.routing.max_concurrency > 64 {
            return Err(
                EmtPortalError::config("Routing max concurrency cannot exceed 64").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EmtPortalError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(EmtPortalError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = EmtPortalConfig::default();
        assert_eq!(config.routing.base_url, "https://api.openrouteservice.org");
        assert_eq!(config.routing.timeout_seconds, 10);
        assert_eq!(config.routing.max_concurrency, 8);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.routing.api_key.is_none());
        assert!(config.directory.hospitals_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = EmtPortalConfig::default();
        config.routing.api_key = Some("  ".to_string());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key cannot be empty"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = EmtPortalConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = EmtPortalConfig::default();
        config.routing.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = EmtPortalConfig::default();
        config.routing.base_url = "ftp://routes.example".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_zero_values() {
        let mut config = EmtPortalConfig::default();
        config.routing.timeout_seconds = 0;
        config.routing.max_concurrency = 0;
        config.logging.format = String::new();
        config.apply_defaults();
        assert_eq!(config.routing.timeout_seconds, 10);
        assert_eq!(config.routing.max_concurrency, 8);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "emtportal-config-test-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"
[routing]
base_url = "http://localhost:8081/ors"
max_concurrency = 4

[server]
port = 9090

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = EmtPortalConfig::load_from_path(Some(path.clone()));
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.routing.base_url, "http://localhost:8081/ors");
        assert_eq!(config.routing.max_concurrency, 4);
        assert_eq!(config.routing.timeout_seconds, 10);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = EmtPortalConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("emtportal"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
