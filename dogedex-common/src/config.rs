//! Configuration loading and resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the resolver logs and falls back to
//! defaults. A config file that exists but does not parse is an error, as is
//! an explicitly requested (`--config`) file that does not exist.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "DOGEDEX_BASE_URL";
/// Environment variable overriding the account token
pub const ENV_AUTH_TOKEN: &str = "DOGEDEX_AUTH_TOKEN";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "DOGEDEX_TIMEOUT_SECS";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "DOGEDEX_LOG_LEVEL";

/// Configuration file contents
///
/// All fields are optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Base URL of the dog catalog API
    #[serde(default)]
    pub base_url: Option<String>,

    /// Account token attached to endpoints that require authentication
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Built-in fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub base_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/v1".to_string(),
            timeout_secs: 30,
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub log_level: String,
}

/// Resolves [`ClientConfig`] from all configuration tiers
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_path: Option<PathBuf>,
    explicit: bool,
    defaults: CompiledDefaults,
}

impl ConfigResolver {
    /// Create a resolver
    ///
    /// `cli_config_path` is the `--config` argument; when absent the
    /// platform config directory is used.
    pub fn new(cli_config_path: Option<PathBuf>) -> Self {
        let explicit = cli_config_path.is_some();
        Self {
            config_path: cli_config_path.or_else(default_config_path),
            explicit,
            defaults: CompiledDefaults::default(),
        }
    }

    /// Config file this resolver reads, if any location is known
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the TOML config file, or defaults when it does not exist
    pub fn load_toml(&self) -> Result<TomlConfig> {
        let Some(path) = &self.config_path else {
            debug!("No config directory for this platform, using defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            if self.explicit {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Config file {} not found, using defaults", path.display());
            return Ok(TomlConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e))
        })
    }

    /// Resolve every setting in CLI → ENV → TOML → default order
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<ClientConfig> {
        let toml_config = self.load_toml()?;
        self.resolve_with(overrides, toml_config)
    }

    fn resolve_with(
        &self,
        overrides: &ConfigOverrides,
        toml_config: TomlConfig,
    ) -> Result<ClientConfig> {
        let base_url = first_valid([
            overrides.base_url.clone(),
            env_value(ENV_BASE_URL),
            toml_config.base_url,
        ])
        .unwrap_or_else(|| self.defaults.base_url.clone());

        let auth_token = first_valid([
            overrides.auth_token.clone(),
            env_value(ENV_AUTH_TOKEN),
            toml_config.auth_token,
        ]);

        let env_timeout = match env_value(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e))
            })?),
            None => None,
        };
        let timeout_secs = overrides
            .timeout_secs
            .or(env_timeout)
            .or(toml_config.timeout_secs)
            .unwrap_or(self.defaults.timeout_secs);
        if timeout_secs == 0 {
            return Err(Error::Config("Request timeout must be at least 1 second".to_string()));
        }

        let log_level = first_valid([
            overrides.log_level.clone(),
            env_value(ENV_LOG_LEVEL),
            Some(toml_config.logging.level),
        ])
        .unwrap_or_else(|| self.defaults.log_level.clone());

        Ok(ClientConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            auth_token,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

/// Platform config file location (`~/.config/dogedex/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dogedex").join("config.toml"))
}

/// Write a config file, creating parent directories as needed
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Non-empty, non-whitespace
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| is_valid_value(v))
}

fn first_valid<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| is_valid_value(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ConfigResolver {
        ConfigResolver {
            config_path: None,
            explicit: false,
            defaults: CompiledDefaults::default(),
        }
    }

    #[test]
    fn test_cli_override_beats_toml() {
        let toml_config = TomlConfig {
            base_url: Some("http://toml.example/api".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            base_url: Some("http://cli.example/api/".to_string()),
            ..Default::default()
        };

        let config = resolver().resolve_with(&overrides, toml_config).unwrap();
        assert_eq!(config.base_url, "http://cli.example/api");
    }

    #[test]
    fn test_blank_values_fall_through() {
        let toml_config = TomlConfig {
            auth_token: Some("toml-token".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            auth_token: Some("   ".to_string()),
            ..Default::default()
        };

        let config = resolver().resolve_with(&overrides, toml_config).unwrap();
        assert_eq!(config.auth_token.as_deref(), Some("toml-token"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let overrides = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let result = resolver().resolve_with(&overrides, TomlConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_logging_section_defaults_to_info() {
        let config: TomlConfig = toml::from_str("[logging]\n").unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
