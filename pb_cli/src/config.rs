//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./pickleball-data";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the event and host token documents
    pub data_dir: PathBuf,
    /// Public base URL used for share links
    pub base_url: String,
    /// Courts used by `create` when `--courts` is absent
    pub default_courts: u32,
    /// Target score used by `create` when `--points` is absent
    pub default_points: u32,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `data_dir_override` - Optional data directory (from CLI args)
    /// * `base_url_override` - Optional share base URL (from CLI args)
    pub fn from_env(
        data_dir_override: Option<PathBuf>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = data_dir_override
            .or_else(|| std::env::var("PB_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        if data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "PB_DATA_DIR".to_string(),
                hint: format!("Unset it to use {DEFAULT_DATA_DIR}"),
            });
        }

        let base_url = base_url_override
            .or_else(|| std::env::var("PB_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(CliConfig {
            data_dir,
            base_url,
            default_courts: parse_env_or("PB_DEFAULT_COURTS", 3),
            default_points: parse_env_or("PB_DEFAULT_POINTS", 11),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "PB_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if self.default_courts == 0 {
            return Err(ConfigError::Invalid {
                var: "PB_DEFAULT_COURTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.default_points == 0 {
            return Err(ConfigError::Invalid {
                var: "PB_DEFAULT_POINTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
