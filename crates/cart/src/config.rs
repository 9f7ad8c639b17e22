//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARTAGE_API_BASE_URL` - Base URL of the inventory service
//!   (e.g., `https://shop.example.com/api`)
//!
//! ## Optional
//! - `CARTAGE_STORAGE_PATH` - Path of the persisted cart blob
//!   (default: `cart.json`)
//! - `CARTAGE_API_TOKEN` - Bearer token for the inventory service
//! - `CARTAGE_HTTP_TIMEOUT_SECS` - Remote lookup timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_PATH: &str = "cart.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CartConfig {
    /// Base URL of the inventory service.
    pub api_base_url: Url,
    /// Path of the persisted cart blob (the fixed storage key).
    pub storage_path: PathBuf,
    /// Optional bearer token for the inventory service.
    pub api_token: Option<SecretString>,
    /// Timeout applied to every remote lookup.
    pub http_timeout: Duration,
}

impl std::fmt::Debug for CartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("storage_path", &self.storage_path)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = parse_url("CARTAGE_API_BASE_URL", &get_required_env("CARTAGE_API_BASE_URL")?)?;

        let storage_path = get_optional_env("CARTAGE_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);

        let api_token = get_optional_env("CARTAGE_API_TOKEN").map(SecretString::from);

        let http_timeout = match get_optional_env("CARTAGE_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("CARTAGE_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            storage_path,
            api_token,
            http_timeout,
        })
    }
}

/// Load a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Load an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse and validate a URL value.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_valid() {
        let url = parse_url("TEST_VAR", "https://shop.example.com/api").unwrap();
        assert_eq!(url.host_str(), Some("shop.example.com"));
    }

    #[test]
    fn test_parse_url_invalid() {
        let err = parse_url("TEST_VAR", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "TEST_VAR"));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = CartConfig {
            api_base_url: Url::parse("https://shop.example.com/api").unwrap(),
            storage_path: PathBuf::from("cart.json"),
            api_token: Some(SecretString::from("super_secret_token")),
            http_timeout: Duration::from_secs(10),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("shop.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
