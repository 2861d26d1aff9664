//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOCKROOM_API_URL` - Base URL of the inventory API (default: `http://localhost:8000/api`)
//! - `STOCKROOM_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API base URL for a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

const DEFAULT_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection settings for the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, always ending in `/`.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration for the given base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url("STOCKROOM_API_URL", api_url)?,
            timeout: Duration::from_secs(30),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = get_env_or_default(&lookup, "STOCKROOM_API_URL", DEFAULT_API_URL);
        let api_url = parse_api_url("STOCKROOM_API_URL", &api_url)?;

        let timeout_secs = get_env_or_default(&lookup, "STOCKROOM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOCKROOM_TIMEOUT_SECS".to_string(), e.to_string()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOCKROOM_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the
/// path prefix (`/api` + `products/` must give `/api/products/`).
fn parse_api_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/api/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_custom_values() {
        let config = load(&[
            ("STOCKROOM_API_URL", "https://inventory.example.com/api/v1"),
            ("STOCKROOM_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://inventory.example.com/api/v1/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = load(&[("STOCKROOM_API_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOCKROOM_API_URL"));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        assert!(load(&[("STOCKROOM_API_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(load(&[("STOCKROOM_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("STOCKROOM_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = load(&[("STOCKROOM_API_URL", "  ")]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/api/");
    }
}
