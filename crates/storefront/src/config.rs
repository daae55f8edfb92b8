//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LUXE_CATALOG_URL` - Catalog service base URL (default: <https://fakestoreapi.com>)
//! - `LUXE_STORAGE_PATH` - Session snapshot file (default: `.luxe-store.json`)
//! - `LUXE_REQUEST_TIMEOUT_SECS` - Catalog request timeout in seconds (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)
//! - `SENTRY_SAMPLE_RATE` - Fraction of errors sent to Sentry (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_STORAGE_PATH: &str = ".luxe-store.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote catalog service settings
    pub catalog: CatalogConfig,
    /// File holding the persisted shopping session
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
}

/// Remote catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL, always ending in `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl StorefrontConfig {
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

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let base_url = parse_base_url(
            "LUXE_CATALOG_URL",
            &env.or_default("LUXE_CATALOG_URL", DEFAULT_CATALOG_URL),
        )?;
        let timeout_secs = env
            .or_default("LUXE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LUXE_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LUXE_REQUEST_TIMEOUT_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }

        let storage_path = PathBuf::from(env.or_default("LUXE_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .map(|raw| {
                raw.parse::<f32>()
                    .ok()
                    .filter(|rate| (0.0..=1.0).contains(rate))
                    .ok_or_else(|| {
                        ConfigError::InvalidEnvVar(
                            "SENTRY_SAMPLE_RATE".to_string(),
                            format!("expected a number between 0 and 1, got {raw}"),
                        )
                    })
            })
            .transpose()?
            .unwrap_or(1.0);

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            storage_path,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse an http(s) base URL and make sure its path ends with `/`.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.catalog.request_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_path, PathBuf::from(".luxe-store.json"));
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = config_from(&[("LUXE_CATALOG_URL", "http://localhost:8080/api")]).unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(
            config.catalog.base_url.join("products").unwrap().as_str(),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = config_from(&[("LUXE_CATALOG_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(name, _) if name == "LUXE_CATALOG_URL"));

        let err = config_from(&[("LUXE_CATALOG_URL", "ftp://catalog.example")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(config_from(&[("LUXE_REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("LUXE_REQUEST_TIMEOUT_SECS", "0")]).is_err());

        let config = config_from(&[("LUXE_REQUEST_TIMEOUT_SECS", "3")]).unwrap();
        assert_eq!(config.catalog.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_sentry_settings() {
        let config = config_from(&[
            ("SENTRY_DSN", "https://key@o0.ingest.sentry.io/1"),
            ("SENTRY_ENVIRONMENT", "staging"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);

        assert!(config_from(&[("SENTRY_SAMPLE_RATE", "2")]).is_err());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("LUXE_STORAGE_PATH", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.storage_path, PathBuf::from(".luxe-store.json"));
        assert!(config.sentry_dsn.is_none());
    }
}
