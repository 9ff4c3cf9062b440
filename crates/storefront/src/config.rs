//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `LAREK_API_ORIGIN` - Origin of the Larek service
//!   (default: `https://larek-api.nomoreparties.co`)
//! - `LAREK_API_URL` - API base URL (default: `<origin>/api/weblarek`)
//! - `LAREK_CDN_URL` - Image CDN base URL (default: `<origin>/content/weblarek`)

use thiserror::Error;
use url::Url;

/// Origin used when `LAREK_API_ORIGIN` is unset.
pub const DEFAULT_ORIGIN: &str = "https://larek-api.nomoreparties.co";

const API_PATH: &str = "/api/weblarek";
const CDN_PATH: &str = "/content/weblarek";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid URL {0}: {1}")]
    InvalidUrl(String, String),
}

/// Where the storefront finds the API and product images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Base URL for `/product/` and `/order`
    pub api_url: Url,
    /// Base URL that relative product image paths are resolved against
    pub cdn_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Derive both URLs from a service origin.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `origin` is not an http(s) URL.
    pub fn from_origin(origin: &str) -> Result<Self, ConfigError> {
        let origin = origin.trim_end_matches('/');
        Ok(Self {
            api_url: parse_url(&format!("{origin}{API_PATH}"))?,
            cdn_url: parse_url(&format!("{origin}{CDN_PATH}"))?,
        })
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` naming the offending variable.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let origin = get("LAREK_API_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let mut config = Self::from_origin(&origin).map_err(|e| invalid("LAREK_API_ORIGIN", &e))?;

        if let Some(api) = get("LAREK_API_URL") {
            config.api_url = parse_url(&api).map_err(|e| invalid("LAREK_API_URL", &e))?;
        }
        if let Some(cdn) = get("LAREK_CDN_URL") {
            config.cdn_url = parse_url(&cdn).map_err(|e| invalid("LAREK_CDN_URL", &e))?;
        }
        Ok(config)
    }

    /// `api_url` joined with `path`, without doubling slashes.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl(
            raw.to_string(),
            format!("unsupported scheme {other}"),
        )),
    }
}

fn invalid(key: &str, error: &ConfigError) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), error.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.api_url.as_str(),
            "https://larek-api.nomoreparties.co/api/weblarek"
        );
        assert_eq!(
            config.cdn_url.as_str(),
            "https://larek-api.nomoreparties.co/content/weblarek"
        );
        assert_eq!(config, StorefrontConfig::from_origin(DEFAULT_ORIGIN).unwrap());
    }

    #[test]
    fn test_origin_override() {
        let config =
            StorefrontConfig::from_lookup(lookup(&[("LAREK_API_ORIGIN", "http://localhost:3000/")]))
                .unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:3000/api/weblarek");
        assert_eq!(config.endpoint("/product/"), "http://localhost:3000/api/weblarek/product/");
    }

    #[test]
    fn test_explicit_urls_win() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("LAREK_API_ORIGIN", "http://localhost:3000"),
            ("LAREK_API_URL", "http://api.test/v1"),
            ("LAREK_CDN_URL", "http://cdn.test/img"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "http://api.test/v1");
        assert_eq!(config.cdn_url.as_str(), "http://cdn.test/img");
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_lookup(lookup(&[("LAREK_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "LAREK_API_URL"));

        let err = StorefrontConfig::from_lookup(lookup(&[("LAREK_CDN_URL", "ftp://cdn.test")]))
            .unwrap_err();
        assert!(err.to_string().contains("LAREK_CDN_URL"));
    }
}
