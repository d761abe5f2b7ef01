//! Configuration management for the Home Assistant MCP server

use crate::error::{HaError, Result};
use std::{env, time::Duration};
use url::Url;

/// Base URL used when `HA_URL` is not set
pub const DEFAULT_HA_URL: &str = "http://homeassistant.local:8123";

/// Environment variable holding the controller base URL
pub const HA_URL_ENV: &str = "HA_URL";

/// Environment variable holding the long-lived access token
pub const HA_TOKEN_ENV: &str = "HA_TOKEN";

/// Environment variable holding an optional request timeout in seconds
pub const HA_TIMEOUT_ENV: &str = "HA_TIMEOUT_SECS";

/// Home Assistant connection configuration
///
/// Built once at startup and handed to the HTTP client. Holds no mutable
/// state, so it can be shared freely between concurrent calls.
#[derive(Clone)]
pub struct HaConfig {
    /// Controller base URL (e.g. "http://homeassistant.local:8123")
    pub url: Url,

    /// Bearer token for the REST API
    pub token: String,

    /// Per-request timeout; `None` keeps the HTTP stack default
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for HaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaConfig")
            .field("url", &self.url.as_str())
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HaConfig {
    /// Create a configuration from a base URL and token
    pub fn new(url: &str, token: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url.trim())
            .map_err(|e| HaError::config(format!("Invalid Home Assistant URL '{url}': {e}")))?;

        Ok(Self {
            url,
            token: token.into(),
            timeout: None,
        })
    }

    /// Set a per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from `HA_URL`, `HA_TOKEN` and `HA_TIMEOUT_SECS`
    ///
    /// A missing token is not rejected here; call [`HaConfig::validate`]
    /// before serving.
    pub fn from_env() -> Result<Self> {
        let url = env::var(HA_URL_ENV).unwrap_or_else(|_| DEFAULT_HA_URL.to_string());
        let token = env::var(HA_TOKEN_ENV).unwrap_or_default();

        let mut config = Self::new(&url, token)?;

        if let Ok(raw) = env::var(HA_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                HaError::config(format!("Invalid {HA_TIMEOUT_ENV} value '{raw}': {e}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Check startup preconditions
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(HaError::config(format!(
                "{HA_TOKEN_ENV} environment variable must be set"
            )));
        }

        match self.url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HaError::config(format!(
                    "Unsupported URL scheme '{other}' - use http or https"
                )))
            }
        }

        if self.url.host().is_none() {
            return Err(HaError::config("Invalid Home Assistant URL - missing host"));
        }

        Ok(())
    }

    /// Full URL for a REST endpoint, e.g. `/automation` -> `{base}/api/automation`
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let base = self.url.as_str().trim_end_matches('/');
        let raw = format!("{base}/api{endpoint}");
        Url::parse(&raw).map_err(|e| HaError::config(format!("Invalid endpoint URL {raw}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_endpoint_url_joins_api_prefix() {
        let config = HaConfig::new(DEFAULT_HA_URL, "token").unwrap();
        assert_eq!(
            config.endpoint_url("/automation").unwrap().as_str(),
            "http://homeassistant.local:8123/api/automation"
        );

        let config = HaConfig::new("https://example.org/ha/", "token").unwrap();
        assert_eq!(
            config.endpoint_url("/automation/abc/trigger").unwrap().as_str(),
            "https://example.org/ha/api/automation/abc/trigger"
        );
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let config = HaConfig::new(DEFAULT_HA_URL, "").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, HaError::Config(_)));
        assert!(err.to_string().contains("HA_TOKEN"));
    }

    #[test]
    fn test_validate_accepts_whitespace_token() {
        // Only an empty token is a configuration error; Home Assistant
        // rejects anything else it does not recognize.
        let config = HaConfig::new(DEFAULT_HA_URL, "   ").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = HaConfig::new("ftp://homeassistant.local", "token").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        assert!(matches!(
            HaConfig::new("not a url", "token"),
            Err(HaError::Config(_))
        ));
    }

    #[test]
    fn test_debug_masks_token() {
        let config = HaConfig::new(DEFAULT_HA_URL, "super-secret").unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                (HA_URL_ENV, None::<&str>),
                (HA_TOKEN_ENV, Some("abc")),
                (HA_TIMEOUT_ENV, None),
            ],
            || {
                let config = HaConfig::from_env().unwrap();
                assert_eq!(config.url.as_str(), "http://homeassistant.local:8123/");
                assert_eq!(config.token, "abc");
                assert_eq!(config.timeout, None);
                assert!(config.validate().is_ok());
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        temp_env::with_vars(
            [
                (HA_URL_ENV, Some("http://10.0.0.5:8123")),
                (HA_TOKEN_ENV, None),
                (HA_TIMEOUT_ENV, Some("15")),
            ],
            || {
                let config = HaConfig::from_env().unwrap();
                assert_eq!(config.url.host_str(), Some("10.0.0.5"));
                assert_eq!(config.timeout, Some(Duration::from_secs(15)));
                assert!(config.validate().is_err());
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_timeout() {
        temp_env::with_var(HA_TIMEOUT_ENV, Some("soon"), || {
            assert!(matches!(HaConfig::from_env(), Err(HaError::Config(_))));
        });
    }
}
