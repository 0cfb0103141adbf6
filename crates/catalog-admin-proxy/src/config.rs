//! Proxy configuration types.

use std::time::Duration;

use serde::Deserialize;

use catalog_admin_core::DomainSettings;

use crate::error::ConfigError;

/// Configuration for the auth proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Listen address (e.g., "0.0.0.0:3000").
    #[serde(default = "ProxyConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Auth backend base; the captured sub-path is appended to it.
    #[serde(default = "ProxyConfig::default_auth_backend_url")]
    pub auth_backend_url: String,

    /// Copy the inbound `Cookie` header to the backend.
    #[serde(default = "ProxyConfig::default_forward_cookies")]
    pub forward_cookies: bool,

    /// Upstream request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub upstream_timeout_seconds: Option<u64>,

    /// Maximum request body size in bytes.
    #[serde(default = "ProxyConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Host table served by `/api/domain`.
    #[serde(default)]
    pub domains: DomainSettings,
}

impl ProxyConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:3000".to_string()
    }

    fn default_auth_backend_url() -> String {
        "http://localhost:8001/api".to_string()
    }

    const fn default_forward_cookies() -> bool {
        true
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `lookup`, falling back to defaults for unset keys.
    ///
    /// Keys: `LISTEN_ADDR`, `AUTH_BACKEND_URL`, `PROXY_FORWARD_COOKIES`,
    /// `UPSTREAM_TIMEOUT_SECONDS`, `MAX_BODY_BYTES`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = lookup("LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Some(url) = lookup("AUTH_BACKEND_URL") {
            config.auth_backend_url = url;
        }
        if let Some(value) = lookup("PROXY_FORWARD_COOKIES") {
            config.forward_cookies = parse_bool("PROXY_FORWARD_COOKIES", &value)?;
        }
        if let Some(value) = lookup("UPSTREAM_TIMEOUT_SECONDS") {
            config.upstream_timeout_seconds = Some(parse("UPSTREAM_TIMEOUT_SECONDS", &value)?);
        }
        if let Some(value) = lookup("MAX_BODY_BYTES") {
            config.max_body_bytes = parse("MAX_BODY_BYTES", &value)?;
        }

        Ok(config)
    }

    /// Backend base without a trailing slash.
    #[must_use]
    pub fn backend_base(&self) -> &str {
        self.auth_backend_url.trim_end_matches('/')
    }

    /// Get the upstream timeout as a `Duration`, if one is configured.
    #[must_use]
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_seconds.map(Duration::from_secs)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            auth_backend_url: Self::default_auth_backend_url(),
            forward_cookies: Self::default_forward_cookies(),
            upstream_timeout_seconds: None,
            max_body_bytes: Self::default_max_body(),
            domains: DomainSettings::default(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
