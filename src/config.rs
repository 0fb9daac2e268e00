//! Client configuration.
//!
//! The catalog has been served under more than one path layout. Rather than
//! hard-coding a primary URL and a legacy one at every call site, the layouts
//! are listed once, in priority order, and resolved into candidate base URLs
//! when the client is built.

use std::env;
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// Current path layout of the catalog API.
pub const MUSIC_API_PREFIX: &str = "/api/music";

/// Legacy versioned path layout, kept as fallback.
pub const LEGACY_API_PREFIX: &str = "/api/v1";

/// Environment variable holding the server URL.
pub const ENV_SERVER_URL: &str = "MELODIA_API_URL";

/// Environment variable holding comma separated path prefixes.
pub const ENV_PREFIXES: &str = "MELODIA_API_PREFIXES";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MELODIA_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = concat!("melodia/", env!("CARGO_PKG_VERSION"));

/// Settings for [`CatalogApi`](crate::api::CatalogApi).
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Scheme and authority of the catalog service, e.g. `http://host:3001`.
    pub server_url: String,

    /// Path prefixes tried in order for every request. An entry that is a
    /// full `http(s)://` URL is used as-is instead of being joined to
    /// `server_url`.
    pub prefixes: Vec<String>,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            prefixes: vec![MUSIC_API_PREFIX.to_string(), LEGACY_API_PREFIX.to_string()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CatalogConfig {
    /// Default layout against the given server.
    pub fn new<S: Into<String>>(server_url: S) -> Self {
        Self {
            server_url: server_url.into(),
            ..Default::default()
        }
    }

    /// Read overrides from the environment on top of the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var(ENV_SERVER_URL) {
            config.server_url = url;
        }
        if let Ok(prefixes) = env::var(ENV_PREFIXES) {
            config.prefixes = split_prefixes(&prefixes);
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the prefix list.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that at least one usable base URL can be built.
    pub fn validate(&self) -> Result<()> {
        let server = self.server_url.trim();
        if server.is_empty() {
            return Err(CatalogError::Config("server url is empty".to_string()));
        }
        if !server.starts_with("http://") && !server.starts_with("https://") {
            return Err(CatalogError::Config(format!(
                "server url must start with http:// or https://: {}",
                server
            )));
        }
        if self.prefixes.is_empty() {
            return Err(CatalogError::Config("no API prefixes configured".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(CatalogError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// Candidate base URLs in priority order, without trailing slash.
    pub fn base_urls(&self) -> Vec<String> {
        let server = self.server_url.trim().trim_end_matches('/');
        let mut urls: Vec<String> = Vec::with_capacity(self.prefixes.len());
        for prefix in &self.prefixes {
            let prefix = prefix.trim();
            let url = if prefix.starts_with("http://") || prefix.starts_with("https://") {
                prefix.trim_end_matches('/').to_string()
            } else if prefix.trim_matches('/').is_empty() {
                server.to_string()
            } else {
                format!("{}/{}", server, prefix.trim_matches('/'))
            };
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
        urls
    }
}

/// Split a comma separated prefix list, dropping blanks.
pub fn split_prefixes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
