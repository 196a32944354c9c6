//! Resolver configuration.
//!
//! Defaults suit an interactive session: 30 second request timeout, no body
//! limit, unbounded cache. Override via environment variables or the builder
//! methods.

use std::num::NonZeroUsize;
use std::time::Duration;

use url::Url;

use crate::cache::CachePolicy;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("uhrp-fetch/", env!("CARGO_PKG_VERSION"));

/// Configuration shared by the transport, the lookup backend and the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Base URL of the lookup service. `None` means hosts come from elsewhere.
    pub lookup_url:        Option<Url>,
    /// Per-request timeout applied by the HTTP clients.
    pub timeout:           Duration,
    pub user_agent:        String,
    /// Largest body accepted from a candidate host.
    pub max_content_bytes: Option<u64>,
    pub cache:             CachePolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_url:        None,
            timeout:           Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent:        DEFAULT_USER_AGENT.to_string(),
            max_content_bytes: None,
            cache:             CachePolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `UHRP_LOOKUP_URL` (default: unset)
    /// - `UHRP_TIMEOUT_SECS` (default: 30)
    /// - `UHRP_USER_AGENT` (default: `uhrp-fetch/<version>`)
    /// - `UHRP_MAX_CONTENT_BYTES` (default: unlimited)
    /// - `UHRP_CACHE_CAPACITY` (default: unbounded)
    /// - `UHRP_CACHE_TTL_SECS` (default: no expiry)
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|var| std::env::var(var).ok()) }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = get("UHRP_LOOKUP_URL") {
            config.lookup_url = Some(parse_url("UHRP_LOOKUP_URL", &raw)?);
        }
        if let Some(secs) = parse_number::<u64>(&get, "UHRP_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = get("UHRP_USER_AGENT").filter(|s| !s.trim().is_empty()) {
            config.user_agent = agent;
        }
        config.max_content_bytes = parse_number(&get, "UHRP_MAX_CONTENT_BYTES")?;
        config.cache.max_entries = parse_number::<NonZeroUsize>(&get, "UHRP_CACHE_CAPACITY")?;
        config.cache.ttl = parse_number::<u64>(&get, "UHRP_CACHE_TTL_SECS")?.map(Duration::from_secs);

        Ok(config)
    }

    #[must_use]
    pub fn lookup_url(mut self, url: Url) -> Self {
        self.lookup_url = Some(url);
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_content_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_content_bytes = limit;
        self
    }

    #[must_use]
    pub fn cache(mut self, policy: CachePolicy) -> Self {
        self.cache = policy;
        self
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl(var.to_string(), format!("unsupported scheme {other}"))),
    }
}

fn parse_number<T>(get: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get(var)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidNumber(var.to_string(), e.to_string()))
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(String, String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ResolverConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ResolverConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("uhrp-fetch/"));
        assert_eq!(config.cache, CachePolicy::unbounded());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("UHRP_LOOKUP_URL", "https://overlay.example/"),
            ("UHRP_TIMEOUT_SECS", "5"),
            ("UHRP_USER_AGENT", "browser/1.0"),
            ("UHRP_MAX_CONTENT_BYTES", "1048576"),
            ("UHRP_CACHE_CAPACITY", "128"),
            ("UHRP_CACHE_TTL_SECS", "600"),
        ])
        .unwrap();

        assert_eq!(config.lookup_url.unwrap().as_str(), "https://overlay.example/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "browser/1.0");
        assert_eq!(config.max_content_bytes, Some(1_048_576));
        assert_eq!(config.cache.max_entries, NonZeroUsize::new(128));
        assert_eq!(config.cache.ttl, Some(Duration::from_secs(600)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(load(&[("UHRP_LOOKUP_URL", "not a url")]), Err(ConfigError::InvalidUrl(..))));
        assert!(matches!(load(&[("UHRP_LOOKUP_URL", "ftp://overlay")]), Err(ConfigError::InvalidUrl(..))));
        assert!(matches!(load(&[("UHRP_TIMEOUT_SECS", "soon")]), Err(ConfigError::InvalidNumber(..))));
        assert!(matches!(load(&[("UHRP_CACHE_CAPACITY", "0")]), Err(ConfigError::InvalidNumber(..))));
    }

    #[test]
    fn builder_overrides() {
        let config = ResolverConfig::default()
            .timeout(Duration::from_secs(2))
            .user_agent("x")
            .max_content_bytes(Some(10))
            .cache(CachePolicy::unbounded().ttl(Duration::from_secs(1)));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.user_agent, "x");
        assert_eq!(config.max_content_bytes, Some(10));
        assert_eq!(config.cache.ttl, Some(Duration::from_secs(1)));
    }
}
