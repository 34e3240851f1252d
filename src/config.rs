//! Client configuration
//!
//! Transport settings shared by every source client, plus resolution of
//! credentials and overrides from the process environment. Environment
//! lookups happen once, when a client is constructed.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Optional Wallhaven API key
pub const WALLHAVEN_API_KEY: &str = "WALLHAVEN_API_KEY";
/// Required Unsplash access key
pub const UNSPLASH_ACCESS_KEY: &str = "UNSPLASH_ACCESS_KEY";
/// Reddit app client ID
pub const REDDIT_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
/// Reddit app client secret
pub const REDDIT_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
/// Reddit User-Agent string
pub const REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";
/// Request timeout override, in seconds
pub const XANAX_TIMEOUT_SECS: &str = "XANAX_TIMEOUT_SECS";
/// Rate-limit retry budget override
pub const XANAX_MAX_RETRIES: &str = "XANAX_MAX_RETRIES";

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL override; each source falls back to its public endpoint
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries on rate-limit responses (0 = fail fast)
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: u32,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_secs(1),
            backoff_factor: 2,
            default_headers: HashMap::new(),
            user_agent: format!("xanax/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Default config with `XANAX_TIMEOUT_SECS` / `XANAX_MAX_RETRIES` applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = env_var(XANAX_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| Error::InvalidConfigValue {
                field: XANAX_TIMEOUT_SECS.to_string(),
                message: format!("expected whole seconds, got '{raw}'"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = env_var(XANAX_MAX_RETRIES) {
            config.max_retries = raw.parse().map_err(|_| Error::InvalidConfigValue {
                field: XANAX_MAX_RETRIES.to_string(),
                message: format!("expected a non-negative integer, got '{raw}'"),
            })?;
        }

        Ok(config)
    }

    /// Base URL to use for a source whose public endpoint is `default`
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url.as_deref().unwrap_or(default)
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, initial: Duration, factor: u32) -> Self {
        self.config.initial_backoff = initial;
        self.config.backoff_factor = factor;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Read an environment variable, treating empty values as absent
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pick an explicit value, falling back to the environment
pub fn resolve(explicit: Option<String>, name: &str) -> Option<String> {
    explicit.filter(|v| !v.is_empty()).or_else(|| env_var(name))
}

/// Like [`resolve`], but a missing value is an authentication failure
pub fn resolve_required(explicit: Option<String>, name: &str, what: &str) -> Result<String> {
    resolve(explicit, name).ok_or_else(|| {
        Error::auth(format!(
            "{what} is required. Pass it explicitly or set the {name} environment variable."
        ))
    })
}
