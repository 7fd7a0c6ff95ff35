//! Configuration management for the search client.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::{Error, Result};

/// Base endpoint used when `SEARCH_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration, injected into the gateway at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint of the ranking service
    pub base_url: Url,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Build a config for an explicit base endpoint.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            request_timeout: None,
        })
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("SEARCH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout = match env::var("SEARCH_API_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            request_timeout,
        })
    }

    /// Replace the base endpoint, keeping the other settings.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid endpoint path {path:?}: {e}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid base URL {raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Unsupported scheme {:?} in base URL",
            url.scheme()
        )));
    }

    // Relative joins replace the last segment unless the path ends in '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("SEARCH_API_TIMEOUT_SECS must be an integer, got {raw:?}")))?;

    if secs == 0 {
        return Err(Error::Config(
            "SEARCH_API_TIMEOUT_SECS must be greater than zero".to_string(),
        ));
    }

    Ok(Duration::from_secs(secs))
}
