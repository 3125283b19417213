//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{PictrievError, PictrievResult};

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.pictriev.com/facedbj.php";

/// Configuration for the Pictriev client.
#[derive(Debug, Clone)]
pub struct PictrievConfig {
    /// Service endpoint; commands are dispatched through its query string
    pub base_url: String,
    /// Deadline for a whole request, including reading the body
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for PictrievConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("pictriev-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PictrievConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("PICTRIEV_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: std::env::var("PICTRIEV_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            connect_timeout: std::env::var("PICTRIEV_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            user_agent: defaults.user_agent,
        }
    }

    /// Check that the endpoint is an absolute http(s) URL and timeouts are set.
    pub fn validate(&self) -> PictrievResult<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            PictrievError::config(format!("invalid base URL {:?}: {}", self.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PictrievError::config(format!(
                "base URL must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(PictrievError::config("timeouts must be non-zero"));
        }

        Ok(url)
    }
}
