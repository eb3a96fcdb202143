//! Client configuration
//!
//! All calls target one fixed origin. The origin is overridable (tests
//! point it at a mock server); the site key and user agent are compiled-in
//! constants sent with every request, authenticated or not.

use std::time::Duration;

use kaalition_domain::{KaalitionError, Result};

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://kaalition.ru";

/// Header carrying the static site-identifying key.
pub const SITE_KEY_HEADER: &str = "X-Kaalition-Key";

/// Fixed site key compiled into the client.
pub const SITE_KEY: &str = "kaalition-web-v1";

/// Descriptive user agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for a [`crate::PublicClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base origin of the API, without a trailing slash.
    pub base_url: String,
    /// Connection/read timeout applied to every request. The only
    /// blocking boundary of the pipeline.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Configuration pointed at a non-default origin.
    ///
    /// # Errors
    /// Returns [`KaalitionError::Transport`] if the origin is not a valid
    /// absolute URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| KaalitionError::Transport(format!("invalid base url: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..Self::default()
        })
    }

    /// Override the transport timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
