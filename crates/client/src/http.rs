//! Request dispatch and outcome classification
//!
//! `Dispatcher` performs a single HTTP round trip against the configured
//! origin and normalizes the outcome into the error taxonomy:
//! transport failure → `Transport`, 401 → `AuthExpired` (invalidating the
//! session as a side effect, exactly once), other 4xx → `Rejected` with
//! the server's message and any embedded wait hint, 5xx → `Server`,
//! unparseable success body → `Decode`. There is no retry and no sleeping
//! anywhere on this path; retry decisions belong to the caller.

use kaalition_domain::{KaalitionError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, SITE_KEY, SITE_KEY_HEADER, USER_AGENT};
use crate::session::AuthSession;
use crate::throttle;

const BODY_EXCERPT_LEN: usize = 200;

/// Performs single HTTP calls against the API origin.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
    base: Url,
}

impl Dispatcher {
    /// Build a dispatcher for the given configuration. The site key and
    /// user agent are installed as default headers so every call carries
    /// them, authenticated or not.
    ///
    /// # Errors
    /// Returns [`KaalitionError::Transport`] if the base URL is invalid
    /// or the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| KaalitionError::Transport(format!("invalid base url: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(SITE_KEY_HEADER, HeaderValue::from_static(SITE_KEY));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .no_proxy()
            .build()
            .map_err(|e| KaalitionError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Execute one request and classify the outcome.
    ///
    /// When `session` is supplied the call is authenticated: the bearer
    /// header is attached, and the session must be active beforehand —
    /// an invalidated session fails here without any network traffic.
    ///
    /// # Errors
    /// One of the taxonomy kinds; see module docs.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        session: Option<&AuthSession>,
    ) -> Result<Value> {
        // Fail fast before touching the network.
        let bearer = match session {
            Some(session) => Some(session.bearer().await?),
            None => None,
        };

        let url = self
            .base
            .join(path)
            .map_err(|e| KaalitionError::Transport(format!("invalid request path: {e}")))?;

        debug!(%method, %url, authenticated = bearer.is_some(), "dispatching request");

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| KaalitionError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| KaalitionError::Transport(e.to_string()))?;

        self.classify(status, &text, session).await
    }

    /// Map an HTTP status and body onto the error taxonomy.
    async fn classify(
        &self,
        status: StatusCode,
        text: &str,
        session: Option<&AuthSession>,
    ) -> Result<Value> {
        if status.is_success() {
            return serde_json::from_str(text).map_err(|e| {
                KaalitionError::Decode(format!("{e}: {}", excerpt(text)))
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("authorization rejected, invalidating session");
            if let Some(session) = session {
                session.invalidate().await;
            }
            return Err(KaalitionError::AuthExpired);
        }

        let message = error_message(text);
        if status.is_client_error() {
            warn!(status = status.as_u16(), message, "request rejected");
            return Err(KaalitionError::Rejected {
                status: status.as_u16(),
                message,
                wait_hint: throttle::wait_hint(text),
            });
        }

        warn!(status = status.as_u16(), "server error");
        Err(KaalitionError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// The server's own `message` field when the error body is JSON, an
/// excerpt of the raw body otherwise.
fn error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str().map(str::to_owned)))
        .unwrap_or_else(|| excerpt(text))
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "empty body".to_owned();
    }
    trimmed.chars().take(BODY_EXCERPT_LEN).collect()
}
