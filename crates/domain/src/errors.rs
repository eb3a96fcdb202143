//! Error types shared by every layer of the client

use thiserror::Error;

/// Main error type for Kaalition API operations
#[derive(Error, Debug)]
pub enum KaalitionError {
    /// No response reached the client (DNS failure, refused connection,
    /// timeout). Never retried automatically.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered 401: the bearer token is invalid or expired.
    /// The session has already been invalidated when this surfaces.
    #[error("authentication expired")]
    AuthExpired,

    /// An authenticated operation was attempted on a session that is not
    /// in the `Authenticated` state. Raised locally, before any network
    /// call.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A 4xx rejection other than 401, carrying the server's own message
    /// verbatim. `wait_hint` holds a server-embedded wait time in seconds
    /// (e.g. from a 429 body) when one could be extracted; acting on it is
    /// the caller's decision.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Server-provided message, surfaced verbatim.
        message: String,
        /// Wait time in seconds embedded in the error body, if any.
        wait_hint: Option<u64>,
    },

    /// A 5xx response. Surfaced as-is, never retried automatically.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt or status text.
        message: String,
    },

    /// A success response whose body could not be parsed as JSON.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// A JSON payload that cannot be turned into the expected record
    /// because a mandatory field (the entity id) is absent or
    /// non-coercible.
    #[error("malformed {entity} payload: {detail}")]
    Hydration {
        /// Entity type being hydrated.
        entity: &'static str,
        /// What was wrong with the payload.
        detail: String,
    },
}

impl KaalitionError {
    /// Status-404 rejections mark a resource as legitimately absent; the
    /// facade maps them to `Ok(None)` for lookup operations.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }
}

/// Result type alias for Kaalition operations
pub type Result<T> = std::result::Result<T, KaalitionError>;
