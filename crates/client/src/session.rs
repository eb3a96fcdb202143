//! Authentication session state
//!
//! `AuthSession` owns the bearer token and the hydrated identity of the
//! logged-in user. It is the one piece of genuinely mutable state in the
//! pipeline, guarded by an async `RwLock` that is never held across a
//! network call. The design assumes one logical operation in flight per
//! session; concurrent use requires caller-side coordination.
//!
//! State machine: `Unauthenticated → Authenticating → Authenticated →
//! Invalidated`. Invalidation happens on explicit logout or when the
//! dispatcher observes a 401; after that, authenticated operations fail
//! fast without touching the network.

use kaalition_domain::{AccountProfile, KaalitionError, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Lifecycle state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No credentials supplied yet.
    Unauthenticated,
    /// A credential or token exchange is in flight.
    Authenticating,
    /// Holding a bearer token believed valid.
    Authenticated,
    /// Token rejected by the server or discarded by logout.
    Invalidated,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    token: Option<String>,
    profile: Option<AccountProfile>,
}

/// Bearer token and authentication state for one account.
#[derive(Debug)]
pub struct AuthSession {
    inner: RwLock<Inner>,
}

impl AuthSession {
    /// A fresh, unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: SessionState::Unauthenticated,
                token: None,
                profile: None,
            }),
        }
    }

    /// Mark a credential or token exchange as in flight.
    pub async fn begin_authentication(&self) {
        let mut inner = self.inner.write().await;
        inner.state = SessionState::Authenticating;
        debug!("session authenticating");
    }

    /// Take a pre-issued token for validation. The session stays in
    /// `Authenticating` — the token is usable for the identity fetch that
    /// validates it, nothing else — until [`Self::complete`] promotes it.
    pub async fn adopt_token(&self, token: String) {
        let mut inner = self.inner.write().await;
        inner.state = SessionState::Authenticating;
        inner.token = Some(token);
        debug!("session validating pre-issued token");
    }

    /// Promote a validated provisional token with its fetched identity.
    pub async fn complete(&self, profile: AccountProfile) {
        let mut inner = self.inner.write().await;
        inner.state = SessionState::Authenticated;
        info!(user_id = profile.id, "session established");
        inner.profile = Some(profile);
    }

    /// Store a validated token and identity; the session becomes active.
    pub async fn establish(&self, token: String, profile: AccountProfile) {
        let mut inner = self.inner.write().await;
        inner.state = SessionState::Authenticated;
        inner.token = Some(token);
        info!(user_id = profile.id, "session established");
        inner.profile = Some(profile);
    }

    /// The bearer token for an authenticated call.
    ///
    /// # Errors
    /// Fails fast, without any network call: [`KaalitionError::AuthExpired`]
    /// when the session has been invalidated, [`KaalitionError::NotAuthenticated`]
    /// when it never completed authentication.
    pub async fn bearer(&self) -> Result<String> {
        let inner = self.inner.read().await;
        match inner.state {
            // Authenticating with a provisional token covers the identity
            // fetch that validates a pre-issued token.
            SessionState::Authenticated | SessionState::Authenticating => inner
                .token
                .clone()
                .ok_or(KaalitionError::NotAuthenticated),
            SessionState::Invalidated => Err(KaalitionError::AuthExpired),
            SessionState::Unauthenticated => Err(KaalitionError::NotAuthenticated),
        }
    }

    /// Whether the session currently holds a token believed valid.
    /// A pure state read; no network call is made.
    pub async fn is_active(&self) -> bool {
        self.inner.read().await.state == SessionState::Authenticated
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    /// Drop the token. Called by the dispatcher on 401 and by logout;
    /// always succeeds locally.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.write().await;
        if inner.state != SessionState::Invalidated {
            info!("session invalidated");
        }
        inner.state = SessionState::Invalidated;
        inner.token = None;
    }

    /// Snapshot of the hydrated identity, if authenticated.
    pub async fn profile(&self) -> Option<AccountProfile> {
        self.inner.read().await.profile.clone()
    }

    /// Replace the stored identity after a successful re-fetch. Leaves
    /// the state machine untouched.
    pub async fn update_profile(&self, profile: AccountProfile) {
        self.inner.write().await.profile = Some(profile);
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64) -> AccountProfile {
        use kaalition_domain::Hydrate;
        AccountProfile::hydrate(&serde_json::json!({"id": id, "username": "t"})).unwrap()
    }

    #[tokio::test]
    async fn fresh_session_is_not_active_and_fails_fast() {
        let session = AuthSession::new();
        assert!(!session.is_active().await);
        assert!(matches!(
            session.bearer().await,
            Err(KaalitionError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn establish_moves_to_authenticated() {
        let session = AuthSession::new();
        session.begin_authentication().await;
        assert_eq!(session.state().await, SessionState::Authenticating);

        session.establish("tok".into(), profile(1)).await;
        assert!(session.is_active().await);
        assert_eq!(session.bearer().await.unwrap(), "tok");
        assert_eq!(session.profile().await.map(|p| p.id), Some(1));
    }

    #[tokio::test]
    async fn provisional_token_is_usable_only_for_validation() {
        let session = AuthSession::new();
        session.adopt_token("pre-issued".into()).await;

        // The validation fetch can use the token...
        assert_eq!(session.bearer().await.unwrap(), "pre-issued");
        // ...but the session does not yet count as active.
        assert!(!session.is_active().await);

        session.complete(profile(7)).await;
        assert!(session.is_active().await);
        assert_eq!(session.bearer().await.unwrap(), "pre-issued");
    }

    #[tokio::test]
    async fn invalidated_session_reports_expired_without_network() {
        let session = AuthSession::new();
        session.establish("tok".into(), profile(1)).await;
        session.invalidate().await;

        assert!(!session.is_active().await);
        assert!(matches!(
            session.bearer().await,
            Err(KaalitionError::AuthExpired)
        ));
        // The profile snapshot survives invalidation; only the token is gone.
        assert!(session.profile().await.is_some());
    }
}
