//! Unauthenticated client surface
//!
//! `PublicClient` covers everything the API serves without a session: the
//! public catalogs, and the three ways of obtaining an authenticated
//! [`Account`] — registration, credential login, and validation of a
//! pre-issued token.

use std::sync::Arc;

use kaalition_domain::{
    hydrate_seq, AccountProfile, Hydrate, KaalitionError, Member, News, Project, Result,
};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

use crate::account::{resource, Account};
use crate::config::ClientConfig;
use crate::http::Dispatcher;
use crate::identity::Credentials;
use crate::session::AuthSession;

/// Client for operations that need no authentication.
#[derive(Debug, Clone)]
pub struct PublicClient {
    dispatcher: Dispatcher,
}

impl PublicClient {
    /// Client against the production origin.
    ///
    /// # Errors
    /// Returns [`KaalitionError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Client with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`KaalitionError::Transport`] if the configuration is
    /// unusable.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(&config)?,
        })
    }

    // -- authentication --------------------------------------------------

    /// Register a new account with the given credentials.
    ///
    /// # Errors
    /// `Rejected` carries the server's validation message (taken username,
    /// weak password, rate limit with wait hint); `Decode` if the response
    /// lacks a token.
    pub async fn register(&self, credentials: &Credentials) -> Result<Account> {
        let payload = json!({
            "username": credentials.username,
            "nickname": credentials.nickname,
            "email": credentials.email,
            "password": credentials.password,
            "password_confirmation": credentials.password,
        });

        let response = self
            .dispatcher
            .execute(Method::POST, "/api/auth/register", &[], Some(&payload), None)
            .await?;

        info!(username = credentials.username, "account registered");
        self.establish(&response).await
    }

    /// Register a new account with generated credentials, returning them
    /// alongside the account so the caller can keep them.
    ///
    /// # Errors
    /// Same as [`Self::register`].
    pub async fn register_generated(&self) -> Result<(Account, Credentials)> {
        let credentials = Credentials::generate();
        let account = self.register(&credentials).await?;
        Ok((account, credentials))
    }

    /// Exchange email/password credentials for an authenticated account.
    ///
    /// # Errors
    /// `Rejected` for wrong credentials, `Decode` if the response lacks a
    /// token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account> {
        let payload = json!({ "email": email, "password": password });
        let response = self
            .dispatcher
            .execute(Method::POST, "/api/auth/login", &[], Some(&payload), None)
            .await?;

        self.establish(&response).await
    }

    /// Validate a pre-issued token and build an account from it.
    ///
    /// # Errors
    /// `AuthExpired` when the server rejects the token.
    pub async fn from_token(&self, token: impl Into<String>) -> Result<Account> {
        let session = Arc::new(AuthSession::new());
        session.adopt_token(token.into()).await;

        let identity = self
            .dispatcher
            .execute(Method::GET, "/api/auth/me", &[], None, Some(&session))
            .await?;
        let profile = AccountProfile::hydrate(resource(&identity, "user"))?;
        session.complete(profile).await;

        Ok(Account::new(self.dispatcher.clone(), session))
    }

    /// Build the account from an auth-endpoint response: token plus either
    /// an inline `user` object or a follow-up identity fetch.
    async fn establish(&self, response: &Value) -> Result<Account> {
        let token = extract_token(response)?;
        match response.get("user") {
            Some(user @ Value::Object(_)) => {
                let session = Arc::new(AuthSession::new());
                session.begin_authentication().await;
                session
                    .establish(token, AccountProfile::hydrate(user)?)
                    .await;
                Ok(Account::new(self.dispatcher.clone(), session))
            }
            // Registration responses omit the profile; validate the fresh
            // token the same way a pre-issued one is validated.
            _ => self.from_token(token).await,
        }
    }

    // -- public catalogs -------------------------------------------------

    /// All showcased projects.
    ///
    /// # Errors
    /// Pipeline errors as classified by the dispatcher.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let value = self
            .dispatcher
            .execute(Method::GET, "/api/projects", &[], None, None)
            .await?;
        hydrate_seq(&value)
    }

    /// Site team members.
    ///
    /// # Errors
    /// Pipeline errors as classified by the dispatcher.
    pub async fn members(&self) -> Result<Vec<Member>> {
        let value = self
            .dispatcher
            .execute(Method::GET, "/api/members", &[], None, None)
            .await?;
        hydrate_seq(&value)
    }

    /// Published news entries.
    ///
    /// # Errors
    /// Pipeline errors as classified by the dispatcher.
    pub async fn news(&self) -> Result<Vec<News>> {
        let value = self
            .dispatcher
            .execute(Method::GET, "/api/news", &[], None, None)
            .await?;
        hydrate_seq(&value)
    }
}

/// The token from an auth response, under either server-observed key.
fn extract_token(response: &Value) -> Result<String> {
    response
        .get("token")
        .or_else(|| response.get("access_token"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| KaalitionError::Decode("auth response carries no token".to_owned()))
}
