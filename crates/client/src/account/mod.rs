//! Authenticated account surface
//!
//! `Account` composes the dispatcher with an [`AuthSession`] and the
//! hydrated profile of the logged-in user; every operation is a thin
//! application of the request pipeline. Operations are grouped by
//! resource area: [`profile`], [`messaging`], [`channels`], [`support`].

mod channels;
mod messaging;
mod profile;
mod support;

use std::sync::Arc;

use kaalition_domain::{Hydrate, Result};
use reqwest::Method;
use serde_json::Value;

use crate::http::Dispatcher;
use crate::pagination::{self, Page, Pages};
use crate::session::AuthSession;

pub use channels::{ChannelUpdate, NewChannel};
pub use profile::ProfileUpdate;
pub use support::SupportOutcome;

/// An authenticated account: the dispatcher/session pair plus delegating
/// access to the profile snapshot.
#[derive(Debug, Clone)]
pub struct Account {
    dispatcher: Dispatcher,
    session: Arc<AuthSession>,
}

impl Account {
    pub(crate) fn new(dispatcher: Dispatcher, session: Arc<AuthSession>) -> Self {
        Self { dispatcher, session }
    }

    /// The underlying session, for state inspection.
    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Whether the session still holds a token believed valid. Local
    /// check only; use [`Account::refresh`] to verify against the server.
    pub async fn is_active(&self) -> bool {
        self.session.is_active().await
    }

    // -- pipeline helpers ------------------------------------------------

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.dispatcher
            .execute(Method::GET, path, query, None, Some(&self.session))
            .await
    }

    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        self.dispatcher
            .execute(Method::POST, path, &[], body, Some(&self.session))
            .await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.dispatcher
            .execute(Method::PUT, path, &[], Some(body), Some(&self.session))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.dispatcher
            .execute(Method::DELETE, path, &[], None, Some(&self.session))
            .await
    }

    /// Walk a paged listing endpoint according to `pages`.
    pub(crate) async fn list<T: Hydrate>(&self, path: &str, pages: Pages) -> Result<Vec<T>> {
        pagination::collect(pages, |page| async move {
            let value = self.get(path, &[("page", page.to_string())]).await?;
            Page::from_value(&value)
        })
        .await
    }

}

/// Map a 404 rejection to `Ok(None)`: "legitimately absent" stays
/// distinct from "request failed".
pub(crate) fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Some mutation endpoints wrap the resource under a key, others return
/// it bare; pick whichever is the object.
pub(crate) fn resource<'v>(value: &'v Value, key: &str) -> &'v Value {
    value.get(key).filter(|v| v.is_object()).unwrap_or(value)
}

/// Boolean-success normalization for endpoints that answer
/// `{"success": bool}`; a 2xx without the flag counts as success.
pub(crate) fn success_flag(value: &Value) -> bool {
    value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}
