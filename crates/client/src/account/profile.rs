//! Profile and session management operations

use kaalition_domain::{AccountProfile, Hydrate, KaalitionError, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::{resource, Account};

/// Partial profile update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_emoji: Option<String>,
}

impl Account {
    /// The locally stored profile snapshot, without a network call.
    ///
    /// # Errors
    /// [`KaalitionError::NotAuthenticated`] when the session never
    /// completed authentication.
    pub async fn profile(&self) -> Result<AccountProfile> {
        self.session()
            .profile()
            .await
            .ok_or(KaalitionError::NotAuthenticated)
    }

    /// Re-fetch the authenticated identity from the server.
    ///
    /// Returns whether the session is still valid: `Ok(true)` on a
    /// successful fetch (the stored profile is updated), `Ok(false)` when
    /// the server rejected the token (the session is now invalidated).
    /// Transient failures leave the session state untouched and surface
    /// as errors.
    ///
    /// # Errors
    /// Transport, server and decode failures; never `AuthExpired`.
    pub async fn refresh(&self) -> Result<bool> {
        match self.get("/api/auth/me", &[]).await {
            Ok(identity) => {
                let profile = AccountProfile::hydrate(resource(&identity, "user"))?;
                self.session().update_profile(profile).await;
                debug!("identity refreshed");
                Ok(true)
            }
            Err(KaalitionError::AuthExpired) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Update profile fields, returning the profile as the server now
    /// sees it. The stored snapshot is updated as well.
    ///
    /// # Errors
    /// `Rejected` carries the server's validation message verbatim.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<AccountProfile> {
        let body = serde_json::to_value(update)
            .map_err(|e| KaalitionError::Decode(format!("unserializable update: {e}")))?;

        let response = self.put("/api/user/profile", &body).await?;
        let profile = AccountProfile::hydrate(resource(&response, "user"))?;
        self.session().update_profile(profile.clone()).await;
        info!(user_id = profile.id, "profile updated");
        Ok(profile)
    }

    /// Log out. Best-effort: the server call may fail for any reason,
    /// but the session is always invalidated locally and the operation
    /// reports success.
    pub async fn logout(&self) {
        match self.post("/api/auth/logout", None).await {
            Ok(_) => debug!("server acknowledged logout"),
            Err(err) => debug!(error = %err, "logout request failed, invalidating locally"),
        }
        self.session().invalidate().await;
    }
}
