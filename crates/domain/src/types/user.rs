//! User identity types
//!
//! `User` is the public identity attached to messages, channels and
//! memberships. `AccountProfile` is the same identity merged with the
//! account-only fields the server returns from `/api/auth/me`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::hydrate::{self, Hydrate};

/// Public identity of a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    /// Path to the profile photo; empty when none is set.
    pub photo: String,
    pub avatar_emoji: Option<String>,
    pub is_verified: bool,
    pub is_admin: bool,
}

impl User {
    /// A user known only by id, as produced when the server sends a bare
    /// identifier instead of a nested object.
    #[must_use]
    pub fn sparse(id: i64) -> Self {
        Self {
            id,
            username: String::new(),
            nickname: String::new(),
            photo: String::new(),
            avatar_emoji: None,
            is_verified: false,
            is_admin: false,
        }
    }
}

impl Hydrate for User {
    const ENTITY: &'static str = "user";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            username: hydrate::string_or(value, "username", ""),
            nickname: hydrate::string_or(value, "nickname", ""),
            photo: hydrate::string_or(value, "photo", ""),
            avatar_emoji: hydrate::opt_string(value, "avatar_emoji"),
            is_verified: hydrate::bool_or(value, "is_verified", false),
            is_admin: hydrate::bool_or(value, "is_admin", false),
        })
    }
}

/// The authenticated user's own profile: the public identity plus the
/// private account fields only `/api/auth/me` exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub photo: String,
    pub bio: String,
    pub avatar_emoji: Option<String>,
    pub profile_public: bool,
    pub show_online: bool,
    pub allow_messages: bool,
    pub show_in_search: bool,
    pub is_admin: bool,
    pub is_verified: bool,
    pub theme: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AccountProfile {
    /// The public view of this profile.
    #[must_use]
    pub fn as_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            nickname: self.nickname.clone(),
            photo: self.photo.clone(),
            avatar_emoji: self.avatar_emoji.clone(),
            is_verified: self.is_verified,
            is_admin: self.is_admin,
        }
    }
}

impl Hydrate for AccountProfile {
    const ENTITY: &'static str = "account profile";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            username: hydrate::string_or(value, "username", ""),
            nickname: hydrate::string_or(value, "nickname", ""),
            email: hydrate::string_or(value, "email", ""),
            photo: hydrate::string_or(value, "photo", ""),
            bio: hydrate::string_or(value, "bio", ""),
            avatar_emoji: hydrate::opt_string(value, "avatar_emoji"),
            profile_public: hydrate::bool_or(value, "profile_public", true),
            show_online: hydrate::bool_or(value, "show_online", true),
            allow_messages: hydrate::bool_or(value, "allow_messages", true),
            show_in_search: hydrate::bool_or(value, "show_in_search", true),
            is_admin: hydrate::bool_or(value, "is_admin", false),
            is_verified: hydrate::bool_or(value, "is_verified", false),
            theme: hydrate::string_or(value, "theme", "dark"),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}
