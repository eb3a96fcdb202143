//! Channel types: `Channel`, `ChannelMessage`, `ChannelMember`
//!
//! Channels are broadcast feeds owned by a single user. Posts inside a
//! channel are `ChannelMessage` records; a post may have comments living
//! in a dedicated comments channel referenced by `comments_channel_id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::Result;
use crate::hydrate::{self, Hydrate};
use crate::types::{Reaction, User};

/// Membership role inside a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelRole {
    Owner,
    Admin,
    Member,
}

impl ChannelRole {
    /// Parse the server's role string. Unknown values are tolerated as
    /// plain members rather than failing the whole member list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            "member" => Self::Member,
            other => {
                warn!(role = other, "unknown channel role, treating as member");
                Self::Member
            }
        }
    }

    /// The wire form the server expects in role-change payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// A broadcast channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    /// Always a full `User`; a bare owner id in the payload is expanded
    /// into a sparse record.
    pub owner: User,
    pub description: String,
    pub image: Option<String>,
    pub is_public: bool,
    pub is_verified: bool,
    pub members_count: i64,
    pub is_member: bool,
    pub is_admin: bool,
    /// Server-defined settings object, kept verbatim.
    pub settings: Value,
    /// Server-defined permission object for subscribers, kept verbatim.
    pub subscriber_permissions: Value,
    pub allowed_reactions: Vec<String>,
    /// Channel holding the comment threads of this channel's posts.
    pub comments_channel_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl Hydrate for Channel {
    const ENTITY: &'static str = "channel";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            name: hydrate::string_or(value, "name", ""),
            owner: hydrate::user_ref(value, "owner", Self::ENTITY),
            description: hydrate::string_or(value, "description", ""),
            image: hydrate::opt_string(value, "image"),
            is_public: hydrate::bool_or(value, "is_public", false),
            is_verified: hydrate::bool_or(value, "is_verified", false),
            members_count: hydrate::int_or(value, "members_count", 0).max(0),
            is_member: hydrate::bool_or(value, "is_member", false),
            is_admin: hydrate::bool_or(value, "is_admin", false),
            settings: hydrate::raw_or_null(value, "settings"),
            subscriber_permissions: hydrate::raw_or_null(value, "subscriber_permissions"),
            allowed_reactions: hydrate::string_list(value, "allowed_reactions"),
            comments_channel_id: hydrate::opt_int(value, "comments_channel_id"),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}

/// A post inside a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub id: i64,
    pub channel_id: i64,
    pub author: User,
    #[serde(rename = "message")]
    pub text: String,
    pub image: Option<String>,
    pub is_pinned: bool,
    pub comments_count: i64,
    pub reactions: Vec<Reaction>,
    pub created_at: String,
    pub updated_at: String,
}

impl Hydrate for ChannelMessage {
    const ENTITY: &'static str = "channel message";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            channel_id: hydrate::int_or(value, "channel_id", 0),
            author: hydrate::user_ref(value, "author", Self::ENTITY),
            text: hydrate::string_or(value, "message", ""),
            image: hydrate::opt_string(value, "image"),
            is_pinned: hydrate::bool_or(value, "is_pinned", false),
            comments_count: hydrate::int_or(value, "comments_count", 0),
            reactions: hydrate::seq_or_empty(value, "reactions")?,
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}

/// One member of a channel. Contextual to the channel the listing was
/// requested for; the channel id is not repeated on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMember {
    pub user: User,
    pub role: ChannelRole,
    pub joined_at: String,
}

impl Hydrate for ChannelMember {
    const ENTITY: &'static str = "channel member";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            user: hydrate::user_ref(value, "user", Self::ENTITY),
            role: ChannelRole::parse(&hydrate::string_or(value, "role", "member")),
            joined_at: hydrate::string_or(value, "joined_at", ""),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sparse_owner_channel_hydrates_with_defaults() {
        let channel = Channel::hydrate(&json!({
            "id": 7,
            "name": "Test",
            "owner": 42,
            "is_public": true,
        }))
        .unwrap();

        assert_eq!(channel.id, 7);
        assert_eq!(channel.name, "Test");
        assert_eq!(channel.owner.id, 42);
        assert_eq!(channel.owner.nickname, "");
        assert!(channel.is_public);
        assert_eq!(channel.members_count, 0);
        assert_eq!(channel.image, None);
        assert!(channel.allowed_reactions.is_empty());
        assert_eq!(channel.comments_channel_id, None);
    }

    #[test]
    fn channel_round_trips_when_all_fields_are_present() {
        let source = json!({
            "id": 7,
            "name": "Announcements",
            "owner": {"id": 42, "username": "root", "nickname": "Root"},
            "description": "Official news",
            "image": "/channels/7.png",
            "is_public": true,
            "is_verified": true,
            "members_count": 120,
            "is_member": true,
            "is_admin": false,
            "settings": {"slow_mode": 30},
            "subscriber_permissions": {"can_comment": true},
            "allowed_reactions": ["👍", "🔥"],
            "comments_channel_id": 18,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z",
        });

        let channel = Channel::hydrate(&source).unwrap();
        let reserialized = serde_json::to_value(&channel).unwrap();

        assert_eq!(reserialized["settings"], source["settings"]);
        assert_eq!(
            reserialized["subscriber_permissions"],
            source["subscriber_permissions"]
        );
        assert_eq!(reserialized["allowed_reactions"], source["allowed_reactions"]);
        assert_eq!(reserialized["comments_channel_id"], source["comments_channel_id"]);
        assert_eq!(reserialized["members_count"], source["members_count"]);
    }

    #[test]
    fn post_defaults_cover_pin_and_comments() {
        let post = ChannelMessage::hydrate(&json!({
            "id": 31,
            "channel_id": 7,
            "author": {"id": 42},
            "message": "first post",
        }))
        .unwrap();

        assert!(!post.is_pinned);
        assert_eq!(post.comments_count, 0);
        assert!(post.reactions.is_empty());
    }

    #[test]
    fn member_roles_parse_with_unknown_fallback() {
        assert_eq!(ChannelRole::parse("owner"), ChannelRole::Owner);
        assert_eq!(ChannelRole::parse("admin"), ChannelRole::Admin);
        assert_eq!(ChannelRole::parse("member"), ChannelRole::Member);
        assert_eq!(ChannelRole::parse("moderator"), ChannelRole::Member);
    }

    #[test]
    fn member_hydrates_nested_user() {
        let member = ChannelMember::hydrate(&json!({
            "user": {"id": 5, "username": "eve", "nickname": "Eve"},
            "role": "admin",
            "joined_at": "2024-01-15T12:00:00Z",
        }))
        .unwrap();

        assert_eq!(member.user.id, 5);
        assert_eq!(member.role, ChannelRole::Admin);
        assert_eq!(member.joined_at, "2024-01-15T12:00:00Z");
    }
}
