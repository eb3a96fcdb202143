//! Direct-message types: `Message`, `Chat` and `Reaction`
//!
//! Records are immutable snapshots of server state. An edit or reaction
//! toggle never mutates an existing record; the operation returns a fresh
//! one hydrated from the response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::hydrate::{self, Hydrate};
use crate::types::User;

/// An emoji reaction aggregated over the users who placed it.
///
/// `count` is a display hint supplied by the server; it is stored verbatim
/// and deliberately not reconciled against `user_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub count: i64,
    pub user_ids: Vec<i64>,
}

impl Hydrate for Reaction {
    const ENTITY: &'static str = "reaction";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            emoji: hydrate::string_or(value, "emoji", ""),
            count: hydrate::int_or(value, "count", 0),
            user_ids: hydrate::int_list(value, "user_ids"),
        })
    }
}

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender: User,
    pub receiver: User,
    #[serde(rename = "message")]
    pub text: String,
    pub image: Option<String>,
    pub is_read: bool,
    pub read_at: Option<String>,
    /// Set only when the message has been edited.
    pub edited_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub reactions: Vec<Reaction>,
}

impl Hydrate for Message {
    const ENTITY: &'static str = "message";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            sender: hydrate::user_ref(value, "sender", Self::ENTITY),
            receiver: hydrate::user_ref(value, "receiver", Self::ENTITY),
            text: hydrate::string_or(value, "message", ""),
            image: hydrate::opt_string(value, "image"),
            is_read: hydrate::bool_or(value, "is_read", false),
            read_at: hydrate::opt_string(value, "read_at"),
            edited_at: hydrate::opt_string(value, "edited_at"),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
            reactions: hydrate::seq_or_empty(value, "reactions")?,
        })
    }
}

/// A conversation with one partner. The id is derived from the partner's
/// id and is never assigned independently by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "user")]
    pub partner: User,
    pub last_message: Option<Message>,
    pub unread_count: i64,
}

impl Hydrate for Chat {
    const ENTITY: &'static str = "chat";

    fn hydrate(value: &Value) -> Result<Self> {
        let partner = match value.get("user") {
            Some(v) => User::hydrate(v)?,
            None => User::sparse(hydrate::require_id(value, "id", Self::ENTITY)?),
        };
        let last_message = match value.get("last_message") {
            Some(v @ Value::Object(_)) => Some(Message::hydrate(v)?),
            _ => None,
        };

        Ok(Self {
            id: partner.id,
            partner,
            last_message,
            unread_count: hydrate::int_or(value, "unread_count", 0),
        })
    }
}
