//! Channel operations: discovery, membership, moderation and posts

use kaalition_domain::{
    hydrate_seq, Channel, ChannelMember, ChannelMessage, ChannelRole, Hydrate, KaalitionError,
    Reaction, Result,
};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::{messaging::reactions_from, optional, resource, success_flag, Account};
use crate::pagination::Pages;

/// Fields for creating a channel. Only `name` is required by the
/// server; everything else falls back to server defaults.
#[derive(Debug, Clone, Serialize)]
pub struct NewChannel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_emoji: Option<String>,
}

impl NewChannel {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_public: None,
            avatar_emoji: None,
        }
    }
}

/// Partial channel update; `None` fields are omitted from the request
/// body and left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_emoji: Option<String>,
}

impl Account {
    /// Public channel directory.
    ///
    /// # Errors
    /// Pipeline errors; a failed page discards the whole aggregation.
    pub async fn channels(&self, pages: Pages) -> Result<Vec<Channel>> {
        self.list("/api/channels", pages).await
    }

    /// Channels this account belongs to.
    ///
    /// # Errors
    /// Pipeline errors as classified by the dispatcher.
    pub async fn my_channels(&self) -> Result<Vec<Channel>> {
        let value = self.get("/api/channels/my", &[]).await?;
        hydrate_seq(resource_seq(&value))
    }

    /// A single channel, or `None` when it does not exist.
    ///
    /// # Errors
    /// Every failure except a 404, which maps to `Ok(None)`.
    pub async fn channel(&self, channel_id: i64) -> Result<Option<Channel>> {
        let fetched = self.get(&format!("/api/channels/{channel_id}"), &[]).await;
        optional(fetched.and_then(|value| Channel::hydrate(resource(&value, "channel"))))
    }

    /// Create a channel; the caller becomes its owner.
    ///
    /// # Errors
    /// `Rejected` carries the server's reason (name taken, quota, ...).
    pub async fn create_channel(&self, channel: &NewChannel) -> Result<Channel> {
        let payload = serde_json::to_value(channel)
            .map_err(|err| KaalitionError::Decode(err.to_string()))?;
        let response = self.post("/api/channels", Some(&payload)).await?;
        debug!(name = %channel.name, "channel created");
        Channel::hydrate(resource(&response, "channel"))
    }

    /// Apply a partial update to a channel.
    ///
    /// # Errors
    /// `Rejected` when the caller lacks the required role.
    pub async fn update_channel(
        &self,
        channel_id: i64,
        update: &ChannelUpdate,
    ) -> Result<Channel> {
        let payload = serde_json::to_value(update)
            .map_err(|err| KaalitionError::Decode(err.to_string()))?;
        let response = self
            .put(&format!("/api/channels/{channel_id}"), &payload)
            .await?;
        Channel::hydrate(resource(&response, "channel"))
    }

    /// Delete a channel. Owner only.
    ///
    /// # Errors
    /// Pipeline errors; `Ok(false)` reflects a served `success: false`.
    pub async fn delete_channel(&self, channel_id: i64) -> Result<bool> {
        let response = self.delete(&format!("/api/channels/{channel_id}")).await?;
        Ok(success_flag(&response))
    }

    /// Join a public channel.
    ///
    /// # Errors
    /// `Rejected` for private channels or an existing membership.
    pub async fn join_channel(&self, channel_id: i64) -> Result<bool> {
        let response = self
            .post(&format!("/api/channels/{channel_id}/join"), None)
            .await?;
        Ok(success_flag(&response))
    }

    /// Leave a channel.
    ///
    /// # Errors
    /// `Rejected` when the owner tries to leave their own channel.
    pub async fn leave_channel(&self, channel_id: i64) -> Result<bool> {
        let response = self
            .post(&format!("/api/channels/{channel_id}/leave"), None)
            .await?;
        Ok(success_flag(&response))
    }

    /// Member roster of a channel, with roles.
    ///
    /// # Errors
    /// Pipeline errors; a failed page discards the whole aggregation.
    pub async fn members(&self, channel_id: i64, pages: Pages) -> Result<Vec<ChannelMember>> {
        self.list(&format!("/api/channels/{channel_id}/members"), pages)
            .await
    }

    /// Assign a member's role. Owner or admin only.
    ///
    /// # Errors
    /// `Rejected` when the caller lacks the required role.
    pub async fn set_member_role(
        &self,
        channel_id: i64,
        user_id: i64,
        role: ChannelRole,
    ) -> Result<bool> {
        let payload = json!({ "role": role.as_str() });
        let response = self
            .put(
                &format!("/api/channels/{channel_id}/members/{user_id}/role"),
                &payload,
            )
            .await?;
        Ok(success_flag(&response))
    }

    /// Posts of a channel, pinned ones first.
    ///
    /// # Errors
    /// Pipeline errors; a failed page discards the whole aggregation.
    pub async fn posts(&self, channel_id: i64, pages: Pages) -> Result<Vec<ChannelMessage>> {
        self.list(&format!("/api/channels/{channel_id}/messages"), pages)
            .await
    }

    /// Publish a post in a channel.
    ///
    /// # Errors
    /// `Rejected` when the caller may not post in this channel.
    pub async fn create_post(&self, channel_id: i64, text: &str) -> Result<ChannelMessage> {
        let payload = json!({ "message": text });
        let response = self
            .post(&format!("/api/channels/{channel_id}/messages"), Some(&payload))
            .await?;
        ChannelMessage::hydrate(resource(&response, "data"))
    }

    /// Edit a channel post.
    ///
    /// # Errors
    /// `Rejected` when the server refuses the edit.
    pub async fn edit_post(
        &self,
        channel_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<ChannelMessage> {
        let payload = json!({ "message": text });
        let response = self
            .put(
                &format!("/api/channels/{channel_id}/messages/{message_id}"),
                &payload,
            )
            .await?;
        ChannelMessage::hydrate(resource(&response, "data"))
    }

    /// Delete a channel post.
    ///
    /// # Errors
    /// Pipeline errors; `Ok(false)` reflects a served `success: false`.
    pub async fn delete_post(&self, channel_id: i64, message_id: i64) -> Result<bool> {
        let response = self
            .delete(&format!("/api/channels/{channel_id}/messages/{message_id}"))
            .await?;
        Ok(success_flag(&response))
    }

    /// Pin or unpin a post, depending on its current state.
    ///
    /// # Errors
    /// `Rejected` when the caller lacks the required role.
    pub async fn toggle_pin(&self, channel_id: i64, message_id: i64) -> Result<bool> {
        let response = self
            .post(
                &format!("/api/channels/{channel_id}/messages/{message_id}/pin"),
                None,
            )
            .await?;
        Ok(success_flag(&response))
    }

    /// Toggle an emoji reaction on a channel post, mirroring the
    /// direct-message toggle.
    ///
    /// # Errors
    /// `Rejected` when the emoji is not allowed.
    pub async fn toggle_post_reaction(
        &self,
        channel_id: i64,
        message_id: i64,
        emoji: &str,
    ) -> Result<Vec<Reaction>> {
        let payload = json!({ "emoji": emoji });
        let response = self
            .post(
                &format!("/api/channels/{channel_id}/messages/{message_id}/reactions"),
                Some(&payload),
            )
            .await?;
        reactions_from(&response)
    }
}

/// `my_channels` answers either a bare array or `{"channels": [...]}`.
fn resource_seq(value: &serde_json::Value) -> &serde_json::Value {
    value
        .get("channels")
        .filter(|v| v.is_array())
        .unwrap_or(value)
}
