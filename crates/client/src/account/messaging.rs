//! Direct-messaging operations

use kaalition_domain::{
    hydrate_seq, Chat, Hydrate, KaalitionError, Message, Reaction, Result, User,
};
use serde_json::{json, Value};
use tracing::debug;

use super::{resource, success_flag, Account};
use crate::pagination::Pages;

impl Account {
    /// Search users by nickname or username.
    ///
    /// # Errors
    /// Pipeline errors as classified by the dispatcher.
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let value = self
            .get("/api/messages/search/users", &[("query", query.to_owned())])
            .await?;
        hydrate_seq(&value)
    }

    /// Conversations of this account, one per distinct partner.
    ///
    /// # Errors
    /// Pipeline errors; a failed page discards the whole aggregation.
    pub async fn chats(&self, pages: Pages) -> Result<Vec<Chat>> {
        self.list("/api/messages/chats", pages).await
    }

    /// Message history with one partner, in server order.
    ///
    /// # Errors
    /// Pipeline errors; a failed page discards the whole aggregation.
    pub async fn messages_with(&self, user_id: i64, pages: Pages) -> Result<Vec<Message>> {
        self.list(&format!("/api/messages/with/{user_id}"), pages)
            .await
    }

    /// Send a direct message, returning the created record.
    ///
    /// # Errors
    /// `Rejected` carries the server's reason (recipient blocks messages,
    /// rate limit with wait hint, ...).
    pub async fn send_message(&self, receiver_id: i64, text: &str) -> Result<Message> {
        let payload = json!({ "receiver_id": receiver_id, "message": text });
        let response = self.post("/api/messages/send", Some(&payload)).await?;
        debug!(receiver_id, "message sent");
        Message::hydrate(resource(&response, "data"))
    }

    /// Edit a sent message; the returned record carries the new
    /// `edited_at`.
    ///
    /// # Errors
    /// `Rejected` when the server refuses the edit.
    pub async fn edit_message(&self, message_id: i64, text: &str) -> Result<Message> {
        let payload = json!({ "message": text });
        let response = self
            .put(&format!("/api/messages/{message_id}"), &payload)
            .await?;
        Message::hydrate(resource(&response, "data"))
    }

    /// Delete a message.
    ///
    /// # Errors
    /// Pipeline errors; `Ok(false)` reflects a served `success: false`.
    pub async fn delete_message(&self, message_id: i64) -> Result<bool> {
        let response = self.delete(&format!("/api/messages/{message_id}")).await?;
        Ok(success_flag(&response))
    }

    /// Mark a received message as read.
    ///
    /// # Errors
    /// Pipeline errors; `Ok(false)` reflects a served `success: false`.
    pub async fn mark_read(&self, message_id: i64) -> Result<bool> {
        let response = self
            .post(&format!("/api/messages/{message_id}/read"), None)
            .await?;
        Ok(success_flag(&response))
    }

    /// Toggle an emoji reaction on a message: present → removed,
    /// absent → added. Returns the reaction set as the server now
    /// reports it, so toggling twice restores the original sequence.
    ///
    /// # Errors
    /// `Rejected` when the emoji is not allowed.
    pub async fn toggle_reaction(&self, message_id: i64, emoji: &str) -> Result<Vec<Reaction>> {
        let payload = json!({ "emoji": emoji });
        let response = self
            .post(&format!("/api/messages/{message_id}/reactions"), Some(&payload))
            .await?;
        reactions_from(&response)
    }
}

/// Reaction-toggle responses vary: a bare reaction array, an object with
/// a `reactions` key, or the full updated message.
pub(crate) fn reactions_from(value: &Value) -> Result<Vec<Reaction>> {
    match value {
        Value::Array(_) => hydrate_seq(value),
        Value::Object(_) => match value.get("reactions") {
            Some(reactions) => hydrate_seq(reactions),
            None => Ok(Message::hydrate(value)?.reactions),
        },
        _ => Err(KaalitionError::Decode(
            "reaction response is neither an array nor an object".to_owned(),
        )),
    }
}
