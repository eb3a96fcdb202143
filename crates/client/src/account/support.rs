//! Support-ticket operations

use kaalition_domain::Result;
use serde_json::{json, Value};
use tracing::debug;

use super::{success_flag, Account};

/// Where a support message ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportOutcome {
    /// Appended to an already open ticket.
    Continued { ticket_id: i64 },
    /// No open ticket existed, so a new one was created.
    Created,
}

impl Account {
    /// Open a support ticket with an explicit subject.
    ///
    /// # Errors
    /// `Rejected` carries a wait hint when support submissions are
    /// rate-limited.
    pub async fn create_ticket(&self, subject: &str, message: &str) -> Result<bool> {
        let payload = json!({ "subject": subject, "message": message });
        let response = self.post("/api/support", Some(&payload)).await?;
        Ok(success_flag(&response))
    }

    /// Append a message to an existing ticket.
    ///
    /// # Errors
    /// `Rejected` when the ticket is closed or not owned by this
    /// account.
    pub async fn ticket_message(&self, ticket_id: i64, message: &str) -> Result<bool> {
        let payload = json!({ "message": message });
        let response = self
            .post(&format!("/api/support/{ticket_id}/message"), Some(&payload))
            .await?;
        Ok(success_flag(&response))
    }

    /// Send a message to support, continuing the open ticket if one
    /// exists and opening a fresh one under `subject` otherwise.
    ///
    /// # Errors
    /// Pipeline errors from the chat lookup or the follow-up write.
    pub async fn send_to_support(&self, message: &str, subject: &str) -> Result<SupportOutcome> {
        let chat = self.get("/api/support/chat", &[]).await?;
        match open_ticket_id(&chat) {
            Some(ticket_id) => {
                debug!(ticket_id, "continuing open support ticket");
                self.ticket_message(ticket_id, message).await?;
                Ok(SupportOutcome::Continued { ticket_id })
            }
            None => {
                self.create_ticket(subject, message).await?;
                Ok(SupportOutcome::Created)
            }
        }
    }
}

/// The support chat endpoint reports the open ticket under `ticket`,
/// either as a bare id or as an object with an `id`.
fn open_ticket_id(chat: &Value) -> Option<i64> {
    match chat.get("ticket")? {
        Value::Number(id) => id.as_i64(),
        Value::Object(ticket) => ticket.get("id").and_then(Value::as_i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ticket_id_found_in_both_shapes() {
        assert_eq!(open_ticket_id(&json!({"ticket": 9})), Some(9));
        assert_eq!(open_ticket_id(&json!({"ticket": {"id": 9}})), Some(9));
    }

    #[test]
    fn absent_or_null_ticket_means_no_open_chat() {
        assert_eq!(open_ticket_id(&json!({})), None);
        assert_eq!(open_ticket_id(&json!({"ticket": null})), None);
    }
}
