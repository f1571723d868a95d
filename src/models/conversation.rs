use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::BookingRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
}

/// One live chat session. The transcript is kept so the engine can see the
/// last assistant line; the record is the only durable booking state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ConversationMessage>,
    pub record: BookingRecord,
    pub last_activity: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Conversation {
    pub fn last_assistant_text(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "assistant")
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}
