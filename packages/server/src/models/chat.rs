use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// Lines kept per room. Older lines fall off the front.
pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLog {
    pub room_id: String,
    pub messages: Vec<ChatMessage>,
    // index of the first line not yet handed out by `take_undelivered`
    #[serde(skip)]
    delivered: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub message_id: String,
    pub player_id: String,
    pub player_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub message_type: ChatMessageType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatMessageType {
    Public, // lobby and day
    Mafia,  // night, mafia-aligned only
    System,
}

impl ChatMessageType {
    pub fn visible_to(self, role: Role) -> bool {
        match self {
            ChatMessageType::Mafia => role.is_mafia_aligned(),
            ChatMessageType::Public | ChatMessageType::System => true,
        }
    }
}

impl ChatLog {
    pub fn new(room_id: String) -> Self {
        ChatLog {
            room_id,
            messages: Vec::new(),
            delivered: 0,
        }
    }

    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > HISTORY_LIMIT {
            let overflow = self.messages.len() - HISTORY_LIMIT;
            self.messages.drain(..overflow);
            self.delivered = self.delivered.saturating_sub(overflow);
        }
    }

    pub fn add_system_message(&mut self, content: String) -> ChatMessage {
        let message = ChatMessage::system(content);
        self.add_message(message.clone());
        message
    }

    /// Lines added since the last call, oldest first.
    pub fn take_undelivered(&mut self) -> Vec<ChatMessage> {
        let fresh = self.messages[self.delivered..].to_vec();
        self.delivered = self.messages.len();
        fresh
    }

    pub fn visible_to(&self, role: Role) -> Vec<&ChatMessage> {
        self.messages
            .iter()
            .filter(|m| m.message_type.visible_to(role))
            .collect()
    }
}

impl ChatMessage {
    pub fn new(
        player_id: String,
        player_name: String,
        content: String,
        message_type: ChatMessageType,
    ) -> Self {
        ChatMessage {
            message_id: uuid::Uuid::new_v4().to_string(),
            player_id,
            player_name,
            content,
            timestamp: Utc::now(),
            message_type,
        }
    }

    pub fn system(content: String) -> Self {
        Self::new(
            "system".to_string(),
            "System".to_string(),
            content,
            ChatMessageType::System,
        )
    }
}
