use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Greeting shown as the only message whenever the chat window is opened.
pub const GREETING_TEXT: &str = "👋 Hi! I'm your HireHub Assistant. How can I help you today?";

/// Inline bot message shown when a chatbot request fails.
pub const CONNECTION_ERROR_TEXT: &str = "Error: could not connect to the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Bot,
}

/// A single chat entry. Created once on send or reply receipt, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// The greeting entry appended on every chat-window open.
    pub fn greeting() -> Self {
        Self::bot(GREETING_TEXT)
    }
}
