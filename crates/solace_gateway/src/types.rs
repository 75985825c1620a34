use serde::{Deserialize, Serialize};
use solace_core::{MoodState, SentimentReport};

/// Inbound chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: String,
    /// Conversation to continue. Omitted means the shared default session.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Mood after the turn was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub score: i32,
    pub state: MoodState,
}

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message as received.
    pub user: String,
    pub bot: String,
    pub sentiment: SentimentReport,
    pub mood: MoodSnapshot,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}
