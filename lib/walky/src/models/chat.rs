use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Conversation id.
    pub conversation: String,
    /// Sender user id.
    pub sender: String,
    /// Message text.
    pub body: String,
    /// User ids that have read it.
    #[serde(default)]
    pub read_by: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A direct conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Participant user ids.
    pub participants: Vec<String>,
    /// Most recent message, if any.
    #[serde(default)]
    pub last_message: Option<ChatMessage>,
    /// Messages the caller has not read.
    #[serde(default)]
    pub unread_count: u32,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
