use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a surprise roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollStatus {
    /// Shown, not answered.
    Pending,
    /// Taken up by the user.
    Accepted,
    /// Dismissed by the user.
    Skipped,
    /// Not answered in time.
    Expired,
}

/// A matchmaking suggestion produced by a surprise roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurpriseRoll {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// User who rolled.
    pub user: String,
    /// Suggested peer, if the roll matched a person.
    #[serde(default)]
    pub matched_user: Option<String>,
    /// Suggested event, if the roll matched an event.
    #[serde(default)]
    pub matched_event: Option<String>,
    /// Interests both sides share.
    #[serde(default)]
    pub shared_interests: Vec<String>,
    /// Answer state.
    pub status: RollStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
