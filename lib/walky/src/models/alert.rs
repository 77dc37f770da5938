use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an alert is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational banner.
    #[default]
    Info,
    /// Highlighted banner.
    Warning,
    /// Blocking banner.
    Critical,
}

/// A banner shown to users of one campus or of every campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Alert text.
    pub message: String,
    /// How prominently it is shown.
    #[serde(default)]
    pub severity: AlertSeverity,
    /// `None` targets every campus.
    #[serde(default)]
    pub campus: Option<String>,
    /// Whether it is currently in effect.
    #[serde(default)]
    pub is_active: bool,
    /// When it stops applying.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
