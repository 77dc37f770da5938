use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One administrative action recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Acting user id.
    pub actor: String,
    /// e.g. `user.ban`, `event.delete`.
    pub action: String,
    /// Resource kind touched.
    pub resource: String,
    /// Id of the resource touched.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Arbitrary extra attributes.
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Client IP address.
    #[serde(default)]
    pub ip: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
