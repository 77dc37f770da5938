use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access across campuses.
    SuperAdmin,
    /// Administers one campus.
    CampusAdmin,
    /// Edits content.
    Editor,
    /// Handles reports and bans.
    Moderator,
    /// Campus staff.
    Staff,
    /// Read-only console access.
    Viewer,
    /// Regular app user.
    Student,
    /// Faculty member.
    Faculty,
    /// Parent account.
    Parent,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Self; 9] = [
        Self::SuperAdmin,
        Self::CampusAdmin,
        Self::Editor,
        Self::Moderator,
        Self::Staff,
        Self::Viewer,
        Self::Student,
        Self::Faculty,
        Self::Parent,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::CampusAdmin => "campus_admin",
            Self::Editor => "editor",
            Self::Moderator => "moderator",
            Self::Staff => "staff",
            Self::Viewer => "viewer",
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Parent => "parent",
        }
    }

    /// Whether the role may open the admin console.
    #[must_use]
    pub const fn is_console_role(self) -> bool {
        matches!(
            self,
            Self::SuperAdmin
                | Self::CampusAdmin
                | Self::Editor
                | Self::Moderator
                | Self::Staff
                | Self::Viewer
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a user's moderation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    /// Moderator-supplied reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Moderator id.
    #[serde(default)]
    pub banned_by: Option<String>,
    /// When the ban started.
    pub banned_at: DateTime<Utc>,
    /// `None` for permanent bans.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// When the ban was lifted early.
    #[serde(default)]
    pub lifted_at: Option<DateTime<Utc>>,
}

impl BanRecord {
    /// Whether this ban still applies at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.lifted_at.is_none() && self.expires_at.is_none_or(|expiry| now < expiry)
    }
}

/// Engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    /// Events organised.
    pub events_created: u32,
    /// Events attended.
    pub events_attended: u32,
    /// Spaces joined.
    pub spaces_joined: u32,
    /// Accepted peers.
    pub peers_count: u32,
    /// Walks finished.
    pub walks_completed: u32,
}

/// Attributes released by the campus identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamlAttributes {
    /// Persistent SAML `NameID`.
    pub name_id: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    pub given_name: Option<String>,
    /// Last name.
    pub surname: Option<String>,
    /// `eduPersonAffiliation` values (student, faculty, staff...).
    pub affiliation: Vec<String>,
    /// Identity provider entity id.
    pub issuer: Option<String>,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Public handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Profile text.
    #[serde(default)]
    pub bio: Option<String>,
    /// Campus id.
    #[serde(default)]
    pub campus: Option<String>,
    /// Access role.
    pub role: Role,
    /// Interest ids.
    #[serde(default)]
    pub interests: Vec<String>,

    /// Whether an active ban applies.
    #[serde(default)]
    pub is_banned: bool,
    /// Every ban, lifted or not.
    #[serde(default)]
    pub ban_history: Vec<BanRecord>,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
    /// When it was soft-deleted.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Why the account was deleted.
    #[serde(default)]
    pub deletion_reason: Option<String>,

    /// Accepted peer ids.
    #[serde(default)]
    pub peers: Vec<String>,
    /// Pending peer request ids.
    #[serde(default)]
    pub peers_pending: Vec<String>,
    /// Blocked user ids.
    #[serde(default)]
    pub peers_blocked: Vec<String>,

    /// Engagement counters.
    #[serde(default)]
    pub stats: UserStats,
    /// GeoJSON position.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// SSO attributes, for accounts created through SAML.
    #[serde(default)]
    pub saml: Option<SamlAttributes>,

    /// Creation time.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Neither banned nor soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_banned && !self.is_deleted
    }

    /// The ban currently in force, if any.
    #[must_use]
    pub fn active_ban(&self, now: DateTime<Utc>) -> Option<&BanRecord> {
        self.ban_history
            .iter()
            .rev()
            .find(|record| record.is_active_at(now))
    }

    /// Whether `user_id` is blocked by this user.
    #[must_use]
    pub fn has_blocked(&self, user_id: &str) -> bool {
        self.peers_blocked.iter().any(|id| id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn virtual_id_next_to_object_id() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "id": "u1",
            "name": "Ada",
            "email": "ada@mit.edu",
            "role": "student"
        }))
        .expect("user with both ids");

        assert_eq!(user.id, "u1");
    }

    #[test]
    fn role_wire_names() {
        for role in Role::ALL {
            let wire = serde_json::to_value(role).expect("serialize");
            assert_eq!(wire, json!(role.as_str()));
        }
        assert!(Role::Moderator.is_console_role());
        assert!(!Role::Student.is_console_role());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = serde_json::from_value::<Role>(json!("admin"));
        assert!(result.is_err());
    }

    #[test]
    fn minimal_user_document() {
        let user: User = serde_json::from_value(json!({
            "_id": "65f1c2a9e4b0a1b2c3d4e5f6",
            "name": "Ada",
            "email": "ada@mit.edu",
            "role": "student",
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .expect("user");

        assert_eq!(user.id, "65f1c2a9e4b0a1b2c3d4e5f6");
        assert!(user.is_active());
        assert_eq!(user.stats, UserStats::default());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn active_ban_respects_expiry_and_lifting() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).single().expect("date");
        let expired = BanRecord {
            reason: Some("spam".into()),
            banned_by: None,
            banned_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("date"),
            expires_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().expect("date")),
            lifted_at: None,
        };
        let permanent = BanRecord {
            reason: Some("harassment".into()),
            banned_by: Some("mod1".into()),
            banned_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).single().expect("date"),
            expires_at: None,
            lifted_at: None,
        };

        assert!(!expired.is_active_at(now));
        assert!(permanent.is_active_at(now));

        let lifted = BanRecord {
            lifted_at: Some(now),
            ..permanent.clone()
        };
        assert!(!lifted.is_active_at(now));
    }
}
