use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of record a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    /// A user profile.
    User,
    /// An event.
    Event,
    /// A space.
    Space,
    /// An idea post.
    Idea,
    /// A chat message.
    Message,
    /// A peer relationship.
    Peers,
}

/// Review workflow: `pending -> under_review -> resolved | dismissed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Filed, not looked at yet.
    Pending,
    /// Picked up by a moderator.
    UnderReview,
    /// Action taken.
    Resolved,
    /// Closed without action.
    Dismissed,
}

impl ReportStatus {
    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::UnderReview)
                | (Self::UnderReview, Self::Resolved | Self::Dismissed)
        )
    }

    /// Resolved or dismissed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

/// A moderation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reporting user id.
    pub reporter: String,
    /// Kind of content reported.
    pub target_type: ReportTarget,
    /// Id of the reported content.
    pub target_id: String,
    /// Reason id or free text.
    pub reason: String,
    /// Free-form details.
    #[serde(default)]
    pub details: Option<String>,
    /// Review state.
    pub status: ReportStatus,
    /// Moderator user id.
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// Moderator note attached to the decision.
    #[serde(default)]
    pub resolution_note: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A selectable reason in the report form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReason {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reason shown to users.
    pub label: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Empty means every target kind.
    #[serde(default)]
    pub target_types: Vec<ReportTarget>,
    /// Whether it is currently in effect.
    #[serde(default = "enabled")]
    pub is_active: bool,
}

const fn enabled() -> bool {
    true
}

impl ReportReason {
    /// Whether the reason may be used for `target`.
    #[must_use]
    pub fn applies_to(&self, target: ReportTarget) -> bool {
        self.is_active && (self.target_types.is_empty() || self.target_types.contains(&target))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn review_workflow() {
        use ReportStatus::{Dismissed, Pending, Resolved, UnderReview};

        assert!(Pending.can_transition_to(UnderReview));
        assert!(UnderReview.can_transition_to(Resolved));
        assert!(UnderReview.can_transition_to(Dismissed));
        assert!(!Pending.can_transition_to(Resolved));
        assert!(!Resolved.can_transition_to(UnderReview));
        assert!(Dismissed.is_closed());
    }

    #[test]
    fn decodes_report() {
        let report: Report = serde_json::from_value(json!({
            "_id": "r1",
            "reporter": "u1",
            "targetType": "peers",
            "targetId": "u9",
            "reason": "spam",
            "status": "under_review",
            "createdAt": "2024-04-02T08:30:00.000Z"
        }))
        .expect("report");

        assert_eq!(report.target_type, ReportTarget::Peers);
        assert_eq!(report.status, ReportStatus::UnderReview);
    }

    #[test]
    fn reason_scope() {
        let reason: ReportReason = serde_json::from_value(json!({
            "_id": "rr1",
            "label": "Inappropriate image",
            "targetTypes": ["user", "space"]
        }))
        .expect("reason");

        assert!(reason.applies_to(ReportTarget::Space));
        assert!(!reason.applies_to(ReportTarget::Message));
    }
}
