//! Directed requests between two users.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Days after which an unanswered peer request counts as expired.
pub const PEER_REQUEST_TTL_DAYS: i64 = 7;

/// Status of a walk or event invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    /// Awaiting an answer.
    Pending,
    /// Accepted by the recipient.
    Accepted,
    /// Declined by the recipient.
    Rejected,
    /// Withdrawn by the sender.
    Cancelled,
}

impl InviteStatus {
    /// Only pending invites move, and only to a terminal state.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted | Self::Rejected | Self::Cancelled)
        )
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Status of a peer request.
///
/// `Expired` is never stored; see [`PeerRequest::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerRequestStatus {
    /// Awaiting an answer.
    Pending,
    /// Accepted; both users are now peers.
    Accepted,
    /// Declined by the recipient.
    Rejected,
    /// Withdrawn by the sender.
    Cancelled,
    /// Not answered within seven days.
    Expired,
}

impl PeerRequestStatus {
    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Pending,
                Self::Accepted | Self::Rejected | Self::Cancelled | Self::Expired
            )
        )
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A request to become peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerRequest {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Sender user id.
    pub from: String,
    /// Recipient user id.
    pub to: String,
    /// Current workflow status.
    pub status: PeerRequestStatus,
    /// Optional note from the sender.
    #[serde(default)]
    pub message: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// When the recipient answered.
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}

impl PeerRequest {
    /// When a still-pending request stops being answerable.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + TimeDelta::days(PEER_REQUEST_TTL_DAYS)
    }

    /// Stored status, with pending requests older than the TTL reported as expired.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<Utc>) -> PeerRequestStatus {
        if self.status == PeerRequestStatus::Pending && now >= self.expires_at() {
            PeerRequestStatus::Expired
        } else {
            self.status
        }
    }
}

/// An invitation to walk together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInvite {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Sender user id.
    pub from: String,
    /// Recipient user id.
    pub to: String,
    /// Current workflow status.
    pub status: InviteStatus,
    /// Optional note from the sender.
    #[serde(default)]
    pub message: Option<String>,
    /// Where to meet.
    #[serde(default)]
    pub meeting_point: Option<GeoPoint>,
    /// Planned start.
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An invitation to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInvite {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Event id.
    pub event: String,
    /// Sender user id.
    pub from: String,
    /// Recipient user id.
    pub to: String,
    /// Current workflow status.
    pub status: InviteStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn request(status: PeerRequestStatus) -> PeerRequest {
        PeerRequest {
            id: "pr1".into(),
            from: "u1".into(),
            to: "u2".into(),
            status,
            message: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("date"),
            responded_at: None,
        }
    }

    #[test]
    fn pending_request_expires_after_seven_days() {
        let pending = request(PeerRequestStatus::Pending);
        let day_six = pending.created_at + TimeDelta::days(6);
        let day_seven = pending.created_at + TimeDelta::days(7);

        assert_eq!(pending.effective_status(day_six), PeerRequestStatus::Pending);
        assert_eq!(pending.effective_status(day_seven), PeerRequestStatus::Expired);
    }

    #[test]
    fn answered_request_never_expires() {
        let accepted = request(PeerRequestStatus::Accepted);
        let much_later = accepted.created_at + TimeDelta::days(365);
        assert_eq!(accepted.effective_status(much_later), PeerRequestStatus::Accepted);
    }

    #[test]
    fn invite_transitions() {
        assert!(InviteStatus::Pending.can_transition_to(InviteStatus::Accepted));
        assert!(InviteStatus::Pending.can_transition_to(InviteStatus::Cancelled));
        assert!(!InviteStatus::Accepted.can_transition_to(InviteStatus::Rejected));
        assert!(!InviteStatus::Pending.can_transition_to(InviteStatus::Pending));
        assert!(InviteStatus::Rejected.is_terminal());
    }

    #[test]
    fn peer_request_transitions() {
        assert!(PeerRequestStatus::Pending.can_transition_to(PeerRequestStatus::Expired));
        assert!(!PeerRequestStatus::Expired.can_transition_to(PeerRequestStatus::Accepted));
    }
}
