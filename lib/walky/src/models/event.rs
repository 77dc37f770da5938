use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Who owns an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerType {
    /// Created by a user.
    #[serde(rename = "user", alias = "User")]
    User,
    /// Created on behalf of a space.
    #[serde(rename = "space", alias = "Space")]
    Space,
}

/// Who can see an event or space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Listed for the whole campus.
    #[default]
    Public,
    /// Visible to invitees and members only.
    Private,
}

/// Participation state of one attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    /// Attending.
    Accepted,
    /// Refused by the organiser.
    Rejected,
    /// Waiting for approval.
    Pending,
    /// Left after joining.
    Dropped,
}

/// Answer of an invited user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteeStatus {
    /// Confirmed attendance.
    Confirmed,
    /// Not answered yet.
    Pending,
    /// Declined.
    Notgoing,
}

/// A user taking part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// User id.
    pub user: String,
    /// Participation state.
    pub status: ParticipantStatus,
    /// When the user joined.
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

/// A user invited to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInviteEntry {
    /// User id.
    pub user: String,
    /// Answer to the invite.
    pub status: InviteeStatus,
    /// When the invite was sent.
    #[serde(default)]
    pub invited_at: Option<DateTime<Utc>>,
}

/// An event, owned by a user or a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// User or space id, depending on [`Event::owner_type`].
    pub owner: String,
    /// Whether `owner` is a user or a space.
    pub owner_type: OwnerType,
    /// Campus id.
    #[serde(default)]
    pub campus: Option<String>,
    /// Who can see it.
    #[serde(default)]
    pub visibility: Visibility,
    /// When it starts.
    pub start_time: DateTime<Utc>,
    /// When it ends, if known.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Human-readable venue name.
    #[serde(default)]
    pub venue: Option<String>,
    /// Where it takes place.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Maximum number of participants.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Participant user ids.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Invited users.
    #[serde(default)]
    pub invites: Vec<EventInviteEntry>,
    /// Whether moderators flagged it.
    #[serde(default)]
    pub is_flagged: bool,
    /// When it was soft-deleted.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Why it was deleted.
    #[serde(default)]
    pub delete_reason: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Soft-deleted events keep their document with `deletedAt` set.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Attendees whose participation was accepted.
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status == ParticipantStatus::Accepted)
            .count()
    }

    /// Whether accepted attendees fill the capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.accepted_count() >= capacity as usize)
    }

    /// Participation state of `user_id`.
    #[must_use]
    pub fn participant_status(&self, user_id: &str) -> Option<ParticipantStatus> {
        self.participants
            .iter()
            .find(|p| p.user == user_id)
            .map(|p| p.status)
    }

    /// Whether the event ended before `now`. Events without an end time end when they start.
    #[must_use]
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end_time.unwrap_or(self.start_time) < now
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Event {
        serde_json::from_value(json!({
            "_id": "evt1",
            "title": "Sunset walk",
            "owner": "space42",
            "ownerType": "Space",
            "visibility": "private",
            "startTime": "2024-06-01T18:00:00Z",
            "capacity": 2,
            "participants": [
                { "user": "u1", "status": "accepted" },
                { "user": "u2", "status": "dropped" },
                { "user": "u3", "status": "accepted" }
            ],
            "invites": [{ "user": "u4", "status": "notgoing" }],
            "deletedAt": null
        }))
        .expect("event")
    }

    #[test]
    fn decodes_backend_document() {
        let event = sample();
        assert_eq!(event.owner_type, OwnerType::Space);
        assert_eq!(event.visibility, Visibility::Private);
        assert_eq!(
            event.invites.first().map(|invite| invite.status),
            Some(InviteeStatus::Notgoing)
        );
        assert!(!event.is_deleted());
    }

    #[test]
    fn participant_helpers() {
        let event = sample();
        assert_eq!(event.accepted_count(), 2);
        assert!(event.is_full());
        assert_eq!(event.participant_status("u2"), Some(ParticipantStatus::Dropped));
        assert_eq!(event.participant_status("nobody"), None);
    }

    #[test]
    fn owner_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OwnerType::User).expect("json"), json!("user"));
    }
}
