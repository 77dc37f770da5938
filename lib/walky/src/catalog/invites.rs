//! Peer requests, event invites, walk invites and realtime invite delivery.
//!
//! Every invite kind follows the same lifecycle: only a pending invite can be
//! answered or cancelled, and the answer is final. The backend rejects any
//! other transition with 409; [`InviteStatus::can_transition_to`] lets a
//! screen hide the buttons up front.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walky_core::Route;

use crate::api_client::Call;
use crate::models::{
    EventInvite, GeoPoint, InviteStatus, MessageEnvelope, PeerRequest, PeerRequestStatus,
    WalkInvite,
};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/peers/requests`
pub const PEERS_REQUESTS: Route = Route::get("peersRequests", "/api/peers/requests").secure();
/// `POST /api/peers/requests`
pub const PEERS_SEND: Route = Route::post("peersSend", "/api/peers/requests").secure();
/// `POST /api/peers/requests/{request_id}/respond`
pub const PEERS_RESPOND: Route =
    Route::post("peersRespond", "/api/peers/requests/{request_id}/respond").secure();
/// `DELETE /api/peers/requests/{request_id}`
pub const PEERS_CANCEL: Route =
    Route::delete("peersCancel", "/api/peers/requests/{request_id}").secure();
/// `POST /api/peers/{user_id}/block`
pub const PEERS_BLOCK: Route = Route::post("peersBlock", "/api/peers/{user_id}/block").secure();
/// `DELETE /api/peers/{user_id}/block`
pub const PEERS_UNBLOCK: Route =
    Route::delete("peersUnblock", "/api/peers/{user_id}/block").secure();
/// `DELETE /api/peers/{user_id}`
pub const PEERS_REMOVE: Route = Route::delete("peersRemove", "/api/peers/{user_id}").secure();
/// `GET /api/events/invites`
pub const EVENT_INVITES_LIST: Route =
    Route::get("eventInvitesList", "/api/events/invites").secure();
/// `POST /api/events/{event_id}/invites`
pub const EVENT_INVITES_SEND: Route =
    Route::post("eventInvitesSend", "/api/events/{event_id}/invites").secure();
/// `POST /api/events/invites/{invite_id}/respond`
pub const EVENT_INVITES_RESPOND: Route =
    Route::post("eventInvitesRespond", "/api/events/invites/{invite_id}/respond").secure();
/// `GET /api/walks/invites`
pub const WALK_INVITES_LIST: Route = Route::get("walkInvitesList", "/api/walks/invites").secure();
/// `POST /api/walks/invites`
pub const WALK_INVITES_SEND: Route = Route::post("walkInvitesSend", "/api/walks/invites").secure();
/// `POST /api/walks/invites/{invite_id}/respond`
pub const WALK_INVITES_RESPOND: Route =
    Route::post("walkInvitesRespond", "/api/walks/invites/{invite_id}/respond").secure();
/// `DELETE /api/walks/invites/{invite_id}`
pub const WALK_INVITES_CANCEL: Route =
    Route::delete("walkInvitesCancel", "/api/walks/invites/{invite_id}").secure();
/// `GET /api/realtime/invites/pending`
pub const REALTIME_PENDING: Route =
    Route::get("realtimeInvitesPending", "/api/realtime/invites/pending").secure();
/// `POST /api/realtime/invites/{invite_id}/ack`
pub const REALTIME_ACK: Route =
    Route::post("realtimeInvitesAck", "/api/realtime/invites/{invite_id}/ack").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    PEERS_REQUESTS,
    PEERS_SEND,
    PEERS_RESPOND,
    PEERS_CANCEL,
    PEERS_BLOCK,
    PEERS_UNBLOCK,
    PEERS_REMOVE,
    EVENT_INVITES_LIST,
    EVENT_INVITES_SEND,
    EVENT_INVITES_RESPOND,
    WALK_INVITES_LIST,
    WALK_INVITES_SEND,
    WALK_INVITES_RESPOND,
    WALK_INVITES_CANCEL,
    REALTIME_PENDING,
    REALTIME_ACK,
];

/// Which side of a request to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Requests sent to the caller.
    #[default]
    Incoming,
    /// Requests sent by the caller.
    Outgoing,
}

/// Filters of an invite inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InboxQuery {
    /// Which side of the inbox to list.
    pub direction: Direction,
    /// Only this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InviteStatus>,
}

/// Accept or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    /// Accept the invite or request.
    Accept,
    /// Turn it down.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct AnswerBody {
    action: Answer,
}

/// A peer request to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerRequestInput {
    /// Recipient user id.
    pub to: String,
    /// Optional note shown to the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Invites for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventInviteInput {
    /// Invited user ids.
    pub users: Vec<String>,
}

/// A walk invite to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkInviteInput {
    /// Recipient user id.
    pub to: String,
    /// Optional note shown to the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Where to meet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<GeoPoint>,
    /// Planned start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// An invite waiting to be pushed to a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeInvite {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// `walk`, `event` or `peer`.
    pub kind: String,
    /// Sender user id.
    pub from: String,
    /// Event, walk or request id the invite points at.
    #[serde(default)]
    pub reference: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/peers/requests`
    ///
    /// Stored statuses are returned as is; use
    /// [`PeerRequest::effective_status`] to age out stale requests.
    pub async fn peers_requests(&self, direction: Direction) -> Result<Vec<PeerRequest>> {
        let query = InboxQuery {
            direction,
            status: None,
        };
        self.execute(Call::new(PEERS_REQUESTS).query(&query)?).await
    }

    /// `POST /api/peers/requests`
    pub async fn peers_send(&self, input: &PeerRequestInput) -> Result<MessageEnvelope<PeerRequest>> {
        self.execute(Call::new(PEERS_SEND).json(input)?).await
    }

    /// `POST /api/peers/requests/{request_id}/respond`
    pub async fn peers_respond(
        &self,
        request_id: &str,
        answer: Answer,
    ) -> Result<MessageEnvelope<PeerRequest>> {
        self.execute(
            Call::new(PEERS_RESPOND)
                .path("request_id", request_id)
                .json(&AnswerBody { action: answer })?,
        )
        .await
    }

    /// `DELETE /api/peers/requests/{request_id}`
    pub async fn peers_cancel(&self, request_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(PEERS_CANCEL).path("request_id", request_id))
            .await
    }

    /// `POST /api/peers/{user_id}/block`
    pub async fn peers_block(&self, user_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(PEERS_BLOCK).path("user_id", user_id)).await
    }

    /// `DELETE /api/peers/{user_id}/block`
    pub async fn peers_unblock(&self, user_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(PEERS_UNBLOCK).path("user_id", user_id))
            .await
    }

    /// `DELETE /api/peers/{user_id}`
    pub async fn peers_remove(&self, user_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(PEERS_REMOVE).path("user_id", user_id)).await
    }

    /// `GET /api/events/invites`
    pub async fn event_invites_list(&self, query: &InboxQuery) -> Result<Vec<EventInvite>> {
        self.execute(Call::new(EVENT_INVITES_LIST).query(query)?).await
    }

    /// `POST /api/events/{event_id}/invites`
    pub async fn event_invites_send(
        &self,
        event_id: &str,
        input: &EventInviteInput,
    ) -> Result<MessageEnvelope<Vec<EventInvite>>> {
        self.execute(
            Call::new(EVENT_INVITES_SEND)
                .path("event_id", event_id)
                .json(input)?,
        )
        .await
    }

    /// `POST /api/events/invites/{invite_id}/respond`
    pub async fn event_invites_respond(
        &self,
        invite_id: &str,
        answer: Answer,
    ) -> Result<MessageEnvelope<EventInvite>> {
        self.execute(
            Call::new(EVENT_INVITES_RESPOND)
                .path("invite_id", invite_id)
                .json(&AnswerBody { action: answer })?,
        )
        .await
    }

    /// `GET /api/walks/invites`
    pub async fn walk_invites_list(&self, query: &InboxQuery) -> Result<Vec<WalkInvite>> {
        self.execute(Call::new(WALK_INVITES_LIST).query(query)?).await
    }

    /// `POST /api/walks/invites`
    pub async fn walk_invites_send(
        &self,
        input: &WalkInviteInput,
    ) -> Result<MessageEnvelope<WalkInvite>> {
        self.execute(Call::new(WALK_INVITES_SEND).json(input)?).await
    }

    /// `POST /api/walks/invites/{invite_id}/respond`
    pub async fn walk_invites_respond(
        &self,
        invite_id: &str,
        answer: Answer,
    ) -> Result<MessageEnvelope<WalkInvite>> {
        self.execute(
            Call::new(WALK_INVITES_RESPOND)
                .path("invite_id", invite_id)
                .json(&AnswerBody { action: answer })?,
        )
        .await
    }

    /// `DELETE /api/walks/invites/{invite_id}`
    pub async fn walk_invites_cancel(&self, invite_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(WALK_INVITES_CANCEL).path("invite_id", invite_id))
            .await
    }

    /// `GET /api/realtime/invites/pending`
    pub async fn realtime_invites_pending(&self) -> Result<Vec<RealtimeInvite>> {
        self.execute(Call::new(REALTIME_PENDING)).await
    }

    /// `POST /api/realtime/invites/{invite_id}/ack`
    pub async fn realtime_invites_ack(&self, invite_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(REALTIME_ACK).path("invite_id", invite_id))
            .await
    }
}

impl Answer {
    /// Status a pending invite moves to.
    #[must_use]
    pub const fn invite_status(self) -> InviteStatus {
        match self {
            Self::Accept => InviteStatus::Accepted,
            Self::Reject => InviteStatus::Rejected,
        }
    }

    /// Status a pending peer request moves to.
    #[must_use]
    pub const fn peer_status(self) -> PeerRequestStatus {
        match self {
            Self::Accept => PeerRequestStatus::Accepted,
            Self::Reject => PeerRequestStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_valid_transitions_from_pending() {
        for answer in [Answer::Accept, Answer::Reject] {
            assert!(InviteStatus::Pending.can_transition_to(answer.invite_status()));
            assert!(PeerRequestStatus::Pending.can_transition_to(answer.peer_status()));
            assert!(!InviteStatus::Accepted.can_transition_to(answer.invite_status()));
        }
    }

    #[test]
    fn inbox_query_encodes_lowercase() {
        let pairs = walky_core::to_query_pairs(&InboxQuery {
            direction: Direction::Outgoing,
            status: Some(InviteStatus::Pending),
        })
        .expect("query");
        assert_eq!(
            pairs,
            [
                ("direction".to_string(), "outgoing".to_string()),
                ("status".to_string(), "pending".to_string()),
            ]
        );
    }
}
