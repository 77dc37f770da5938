//! Records exchanged with the backend.
//!
//! The backend owns every entity; these types only describe the wire shapes.
//! Ids are opaque strings, timestamps are ISO-8601 and every status field is a
//! closed enumeration.

mod alert;
mod audit;
mod campus;
mod chat;
mod envelope;
mod event;
mod geo;
mod invite;
mod place;
mod report;
mod space;
mod surprise;
mod user;

pub use alert::{Alert, AlertSeverity};
pub use audit::AuditLog;
pub use campus::{Ambassador, Campus, CampusInput, Interest};
pub use chat::{ChatMessage, Conversation};
pub use envelope::{MessageEnvelope, Paginated, SuccessEnvelope};
pub use event::{
    Event, EventInviteEntry, InviteeStatus, OwnerType, Participant, ParticipantStatus, Visibility,
};
pub use geo::GeoPoint;
pub use invite::{
    EventInvite, InviteStatus, PEER_REQUEST_TTL_DAYS, PeerRequest, PeerRequestStatus, WalkInvite,
};
pub use place::{Place, PlaceKind, SyncJob, SyncJobStatus};
pub use report::{Report, ReportReason, ReportStatus, ReportTarget};
pub use space::{CategoryRef, Space, SpaceCategory};
pub use surprise::{RollStatus, SurpriseRoll};
pub use user::{BanRecord, Role, SamlAttributes, User, UserStats};

pub use walky_core::ApiErrorBody;
