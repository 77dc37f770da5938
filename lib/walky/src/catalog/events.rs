//! Events, participation and event moderation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use walky_core::{ContentType, FileValue, FormFields, RequestBody, Route};

use super::ReasonBody;
use crate::admin::ListQuery;
use crate::api_client::Call;
use crate::models::{
    Event, GeoPoint, MessageEnvelope, Paginated, Participant, SuccessEnvelope, Visibility,
};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/events`
pub const LIST: Route = Route::get("eventsList", "/api/events").secure();
/// `GET /api/events/{event_id}`
pub const DETAIL: Route = Route::get("eventsDetail", "/api/events/{event_id}").secure();
/// `POST /api/events`
pub const CREATE: Route = Route::post("eventsCreate", "/api/events").secure();
/// `PATCH /api/events/{event_id}`
pub const UPDATE: Route = Route::patch("eventsUpdate", "/api/events/{event_id}").secure();
/// `DELETE /api/events/{event_id}`
pub const DELETE: Route = Route::delete("eventsDelete", "/api/events/{event_id}").secure();
/// `POST /api/events/{event_id}/image`
pub const UPLOAD_IMAGE: Route = Route::post("eventsUploadImage", "/api/events/{event_id}/image")
    .secure()
    .content(ContentType::FormData);
/// `POST /api/events/{event_id}/join`
pub const JOIN: Route = Route::post("eventsJoin", "/api/events/{event_id}/join").secure();
/// `POST /api/events/{event_id}/leave`
pub const LEAVE: Route = Route::post("eventsLeave", "/api/events/{event_id}/leave").secure();
/// `GET /api/events/{event_id}/participants`
pub const PARTICIPANTS: Route =
    Route::get("eventsParticipants", "/api/events/{event_id}/participants").secure();
/// `GET /api/events/nearby`
pub const NEARBY: Route = Route::get("eventsNearby", "/api/events/nearby").secure();
/// `GET /admin/events`
pub const ADMIN_LIST: Route = Route::get("adminEventsList", "/admin/events").secure();
/// `GET /admin/events/{event_id}`
pub const ADMIN_DETAIL: Route = Route::get("adminEventsDetail", "/admin/events/{event_id}").secure();
/// `POST /admin/events/{event_id}/flag`
pub const ADMIN_FLAG: Route = Route::post("adminEventsFlag", "/admin/events/{event_id}/flag").secure();
/// `POST /admin/events/{event_id}/unflag`
pub const ADMIN_UNFLAG: Route =
    Route::post("adminEventsUnflag", "/admin/events/{event_id}/unflag").secure();
/// `DELETE /admin/events/{event_id}`
pub const ADMIN_DELETE: Route =
    Route::delete("adminEventsDelete", "/admin/events/{event_id}").secure();
/// `POST /admin/events/{event_id}/restore`
pub const ADMIN_RESTORE: Route =
    Route::post("adminEventsRestore", "/admin/events/{event_id}/restore").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    LIST,
    DETAIL,
    CREATE,
    UPDATE,
    DELETE,
    UPLOAD_IMAGE,
    JOIN,
    LEAVE,
    PARTICIPANTS,
    NEARBY,
    ADMIN_LIST,
    ADMIN_DETAIL,
    ADMIN_FLAG,
    ADMIN_UNFLAG,
    ADMIN_DELETE,
    ADMIN_RESTORE,
];

/// Filters of the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventListQuery {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Space id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    /// Include events that already ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_past: Option<bool>,
}

/// Options of the event detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventDetailQuery {
    /// Include events that already ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_past: Option<bool>,
}

/// Search around a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearbyQuery {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

/// Body for creating an event; updates send the same shape with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Space id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    /// Who can see it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// When it starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// When it ends, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Human-readable venue name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Where it takes place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// Maximum number of participants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/events`
    pub async fn events_list(&self, query: &EventListQuery) -> Result<Paginated<Event>> {
        self.execute(Call::new(LIST).query(query)?).await
    }

    /// `GET /api/events/{event_id}`
    pub async fn events_detail(&self, event_id: &str, query: &EventDetailQuery) -> Result<Event> {
        self.execute(Call::new(DETAIL).path("event_id", event_id).query(query)?)
            .await
    }

    /// `POST /api/events`
    pub async fn events_create(&self, input: &EventInput) -> Result<MessageEnvelope<Event>> {
        self.execute(Call::new(CREATE).json(input)?).await
    }

    /// `PATCH /api/events/{event_id}`
    pub async fn events_update(
        &self,
        event_id: &str,
        input: &EventInput,
    ) -> Result<MessageEnvelope<Event>> {
        self.execute(Call::new(UPDATE).path("event_id", event_id).json(input)?)
            .await
    }

    /// `DELETE /api/events/{event_id}`
    pub async fn events_delete(&self, event_id: &str, body: &ReasonBody) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE).path("event_id", event_id).json(body)?)
            .await
    }

    /// `POST /api/events/{event_id}/image` (multipart)
    pub async fn events_upload_image(
        &self,
        event_id: &str,
        image: FileValue,
    ) -> Result<MessageEnvelope<Event>> {
        let form = FormFields::new().file("image", image);
        self.execute(
            Call::new(UPLOAD_IMAGE)
                .path("event_id", event_id)
                .body(RequestBody::Fields(form)),
        )
        .await
    }

    /// `POST /api/events/{event_id}/join`
    pub async fn events_join(&self, event_id: &str) -> Result<MessageEnvelope<Participant>> {
        self.execute(Call::new(JOIN).path("event_id", event_id)).await
    }

    /// `POST /api/events/{event_id}/leave`
    pub async fn events_leave(&self, event_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(LEAVE).path("event_id", event_id)).await
    }

    /// `GET /api/events/{event_id}/participants`
    pub async fn events_participants(
        &self,
        event_id: &str,
    ) -> Result<SuccessEnvelope<Vec<Participant>>> {
        self.execute(Call::new(PARTICIPANTS).path("event_id", event_id))
            .await
    }

    /// `GET /api/events/nearby`
    pub async fn events_nearby(&self, query: &NearbyQuery) -> Result<Vec<Event>> {
        self.execute(Call::new(NEARBY).query(query)?).await
    }

    /// `GET /admin/events`
    pub async fn admin_events_list(&self, query: &ListQuery) -> Result<Paginated<Event>> {
        self.execute(Call::new(ADMIN_LIST).query_pairs(query.query_pairs()))
            .await
    }

    /// `GET /admin/events/{event_id}`, including soft-deleted events.
    pub async fn admin_events_detail(&self, event_id: &str) -> Result<SuccessEnvelope<Event>> {
        self.execute(Call::new(ADMIN_DETAIL).path("event_id", event_id))
            .await
    }

    /// `POST /admin/events/{event_id}/flag`
    pub async fn admin_events_flag(
        &self,
        event_id: &str,
        body: &ReasonBody,
    ) -> Result<MessageEnvelope<Event>> {
        self.execute(Call::new(ADMIN_FLAG).path("event_id", event_id).json(body)?)
            .await
    }

    /// `POST /admin/events/{event_id}/unflag`
    pub async fn admin_events_unflag(&self, event_id: &str) -> Result<MessageEnvelope<Event>> {
        self.execute(Call::new(ADMIN_UNFLAG).path("event_id", event_id))
            .await
    }

    /// `DELETE /admin/events/{event_id}` (soft delete)
    pub async fn admin_events_delete(
        &self,
        event_id: &str,
        body: &ReasonBody,
    ) -> Result<MessageEnvelope> {
        self.execute(Call::new(ADMIN_DELETE).path("event_id", event_id).json(body)?)
            .await
    }

    /// `POST /admin/events/{event_id}/restore`
    pub async fn admin_events_restore(&self, event_id: &str) -> Result<MessageEnvelope<Event>> {
        self.execute(Call::new(ADMIN_RESTORE).path("event_id", event_id))
            .await
    }
}
