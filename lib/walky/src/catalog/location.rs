//! Live location sharing and location rooms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walky_core::Route;

use crate::api_client::Call;
use crate::models::{GeoPoint, MessageEnvelope};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/location/rooms`
pub const ROOMS_LIST: Route = Route::get("locationRoomsList", "/api/location/rooms").secure();
/// `POST /api/location/rooms/{room_id}/join`
pub const ROOMS_JOIN: Route =
    Route::post("locationRoomsJoin", "/api/location/rooms/{room_id}/join").secure();
/// `POST /api/location/rooms/{room_id}/leave`
pub const ROOMS_LEAVE: Route =
    Route::post("locationRoomsLeave", "/api/location/rooms/{room_id}/leave").secure();
/// `PUT /api/location`
pub const UPDATE: Route = Route::put("locationUpdate", "/api/location").secure();
/// `GET /api/location/nearby`
pub const NEARBY: Route = Route::get("locationNearby", "/api/location/nearby").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[ROOMS_LIST, ROOMS_JOIN, ROOMS_LEAVE, UPDATE, NEARBY];

/// A shared-location room, usually bound to an event or a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRoom {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Room label.
    pub name: String,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<String>,
    /// When it stops applying.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The caller's current position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationUpdate {
    /// Position to publish.
    pub location: GeoPoint,
    /// Meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Search for peers around a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearbyPeersQuery {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
}

/// A peer currently sharing a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPeer {
    /// Peer user id.
    pub user: String,
    /// Last published position.
    pub location: GeoPoint,
    /// Distance from the caller in metres.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/location/rooms`
    pub async fn location_rooms_list(&self) -> Result<Vec<LocationRoom>> {
        self.execute(Call::new(ROOMS_LIST)).await
    }

    /// `POST /api/location/rooms/{room_id}/join`
    pub async fn location_rooms_join(&self, room_id: &str) -> Result<MessageEnvelope<LocationRoom>> {
        self.execute(Call::new(ROOMS_JOIN).path("room_id", room_id)).await
    }

    /// `POST /api/location/rooms/{room_id}/leave`
    pub async fn location_rooms_leave(&self, room_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(ROOMS_LEAVE).path("room_id", room_id)).await
    }

    /// `PUT /api/location`
    pub async fn location_update(&self, update: &LocationUpdate) -> Result<MessageEnvelope> {
        self.execute(Call::new(UPDATE).json(update)?).await
    }

    /// `GET /api/location/nearby`
    pub async fn location_nearby(&self, query: &NearbyPeersQuery) -> Result<Vec<NearbyPeer>> {
        self.execute(Call::new(NEARBY).query(query)?).await
    }
}
