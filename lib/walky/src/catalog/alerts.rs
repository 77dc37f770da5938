//! Campus alerts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use walky_core::{ContentType, RequestBody, Route};

use super::PageQuery;
use crate::api_client::Call;
use crate::models::{Alert, AlertSeverity, MessageEnvelope, Paginated};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/alerts`
pub const LIST: Route = Route::get("alertsList", "/api/alerts").secure();
/// `GET /api/alerts/active`
pub const ACTIVE: Route = Route::get("alertsActive", "/api/alerts/active").secure();
/// `POST /api/alerts`
pub const CREATE: Route = Route::post("alertsCreate", "/api/alerts").secure();
/// `PATCH /api/alerts/{alert_id}`
pub const UPDATE: Route = Route::patch("alertsUpdate", "/api/alerts/{alert_id}").secure();
/// `DELETE /api/alerts/{alert_id}`
pub const DELETE: Route = Route::delete("alertsDelete", "/api/alerts/{alert_id}").secure();
/// `POST /api/alerts/broadcast`
pub const BROADCAST: Route = Route::post("alertsBroadcast", "/api/alerts/broadcast")
    .secure()
    .content(ContentType::Text);

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[LIST, ACTIVE, CREATE, UPDATE, DELETE, BROADCAST];

/// Fields of an alert to create or patch; unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInput {
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Alert text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// How prominently it is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AlertSeverity>,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Whether it is currently in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// When it stops applying.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/alerts`
    pub async fn alerts_list(&self, query: &PageQuery) -> Result<Paginated<Alert>> {
        self.execute(Call::new(LIST).query(query)?).await
    }

    /// `GET /api/alerts/active` for the caller's campus.
    pub async fn alerts_active(&self) -> Result<Vec<Alert>> {
        self.execute(Call::new(ACTIVE)).await
    }

    /// `POST /api/alerts`
    pub async fn alerts_create(&self, input: &AlertInput) -> Result<MessageEnvelope<Alert>> {
        self.execute(Call::new(CREATE).json(input)?).await
    }

    /// `PATCH /api/alerts/{alert_id}`
    pub async fn alerts_update(
        &self,
        alert_id: &str,
        input: &AlertInput,
    ) -> Result<MessageEnvelope<Alert>> {
        self.execute(Call::new(UPDATE).path("alert_id", alert_id).json(input)?)
            .await
    }

    /// `DELETE /api/alerts/{alert_id}`
    pub async fn alerts_delete(&self, alert_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE).path("alert_id", alert_id)).await
    }

    /// `POST /api/alerts/broadcast` as `text/plain`.
    ///
    /// Strings are sent verbatim; any other value is sent as its JSON text.
    pub async fn alerts_broadcast<T: Serialize + ?Sized>(&self, message: &T) -> Result<MessageEnvelope> {
        let body = match serde_json::to_value(message)? {
            serde_json::Value::String(text) => RequestBody::Text(text),
            other => RequestBody::Json(other),
        };
        self.execute(Call::new(BROADCAST).body(body)).await
    }
}
