//! Dashboard counters and analytics exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use walky_core::{ResponseFormat, Route};

use crate::api_client::Call;
use crate::models::SuccessEnvelope;
use crate::{HttpClient, Result, WalkyApi};

/// `GET /analytics/overview`
pub const OVERVIEW: Route = Route::get("analyticsOverview", "/analytics/overview").secure();
/// `GET /analytics/users`
pub const USERS: Route = Route::get("analyticsUsers", "/analytics/users").secure();
/// `GET /analytics/events`
pub const EVENTS: Route = Route::get("analyticsEvents", "/analytics/events").secure();
/// `GET /admin/dashboard`
pub const DASHBOARD: Route = Route::get("adminDashboard", "/admin/dashboard").secure();
/// `GET /admin/dashboard/campuses/{campus_id}`
pub const CAMPUS_DASHBOARD: Route =
    Route::get("adminCampusDashboard", "/admin/dashboard/campuses/{campus_id}").secure();
/// `GET /admin/analytics/export`
pub const EXPORT: Route = Route::get("adminAnalyticsExport", "/admin/analytics/export")
    .secure()
    .format(ResponseFormat::Text);

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[OVERVIEW, USERS, EVENTS, DASHBOARD, CAMPUS_DASHBOARD, EXPORT];

/// Reporting window; both ends inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeQuery {
    /// First day included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
}

/// Query of the analytics export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportQuery {
    /// e.g. `users`, `events`, `reports`.
    pub dataset: String,
    /// File format.
    pub format: ExportFormat,
    /// Date range and campus filter.
    #[serde(flatten)]
    pub range: RangeQuery,
}

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    /// Registered accounts.
    pub total_users: u64,
    /// Accounts seen in the selected range.
    pub active_users: u64,
    /// Events ever created.
    pub total_events: u64,
    /// Events that have not started yet.
    pub upcoming_events: u64,
    /// Spaces ever created.
    pub total_spaces: u64,
    /// Reports still pending or under review.
    pub open_reports: u64,
}

/// One point of a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Day of the sample.
    pub date: NaiveDate,
    /// Value for that day.
    pub count: u64,
}

/// Counters for the admin home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Headline counters.
    #[serde(flatten)]
    pub overview: Overview,
    /// Events flagged by moderators.
    pub flagged_events: u64,
    /// Spaces flagged by moderators.
    pub flagged_spaces: u64,
    /// Accounts currently banned.
    pub banned_users: u64,
    /// Daily sign-ups.
    pub signups: Vec<SeriesPoint>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /analytics/overview`
    pub async fn analytics_overview(&self, range: &RangeQuery) -> Result<Overview> {
        self.execute(Call::new(OVERVIEW).query(range)?).await
    }

    /// `GET /analytics/users`
    pub async fn analytics_users(&self, range: &RangeQuery) -> Result<Vec<SeriesPoint>> {
        self.execute(Call::new(USERS).query(range)?).await
    }

    /// `GET /analytics/events`
    pub async fn analytics_events(&self, range: &RangeQuery) -> Result<Vec<SeriesPoint>> {
        self.execute(Call::new(EVENTS).query(range)?).await
    }

    /// `GET /admin/dashboard`
    pub async fn admin_dashboard(&self) -> Result<SuccessEnvelope<DashboardStats>> {
        self.execute(Call::new(DASHBOARD)).await
    }

    /// `GET /admin/dashboard/campuses/{campus_id}`
    pub async fn admin_campus_dashboard(
        &self,
        campus_id: &str,
    ) -> Result<SuccessEnvelope<DashboardStats>> {
        self.execute(Call::new(CAMPUS_DASHBOARD).path("campus_id", campus_id))
            .await
    }

    /// `GET /admin/analytics/export`, returning the file contents.
    pub async fn admin_analytics_export(&self, query: &ExportQuery) -> Result<String> {
        self.execute(Call::new(EXPORT).query(query)?).await
    }
}
