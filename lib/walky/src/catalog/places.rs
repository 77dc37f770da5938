//! Places hierarchy and the admin import jobs that fill it.

use serde::Serialize;
use walky_core::Route;

use super::PageQuery;
use crate::api_client::Call;
use crate::models::{MessageEnvelope, Paginated, Place, SuccessEnvelope, SyncJob};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/places/countries`
pub const COUNTRIES: Route = Route::get("placesCountries", "/api/places/countries").public();
/// `GET /api/places/countries/{country_id}/regions`
pub const REGIONS: Route =
    Route::get("placesRegions", "/api/places/countries/{country_id}/regions").public();
/// `GET /api/places/regions/{region_id}/cities`
pub const CITIES: Route =
    Route::get("placesCities", "/api/places/regions/{region_id}/cities").public();
/// `GET /api/places/{place_id}`
pub const DETAIL: Route = Route::get("placesDetail", "/api/places/{place_id}").public();
/// `GET /api/places/search`
pub const SEARCH: Route = Route::get("placesSearch", "/api/places/search").public();
/// `GET /admin/sync/jobs`
pub const SYNC_JOBS_LIST: Route = Route::get("adminSyncJobsList", "/admin/sync/jobs").secure();
/// `POST /admin/sync/jobs`
pub const SYNC_JOBS_START: Route = Route::post("adminSyncJobsStart", "/admin/sync/jobs").secure();
/// `GET /admin/sync/jobs/{job_id}`
pub const SYNC_JOBS_DETAIL: Route =
    Route::get("adminSyncJobsDetail", "/admin/sync/jobs/{job_id}").secure();
/// `POST /admin/sync/jobs/{job_id}/cancel`
pub const SYNC_JOBS_CANCEL: Route =
    Route::post("adminSyncJobsCancel", "/admin/sync/jobs/{job_id}/cancel").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    COUNTRIES,
    REGIONS,
    CITIES,
    DETAIL,
    SEARCH,
    SYNC_JOBS_LIST,
    SYNC_JOBS_START,
    SYNC_JOBS_DETAIL,
    SYNC_JOBS_CANCEL,
];

/// Place search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceSearchQuery {
    /// Search text.
    pub q: String,
    /// Country id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Starts a sync job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncJobInput {
    /// Upstream provider, e.g. `geonames`.
    pub source: String,
    /// Restrict the import to these country codes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/places/countries`
    pub async fn places_countries(&self) -> Result<Vec<Place>> {
        self.execute(Call::new(COUNTRIES)).await
    }

    /// `GET /api/places/countries/{country_id}/regions`
    pub async fn places_regions(&self, country_id: &str) -> Result<Vec<Place>> {
        self.execute(Call::new(REGIONS).path("country_id", country_id)).await
    }

    /// `GET /api/places/regions/{region_id}/cities`
    pub async fn places_cities(&self, region_id: &str) -> Result<Vec<Place>> {
        self.execute(Call::new(CITIES).path("region_id", region_id)).await
    }

    /// `GET /api/places/{place_id}`
    pub async fn places_detail(&self, place_id: &str) -> Result<Place> {
        self.execute(Call::new(DETAIL).path("place_id", place_id)).await
    }

    /// `GET /api/places/search`
    pub async fn places_search(&self, query: &PlaceSearchQuery) -> Result<Vec<Place>> {
        self.execute(Call::new(SEARCH).query(query)?).await
    }

    /// `GET /admin/sync/jobs`
    pub async fn admin_sync_jobs_list(&self, query: &PageQuery) -> Result<Paginated<SyncJob>> {
        self.execute(Call::new(SYNC_JOBS_LIST).query(query)?).await
    }

    /// `POST /admin/sync/jobs`
    pub async fn admin_sync_jobs_start(&self, input: &SyncJobInput) -> Result<MessageEnvelope<SyncJob>> {
        self.execute(Call::new(SYNC_JOBS_START).json(input)?).await
    }

    /// `GET /admin/sync/jobs/{job_id}`
    pub async fn admin_sync_jobs_detail(&self, job_id: &str) -> Result<SuccessEnvelope<SyncJob>> {
        self.execute(Call::new(SYNC_JOBS_DETAIL).path("job_id", job_id))
            .await
    }

    /// `POST /admin/sync/jobs/{job_id}/cancel`; finished jobs answer 409.
    pub async fn admin_sync_jobs_cancel(&self, job_id: &str) -> Result<MessageEnvelope<SyncJob>> {
        self.execute(Call::new(SYNC_JOBS_CANCEL).path("job_id", job_id))
            .await
    }
}
