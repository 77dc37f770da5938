//! Liveness and readiness probes.

use serde::{Deserialize, Serialize};
use walky_core::Route;

use crate::api_client::Call;
use crate::{HttpClient, Result, WalkyApi};

/// `GET /health`
pub const HEALTH: Route = Route::get("health", "/health").public();
/// `GET /health/ready`
pub const READY: Route = Route::get("healthReady", "/health/ready").public();
/// `GET /health/db`
pub const DATABASE: Route = Route::get("healthDb", "/health/db").public();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[HEALTH, READY, DATABASE];

/// Answer of the health probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, `ready`, `connected`, or an error word.
    pub status: String,
    /// Seconds since the process started.
    #[serde(default)]
    pub uptime: Option<f64>,
    /// Backend version.
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Whether the probe reported a healthy state.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy" | "ready" | "connected")
    }
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus> {
        self.execute(Call::new(HEALTH)).await
    }

    /// `GET /health/ready`
    pub async fn health_ready(&self) -> Result<HealthStatus> {
        self.execute(Call::new(READY)).await
    }

    /// `GET /health/db`
    pub async fn health_db(&self) -> Result<HealthStatus> {
        self.execute(Call::new(DATABASE)).await
    }
}
