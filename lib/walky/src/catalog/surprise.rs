//! Surprise matchmaking.

use serde::{Deserialize, Serialize};
use walky_core::Route;

use super::PageQuery;
use crate::api_client::Call;
use crate::models::{MessageEnvelope, Paginated, SuccessEnvelope, SurpriseRoll};
use crate::{HttpClient, Result, WalkyApi};

/// `POST /api/surprise/roll`
pub const ROLL: Route = Route::post("surpriseRoll", "/api/surprise/roll").secure();
/// `GET /api/surprise/history`
pub const HISTORY: Route = Route::get("surpriseHistory", "/api/surprise/history").secure();
/// `POST /api/surprise/{roll_id}/accept`
pub const ACCEPT: Route = Route::post("surpriseAccept", "/api/surprise/{roll_id}/accept").secure();
/// `POST /api/surprise/{roll_id}/skip`
pub const SKIP: Route = Route::post("surpriseSkip", "/api/surprise/{roll_id}/skip").secure();
/// `GET /admin/surprise/stats`
pub const ADMIN_STATS: Route = Route::get("adminSurpriseStats", "/admin/surprise/stats").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[ROLL, HISTORY, ACCEPT, SKIP, ADMIN_STATS];

/// What a roll may suggest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RollKind {
    /// A peer or an event.
    #[default]
    Any,
    /// Peers only.
    Peer,
    /// Events only.
    Event,
}

/// Body of a roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RollRequest {
    /// What to roll for.
    pub kind: RollKind,
}

/// Roll counters for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurpriseStats {
    /// Rolls made.
    pub total_rolls: u64,
    /// Rolls accepted.
    pub accepted: u64,
    /// Rolls skipped.
    pub skipped: u64,
    /// Rolls that expired unanswered.
    pub expired: u64,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `POST /api/surprise/roll`
    pub async fn surprise_roll(&self, kind: RollKind) -> Result<SurpriseRoll> {
        self.execute(Call::new(ROLL).json(&RollRequest { kind })?).await
    }

    /// `GET /api/surprise/history`
    pub async fn surprise_history(&self, query: &PageQuery) -> Result<Paginated<SurpriseRoll>> {
        self.execute(Call::new(HISTORY).query(query)?).await
    }

    /// `POST /api/surprise/{roll_id}/accept`
    pub async fn surprise_accept(&self, roll_id: &str) -> Result<MessageEnvelope<SurpriseRoll>> {
        self.execute(Call::new(ACCEPT).path("roll_id", roll_id)).await
    }

    /// `POST /api/surprise/{roll_id}/skip`
    pub async fn surprise_skip(&self, roll_id: &str) -> Result<MessageEnvelope<SurpriseRoll>> {
        self.execute(Call::new(SKIP).path("roll_id", roll_id)).await
    }

    /// `GET /admin/surprise/stats`
    pub async fn admin_surprise_stats(&self) -> Result<SuccessEnvelope<SurpriseStats>> {
        self.execute(Call::new(ADMIN_STATS)).await
    }
}
