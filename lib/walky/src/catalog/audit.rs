//! Audit trail of administrative actions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use walky_core::Route;

use crate::api_client::Call;
use crate::models::{AuditLog, Paginated, SuccessEnvelope};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /audit`
pub const LIST: Route = Route::get("auditList", "/audit").secure();
/// `GET /audit/{log_id}`
pub const DETAIL: Route = Route::get("auditDetail", "/audit/{log_id}").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[LIST, DETAIL];

/// Filters of the audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditQuery {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only entries by this user id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// Only this action, e.g. `user.ban`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Only entries at or after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /audit`
    pub async fn audit_list(&self, query: &AuditQuery) -> Result<Paginated<AuditLog>> {
        self.execute(Call::new(LIST).query(query)?).await
    }

    /// `GET /audit/{log_id}`
    pub async fn audit_detail(&self, log_id: &str) -> Result<SuccessEnvelope<AuditLog>> {
        self.execute(Call::new(DETAIL).path("log_id", log_id)).await
    }
}
