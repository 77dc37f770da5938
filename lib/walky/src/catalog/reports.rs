//! Content reports and their review workflow.

use serde::Serialize;
use walky_core::Route;

use crate::admin::ListQuery;
use crate::api_client::Call;
use crate::models::{
    MessageEnvelope, Paginated, Report, ReportReason, ReportStatus, ReportTarget, SuccessEnvelope,
};
use crate::{Error, HttpClient, Result, WalkyApi};

/// `POST /api/reports`
pub const CREATE: Route = Route::post("reportsCreate", "/api/reports").secure();
/// `GET /api/reports/mine`
pub const MINE: Route = Route::get("reportsMine", "/api/reports/mine").secure();
/// `GET /admin/reports`
pub const ADMIN_LIST: Route = Route::get("adminReportsList", "/admin/reports").secure();
/// `GET /admin/reports/{report_id}`
pub const ADMIN_DETAIL: Route = Route::get("adminReportsDetail", "/admin/reports/{report_id}").secure();
/// `PATCH /admin/reports/{report_id}/status`
pub const ADMIN_UPDATE_STATUS: Route =
    Route::patch("adminReportsUpdateStatus", "/admin/reports/{report_id}/status").secure();
/// `GET /api/report-reasons`
pub const REASONS_LIST: Route = Route::get("reportReasonsList", "/api/report-reasons").secure();
/// `POST /admin/report-reasons`
pub const REASONS_CREATE: Route =
    Route::post("adminReportReasonsCreate", "/admin/report-reasons").secure();
/// `PATCH /admin/report-reasons/{reason_id}`
pub const REASONS_UPDATE: Route =
    Route::patch("adminReportReasonsUpdate", "/admin/report-reasons/{reason_id}").secure();
/// `DELETE /admin/report-reasons/{reason_id}`
pub const REASONS_DELETE: Route =
    Route::delete("adminReportReasonsDelete", "/admin/report-reasons/{reason_id}").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    CREATE,
    MINE,
    ADMIN_LIST,
    ADMIN_DETAIL,
    ADMIN_UPDATE_STATUS,
    REASONS_LIST,
    REASONS_CREATE,
    REASONS_UPDATE,
    REASONS_DELETE,
];

/// A report filed by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    /// Kind of content reported.
    pub target_type: ReportTarget,
    /// Id of the reported content.
    pub target_id: String,
    /// Reason id.
    pub reason: String,
    /// Free-form details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Moderator decision on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Status to move to.
    pub status: ReportStatus,
    /// Moderator note attached to the decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_note: Option<String>,
}

/// Fields of a report reason to create or patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonInput {
    /// Reason shown to users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Content kinds this reason applies to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target_types: Vec<ReportTarget>,
    /// Whether it is currently in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `POST /api/reports`
    pub async fn reports_create(&self, input: &ReportInput) -> Result<MessageEnvelope<Report>> {
        self.execute(Call::new(CREATE).json(input)?).await
    }

    /// `GET /api/reports/mine`
    pub async fn reports_mine(&self) -> Result<Vec<Report>> {
        self.execute(Call::new(MINE)).await
    }

    /// `GET /admin/reports`
    pub async fn admin_reports_list(&self, query: &ListQuery) -> Result<Paginated<Report>> {
        self.execute(Call::new(ADMIN_LIST).query_pairs(query.query_pairs()))
            .await
    }

    /// `GET /admin/reports/{report_id}`
    pub async fn admin_reports_detail(&self, report_id: &str) -> Result<SuccessEnvelope<Report>> {
        self.execute(Call::new(ADMIN_DETAIL).path("report_id", report_id))
            .await
    }

    /// `PATCH /admin/reports/{report_id}/status`
    pub async fn admin_reports_update_status(
        &self,
        report_id: &str,
        update: &StatusUpdate,
    ) -> Result<MessageEnvelope<Report>> {
        self.execute(
            Call::new(ADMIN_UPDATE_STATUS)
                .path("report_id", report_id)
                .json(update)?,
        )
        .await
    }

    /// Move `report` to `next`, refusing transitions the review workflow forbids.
    pub async fn admin_reports_transition(
        &self,
        report: &Report,
        next: ReportStatus,
        note: Option<String>,
    ) -> Result<MessageEnvelope<Report>> {
        if !report.status.can_transition_to(next) {
            return Err(Error::invalid_request(format!(
                "report {} cannot move from {} to {}",
                report.id,
                report.status.as_str(),
                next.as_str()
            )));
        }
        let update = StatusUpdate {
            status: next,
            resolution_note: note,
        };
        self.admin_reports_update_status(&report.id, &update).await
    }

    /// `GET /api/report-reasons`
    pub async fn report_reasons_list(&self) -> Result<Vec<ReportReason>> {
        self.execute(Call::new(REASONS_LIST)).await
    }

    /// `POST /admin/report-reasons`
    pub async fn admin_report_reasons_create(
        &self,
        input: &ReasonInput,
    ) -> Result<MessageEnvelope<ReportReason>> {
        self.execute(Call::new(REASONS_CREATE).json(input)?).await
    }

    /// `PATCH /admin/report-reasons/{reason_id}`
    pub async fn admin_report_reasons_update(
        &self,
        reason_id: &str,
        input: &ReasonInput,
    ) -> Result<MessageEnvelope<ReportReason>> {
        self.execute(
            Call::new(REASONS_UPDATE)
                .path("reason_id", reason_id)
                .json(input)?,
        )
        .await
    }

    /// `DELETE /admin/report-reasons/{reason_id}`
    pub async fn admin_report_reasons_delete(&self, reason_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(REASONS_DELETE).path("reason_id", reason_id))
            .await
    }
}
