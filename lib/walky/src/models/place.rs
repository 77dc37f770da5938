use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Level in the places hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    /// Top level.
    Country,
    /// State, province or region.
    Region,
    /// City or town.
    City,
    /// A single venue.
    Venue,
}

/// A node of the places hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Level in the hierarchy.
    pub kind: PlaceKind,
    /// Parent place id; `None` for countries.
    #[serde(default)]
    pub parent: Option<String>,
    /// Centre point.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Identifier in the upstream provider the sync jobs import from.
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Lifecycle of a sync job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncJobStatus {
    /// Waiting for a worker.
    Queued,
    /// In progress.
    Running,
    /// Finished successfully.
    Completed,
    /// Stopped on an error.
    Failed,
    /// Stopped by an admin.
    Cancelled,
}

impl SyncJobStatus {
    /// Whether the job will not change any more.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// A places import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncJob {
    /// Backend object id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Upstream data source.
    pub source: String,
    /// Current job state.
    pub status: SyncJobStatus,
    /// Records processed so far.
    #[serde(default)]
    pub processed: u64,
    /// Records to process, when known.
    #[serde(default)]
    pub total: Option<u64>,
    /// Failure message, if any.
    #[serde(default)]
    pub error: Option<String>,
    /// When the job started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the job ended.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl SyncJob {
    /// Completion in percent, when the total is known.
    #[must_use]
    pub fn progress(&self) -> Option<u8> {
        let total = self.total.filter(|total| *total > 0)?;
        let percent = self.processed.min(total) * 100 / total;
        u8::try_from(percent).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(processed: u64, total: Option<u64>) -> SyncJob {
        SyncJob {
            id: "job1".into(),
            source: "geonames".into(),
            status: SyncJobStatus::Running,
            processed,
            total,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    #[test]
    fn progress_percent() {
        assert_eq!(job(50, Some(200)).progress(), Some(25));
        assert_eq!(job(500, Some(200)).progress(), Some(100));
        assert_eq!(job(5, None).progress(), None);
        assert_eq!(job(5, Some(0)).progress(), None);
    }

    #[test]
    fn finished_states() {
        assert!(SyncJobStatus::Failed.is_finished());
        assert!(!SyncJobStatus::Queued.is_finished());
    }
}
