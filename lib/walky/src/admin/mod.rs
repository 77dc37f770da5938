//! Data layer of the admin console.
//!
//! Table screens keep a [`ListQuery`] per resource, fetch pages through the
//! catalog, cache them in a [`QueryCache`] and run row actions through a
//! [`ResourceMutation`], which invalidates the resource on success and
//! produces the [`Toast`] to show.

mod cache;
mod list;
mod mutation;

pub use cache::QueryCache;
pub use list::{
    DEFAULT_PAGE_SIZE, ListEnvelope, ListQuery, QueryKey, SortDirection, SortState, TablePage,
};
pub use mutation::{MutationAction, MutationOutcome, ResourceMutation, Toast, ToastKind};

/// Resource families with their own cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Events table.
    Events,
    /// Spaces table.
    Spaces,
    /// Users table.
    Users,
    /// Moderation queue.
    Reports,
    /// Campuses table.
    Campuses,
    /// Campus alerts.
    Alerts,
    /// Places sync jobs.
    SyncJobs,
}

impl Resource {
    /// Cache key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Spaces => "spaces",
            Self::Users => "users",
            Self::Reports => "reports",
            Self::Campuses => "campuses",
            Self::Alerts => "alerts",
            Self::SyncJobs => "sync-jobs",
        }
    }

    /// Singular noun used in toasts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Events => "event",
            Self::Spaces => "space",
            Self::Users => "user",
            Self::Reports => "report",
            Self::Campuses => "campus",
            Self::Alerts => "alert",
            Self::SyncJobs => "sync job",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
