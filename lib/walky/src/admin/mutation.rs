//! Row actions: run a mutation, invalidate, toast.

use std::future::Future;

use walky_core::ErrorKind;

use super::{QueryCache, Resource};
use crate::Result;

/// What a row action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    /// Create a record.
    Create,
    /// Edit a record.
    Update,
    /// Delete a record.
    Delete,
    /// Flag content for review.
    Flag,
    /// Clear a flag.
    Unflag,
    /// Ban a user.
    Ban,
    /// Lift a ban.
    Unban,
    /// Undo a soft delete.
    Restore,
    /// Move a space to another category.
    EditCategory,
}

impl MutationAction {
    const fn past(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
            Self::Flag => "flagged",
            Self::Unflag => "unflagged",
            Self::Ban => "banned",
            Self::Unban => "unbanned",
            Self::Restore => "restored",
            Self::EditCategory => "moved to the new category",
        }
    }

    const fn gerund(self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
            Self::Flag => "flagging",
            Self::Unflag => "unflagging",
            Self::Ban => "banning",
            Self::Unban => "unbanning",
            Self::Restore => "restoring",
            Self::EditCategory => "changing the category of",
        }
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    /// Green.
    Success,
    /// Red.
    Error,
}

/// Transient notification shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub kind: ToastKind,
    /// Text.
    pub message: String,
}

impl Toast {
    /// Success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// Whether this reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, ToastKind::Success)
    }
}

/// Result of [`ResourceMutation::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<T> {
    /// Notification to display.
    pub toast: Toast,
    /// Endpoint result on success.
    pub value: Option<T>,
    /// Classification of the failure.
    pub error: Option<ErrorKind>,
}

/// One mutation helper for every table.
///
/// On success the resource's cached pages are invalidated so the table
/// refetches. On failure the error is logged and a generic toast is
/// returned; nothing is retried.
///
/// ```ignore
/// let outcome = ResourceMutation::new(&cache, Resource::Events, MutationAction::Delete)
///     .run(api.admin_events_delete(&event.id))
///     .await;
/// show(outcome.toast);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceMutation<'a> {
    cache: &'a QueryCache,
    resource: Resource,
    action: MutationAction,
    success: Option<String>,
    failure: Option<String>,
}

impl<'a> ResourceMutation<'a> {
    /// Helper for `action` on `resource`.
    #[must_use]
    pub const fn new(cache: &'a QueryCache, resource: Resource, action: MutationAction) -> Self {
        Self {
            cache,
            resource,
            action,
            success: None,
            failure: None,
        }
    }

    /// Replace the default success message.
    #[must_use]
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }

    /// Replace the default error message.
    #[must_use]
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn success_text(&self) -> String {
        self.success.clone().unwrap_or_else(|| {
            let label = self.resource.label();
            let mut text = format!("{label} {} successfully", self.action.past());
            if let Some(first) = text.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            text
        })
    }

    fn failure_text(&self) -> String {
        self.failure.clone().unwrap_or_else(|| {
            format!("Error {} {}", self.action.gerund(), self.resource.label())
        })
    }

    /// Await `mutation` and settle the screen state.
    pub async fn run<T, F>(&self, mutation: F) -> MutationOutcome<T>
    where
        F: Future<Output = Result<T>>,
    {
        match mutation.await {
            Ok(value) => {
                self.cache.invalidate(self.resource);
                MutationOutcome {
                    toast: Toast::success(self.success_text()),
                    value: Some(value),
                    error: None,
                }
            }
            Err(err) => {
                tracing::error!(
                    resource = %self.resource,
                    action = ?self.action,
                    kind = %err.kind(),
                    error = %err,
                    "mutation failed"
                );
                MutationOutcome {
                    toast: Toast::error(self.failure_text()),
                    value: None,
                    error: Some(err.kind()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::admin::{ListQuery, QueryKey};

    #[tokio::test]
    async fn success_invalidates_and_toasts() {
        let cache = QueryCache::new();
        cache.insert(ListQuery::new().key(Resource::Events), vec![1, 2]);
        cache.insert(ListQuery::new().key(Resource::Users), vec![3]);

        let outcome = ResourceMutation::new(&cache, Resource::Events, MutationAction::Delete)
            .run(async { Ok("done") })
            .await;

        assert_eq!(outcome.toast, Toast::success("Event deleted successfully"));
        assert_eq!(outcome.value, Some("done"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn failure_keeps_cache_and_shows_generic_error() {
        let cache = QueryCache::new();
        let key = QueryKey::detail(Resource::Spaces, "sp1");
        cache.insert(key.clone(), "cached");

        let outcome = ResourceMutation::new(&cache, Resource::Spaces, MutationAction::Flag)
            .run(async { Err::<(), _>(Error::http(403, "Forbidden")) })
            .await;

        assert_eq!(outcome.toast, Toast::error("Error flagging space"));
        assert_eq!(outcome.error, Some(ErrorKind::Auth));
        assert_eq!(cache.get::<&str>(&key), Some("cached"));
    }

    #[tokio::test]
    async fn custom_messages() {
        let cache = QueryCache::new();
        let mutation = ResourceMutation::new(&cache, Resource::Users, MutationAction::Ban)
            .success_message("Banned")
            .error_message("Could not ban");

        let ok = mutation.run(async { Ok(()) }).await;
        assert!(ok.toast.is_success());
        assert_eq!(ok.toast.message, "Banned");

        let failed = mutation.run(async { Err::<(), _>(Error::Timeout) }).await;
        assert_eq!(failed.toast.message, "Could not ban");
    }
}
