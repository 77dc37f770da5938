//! Security data and the worker that turns it into request configuration.
//!
//! The auth state is an explicit [`AuthContext`] handed to the client at
//! construction. Login and logout call [`AuthContext::set`] and
//! [`AuthContext::clear`]; every secure call reads the current value and
//! passes it to the configured [`SecurityWorker`].
//!
//! # Example
//!
//! ```
//! use walky_core::{AuthContext, SecurityData};
//!
//! let auth = AuthContext::new();
//! auth.set(SecurityData::new("jwt-token"));
//! assert!(auth.is_authenticated());
//!
//! auth.clear();
//! assert!(auth.get().is_none());
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use crate::RequestParams;

/// Opaque credential stored by the client, usually an access token.
#[derive(Clone, PartialEq, Eq)]
pub struct SecurityData(Arc<str>);

impl SecurityData {
    /// Wrap a credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::from(value.into()))
    }

    /// The raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecurityData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecurityData(***)")
    }
}

/// Shared, replaceable auth state.
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    data: Arc<RwLock<Option<SecurityData>>>,
}

impl AuthContext {
    /// Logged-out context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that starts logged in.
    #[must_use]
    pub fn with_data(data: SecurityData) -> Self {
        let context = Self::new();
        context.set(data);
        context
    }

    /// Replace the security data (login, token refresh).
    pub fn set(&self, data: SecurityData) {
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = Some(data);
    }

    /// Drop the security data (logout).
    pub fn clear(&self) {
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current security data.
    #[must_use]
    pub fn get(&self) -> Option<SecurityData> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether security data is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Future returned by a [`SecurityWorker`].
pub type WorkerFuture = Pin<Box<dyn Future<Output = Option<RequestParams>> + Send + 'static>>;

/// Turns the current security data into a request configuration fragment.
///
/// Invoked once per secure call. Returning `None` adds nothing.
///
/// Any `Fn(Option<SecurityData>) -> impl Future<Output = Option<RequestParams>>`
/// closure is a worker; synchronous logic can return `std::future::ready(..)`.
pub trait SecurityWorker: Send + Sync + 'static {
    /// Produce the fragment for one request.
    fn resolve(&self, data: Option<SecurityData>) -> WorkerFuture;
}

impl<F, Fut> SecurityWorker for F
where
    F: Fn(Option<SecurityData>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<RequestParams>> + Send + 'static,
{
    fn resolve(&self, data: Option<SecurityData>) -> WorkerFuture {
        Box::pin(self(data))
    }
}

/// Worker that sends the security data as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerWorker;

impl SecurityWorker for BearerWorker {
    fn resolve(&self, data: Option<SecurityData>) -> WorkerFuture {
        let fragment = data.map(|token| {
            RequestParams::new().header("Authorization", format!("Bearer {}", token.expose()))
        });
        Box::pin(std::future::ready(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_set_and_clear() {
        let auth = AuthContext::new();
        assert!(!auth.is_authenticated());

        auth.set(SecurityData::new("token-1"));
        assert_eq!(auth.get().map(|d| d.expose().to_string()).as_deref(), Some("token-1"));

        auth.clear();
        assert!(auth.get().is_none());
    }

    #[test]
    fn clones_share_state() {
        let auth = AuthContext::new();
        let handle = auth.clone();

        handle.set(SecurityData::new("shared"));

        assert!(auth.is_authenticated());
    }

    #[test]
    fn debug_hides_credential() {
        let data = SecurityData::new("secret-token");
        assert_eq!(format!("{data:?}"), "SecurityData(***)");
    }

    #[tokio::test]
    async fn bearer_worker_builds_header() {
        let fragment = BearerWorker
            .resolve(Some(SecurityData::new("abc")))
            .await
            .expect("fragment");

        assert_eq!(
            fragment.headers,
            [("Authorization".to_string(), "Bearer abc".to_string())]
        );
    }

    #[tokio::test]
    async fn bearer_worker_without_data_adds_nothing() {
        assert!(BearerWorker.resolve(None).await.is_none());
    }

    #[tokio::test]
    async fn closures_are_workers() {
        let worker = |data: Option<SecurityData>| {
            std::future::ready(data.map(|d| RequestParams::new().header("X-Api-Key", d.expose())))
        };

        let fragment = worker
            .resolve(Some(SecurityData::new("k")))
            .await
            .expect("fragment");
        assert_eq!(fragment.headers, [("X-Api-Key".to_string(), "k".to_string())]);
    }
}
