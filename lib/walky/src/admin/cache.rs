//! In-memory query cache keyed by [`QueryKey`].

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use super::{QueryKey, Resource};
use crate::Result;

type Entry = Arc<dyn Any + Send + Sync>;

/// Cached fetch results, shared between screens.
///
/// Cloning yields another handle to the same cache. Values are stored
/// type-erased; reading with the wrong type is a miss.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl QueryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`.
    #[must_use]
    pub fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.lock().get(key).cloned()?;
        entry.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn insert<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.lock().insert(key, Arc::new(value));
    }

    /// Cached value, or the result of `fetch` which is then cached.
    ///
    /// Errors are returned as-is and nothing is cached.
    pub async fn get_or_fetch<T, F>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.get::<T>(&key) {
            tracing::trace!(resource = %key.resource(), "query cache hit");
            return Ok(cached);
        }

        let value = fetch.await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Drop every entry of `resource`; returns how many were removed.
    pub fn invalidate(&self, resource: Resource) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.resource() != resource);
        let removed = before - entries.len();
        tracing::debug!(%resource, removed, "invalidated cached queries");
        removed
    }

    /// Drop everything, e.g. on logout.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
