use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::OnceCell;

use super::{Invalidation, Mutation, QueryKey};
use crate::error::Result;

type Slot = Arc<OnceCell<Value>>;

/// Process-local cache of read results.
///
/// Entries never go stale on their own: they live until a mutation
/// invalidates them or the cache is cleared. Concurrent reads of the same
/// key share one fetch. Failed fetches leave nothing behind and are not
/// retried.
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Slot>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.entries().get(key).and_then(|slot| slot.get().cloned())
    }

    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.get(key).is_some()
    }

    pub fn set(&self, key: QueryKey, value: Value) {
        self.entries()
            .insert(key, Arc::new(OnceCell::new_with(Some(value))));
    }

    /// Drops `key`. Returns whether anything was cached or in flight for it.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let removed = self.entries().remove(key).is_some();
        if removed {
            tracing::debug!("cache invalidate {key}");
        }
        removed
    }

    pub fn invalidate_many<'a>(&self, keys: impl IntoIterator<Item = &'a QueryKey>) {
        for key in keys {
            self.invalidate(key);
        }
    }

    pub fn clear(&self) {
        self.entries().clear();
        tracing::debug!("cache cleared");
    }

    /// Applies the invalidation contract of a successful mutation.
    pub fn apply(&self, mutation: &Mutation) {
        match mutation.invalidates() {
            Invalidation::Keys(keys) => self.invalidate_many(&keys),
            Invalidation::All => self.clear(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serves `key` from the cache, or runs `fetch` and caches its result.
    ///
    /// A fetch whose key is invalidated while in flight still answers its own
    /// callers, but later reads start over.
    pub async fn fetch_with<F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let slot = {
            let mut entries = self.entries();
            Arc::clone(entries.entry(key.clone()).or_default())
        };

        if let Some(value) = slot.get() {
            tracing::debug!("cache hit {key}");
            return Ok(value.clone());
        }

        tracing::debug!("cache miss {key}");
        let result = slot.get_or_try_init(fetch).await.cloned();
        if result.is_err() {
            self.discard_if_empty(key, &slot);
        }
        result
    }

    fn discard_if_empty(&self, key: &QueryKey, slot: &Slot) {
        let mut entries = self.entries();
        if entries
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized())
        {
            entries.remove(key);
        }
    }
}
