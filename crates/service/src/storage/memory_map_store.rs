use std::{collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

/// Result of [`MemoryMapStore::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Generic in-memory key-value map shared between tasks.
///
/// Lives only as long as the process. Mutations that depend on the current
/// contents run under a single write guard.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert `value` only if `key` is vacant. The lookup and the insert share
    /// one write guard, so of several racing callers exactly one inserts.
    pub async fn insert_if_absent(&self, key: K, value: V) -> InsertOutcome {
        let mut map = self.inner.write().await;
        match map.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => InsertOutcome::AlreadyPresent,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                InsertOutcome::Inserted
            }
        }
    }

    /// Number of entries.
    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
