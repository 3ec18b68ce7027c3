use crate::types::location::LocationQuery;
use crate::types::units::Units;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Cache key: case-folded location text plus unit system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    location: String,
    units: Units,
}

impl CacheKey {
    pub(crate) fn new(location: &LocationQuery, units: Units) -> Self {
        Self {
            location: location.cache_key(),
            units,
        }
    }
}

struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// Time-to-live cache for successful responses.
///
/// An entry older than the TTL is treated as absent and removed on lookup. Every insert
/// also drops all expired entries, so keys that are never queried again do not pile up.
pub(crate) struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) async fn get(&self, key: &CacheKey) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    pub(crate) async fn insert(&self, key: CacheKey, value: V) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub(crate) async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub(crate) async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
