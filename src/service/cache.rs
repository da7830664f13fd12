use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, Utc};
use log::debug;
use tokio::sync::RwLock;

pub const DEFAULT_TTL_HOURS: i64 = 24;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    pub key: K,
    pub payload: V,
    pub fetched_at: DateTime<Utc>,
}

/// TTL-bounded store of fetched payloads.
///
/// Entries are never evicted; a stale entry stays readable through [`ResponseCache::peek`]
/// until a successful refresh overwrites it. Failed fetches are never stored.
pub struct ResponseCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<K, V>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> Clone for ResponseCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    /// Returns the payload only while it is fresh.
    pub async fn get(&self, key: &K) -> Option<V> {
        let cache = self.entries.read().await;
        let entry = cache.get(key)?;
        self.is_entry_fresh(entry).then(|| entry.payload.clone())
    }

    /// Returns the stored entry whether fresh or not.
    pub async fn peek(&self, key: &K) -> Option<CacheEntry<K, V>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn is_fresh(&self, key: &K) -> bool {
        let cache = self.entries.read().await;
        cache.get(key).is_some_and(|entry| self.is_entry_fresh(entry))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn put(&self, key: K, payload: V) {
        self.put_at(key, payload, self.clock.now()).await;
    }

    /// Stores `payload` as fetched at `fetched_at`. An entry fetched later is kept.
    async fn put_at(&self, key: K, payload: V, fetched_at: DateTime<Utc>) {
        let mut cache = self.entries.write().await;
        if let Some(existing) = cache.get(&key) {
            if existing.fetched_at > fetched_at {
                debug!("Dropping outdated fetch for {:?}", key);
                return;
            }
        }

        cache.insert(
            key.clone(),
            CacheEntry {
                key,
                payload,
                fetched_at,
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Serves a fresh payload, otherwise runs `fetch` and stores its result on success.
    /// The stored entry is stamped with the time the fetch started.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(payload) = self.get(&key).await {
            debug!("Cache hit for {:?}", key);
            return Ok(payload);
        }

        let started = self.clock.now();
        let payload = fetch().await?;
        self.put_at(key, payload.clone(), started).await;
        Ok(payload)
    }

    fn is_entry_fresh(&self, entry: &CacheEntry<K, V>) -> bool {
        let age = self.clock.now().signed_duration_since(entry.fetched_at);
        age < self.ttl
    }
}
