//! In-memory query cache.
//!
//! Entries are keyed by [`QueryKey`]. Invalidation marks entries stale and
//! never removes their data, so a view keeps showing the last result while
//! it refetches. Subscribers hear about invalidations through a broadcast
//! channel.
//!
//! A fetch only marks its result fresh if nothing touched the entry while
//! it ran. Each entry carries a generation that `invalidate` and `set`
//! bump, and the whole cache carries an epoch that `clear` bumps. A result
//! whose generation moved is stored stale; a result from an older epoch is
//! dropped.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{RwLock, broadcast};

use super::key::{KeyPrefix, QueryKey};
use crate::error::ClientResult;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last successful result; kept through errors and invalidation.
    pub data: Option<Value>,
    pub fetched_at: DateTime<Utc>,
    pub stale: bool,
    pub status: QueryStatus,
    generation: u64,
}

impl CacheEntry {
    fn loading(generation: u64) -> Self {
        Self {
            data: None,
            fetched_at: Utc::now(),
            stale: true,
            status: QueryStatus::Loading,
            generation,
        }
    }

    fn success(data: Value, generation: u64) -> Self {
        Self {
            data: Some(data),
            fetched_at: Utc::now(),
            stale: false,
            status: QueryStatus::Success,
            generation,
        }
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        if self.stale || self.status != QueryStatus::Success || self.data.is_none() {
            return false;
        }
        match (Utc::now() - self.fetched_at).to_std() {
            Ok(age) => age < stale_time,
            // Clock went backwards.
            Err(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Invalidated(KeyPrefix),
    Cleared,
}

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<QueryKey, CacheEntry>,
    epoch: u64,
}

/// Where an in-flight fetch started.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    epoch: u64,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    store: Arc<RwLock<Store>>,
    events: broadcast::Sender<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            events,
        }
    }

    /// Serve `key` from cache when fresh, otherwise run `fetcher` and store
    /// its result.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, stale_time: Duration, fetcher: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let ticket = {
            let mut store = self.store.write().await;
            let epoch = store.epoch;
            let generation = match store.entries.get_mut(key) {
                Some(entry) if entry.is_fresh(stale_time) => {
                    if let Some(data) = entry.data.clone() {
                        tracing::debug!(%key, "query cache hit");
                        return Ok(serde_json::from_value(data)?);
                    }
                    entry.generation
                }
                Some(entry) => {
                    entry.status = QueryStatus::Loading;
                    entry.generation
                }
                None => {
                    store.entries.insert(key.clone(), CacheEntry::loading(0));
                    0
                }
            };
            Ticket { epoch, generation }
        };
        tracing::debug!(%key, "query cache miss");

        match fetcher().await {
            Ok(value) => {
                let data = serde_json::to_value(&value)?;
                self.store_result(key, ticket, data).await;
                Ok(value)
            }
            Err(err) => {
                let mut store = self.store.write().await;
                if store.epoch == ticket.epoch {
                    if let Some(entry) = store.entries.get_mut(key) {
                        entry.status = QueryStatus::Error(err.to_string());
                    }
                }
                Err(err)
            }
        }
    }

    async fn store_result(&self, key: &QueryKey, ticket: Ticket, data: Value) {
        let mut store = self.store.write().await;
        if store.epoch != ticket.epoch {
            tracing::debug!(%key, "dropping result fetched before the cache was cleared");
            return;
        }
        match store.entries.get_mut(key) {
            Some(entry) if entry.generation == ticket.generation => {
                *entry = CacheEntry::success(data, ticket.generation);
            }
            Some(entry) => {
                tracing::debug!(%key, "query invalidated while fetching; result kept stale");
                entry.data = Some(data);
                entry.fetched_at = Utc::now();
                entry.status = QueryStatus::Success;
                entry.stale = true;
            }
            None => {
                store.entries.insert(key.clone(), CacheEntry::success(data, ticket.generation));
            }
        }
    }

    /// Cached data for `key`, without fetching. Stale data is still returned.
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> ClientResult<Option<T>> {
        let data = self
            .store
            .read()
            .await
            .entries
            .get(key)
            .and_then(|e| e.data.clone());
        match data {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    pub async fn entry(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.store.read().await.entries.get(key).cloned()
    }

    /// Prime `key` with a successful result.
    pub async fn set<T: Serialize>(&self, key: &QueryKey, value: &T) -> ClientResult<()> {
        let data = serde_json::to_value(value)?;
        let mut store = self.store.write().await;
        let generation = store
            .entries
            .get(key)
            .map_or(0, |e| e.generation.wrapping_add(1));
        store.entries.insert(key.clone(), CacheEntry::success(data, generation));
        Ok(())
    }

    /// Mark every entry under `prefix` stale. Returns how many matched.
    pub async fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        let mut count = 0;
        for (key, entry) in self.store.write().await.entries.iter_mut() {
            if prefix.matches(key) {
                entry.stale = true;
                entry.generation = entry.generation.wrapping_add(1);
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "invalidated queries");
        let _ = self.events.send(CacheEvent::Invalidated(*prefix));
        count
    }

    /// Invalidate every prefix before returning.
    pub async fn invalidate_all(&self, prefixes: &[KeyPrefix]) -> usize {
        let mut total = 0;
        for prefix in prefixes {
            total += self.invalidate(prefix).await;
        }
        total
    }

    /// Drop every entry. Fetches still in flight will not repopulate it.
    pub async fn clear(&self) {
        {
            let mut store = self.store.write().await;
            store.entries.clear();
            store.epoch = store.epoch.wrapping_add(1);
        }
        let _ = self.events.send(CacheEvent::Cleared);
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.entries.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }
}
