//! In-process result cache
//!
//! This module keeps recent analysis results so the same URL analyzed with
//! the same options is not fetched again within the freshness window:
//! - `ResultCache`: key to timestamped snapshot, with size-triggered eviction
//! - `spawn_sweeper`: periodic removal of old entries
//!
//! Lookups and writes hold the lock for one map operation only, never across
//! an `.await`.

mod entry;
mod sweeper;

pub use entry::CacheEntry;
pub use sweeper::spawn_sweeper;

use crate::analysis::{AnalysisOptions, AnalysisResult};
use crate::config::CacheConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use url::Url;

/// Builds the cache key of an analysis: normalized URL and options
pub fn cache_key(url: &Url, options: &AnalysisOptions) -> String {
    format!("{}-{}", url, options.cache_fragment())
}

/// Bounded, time-aware cache of analysis results
pub struct ResultCache<T = AnalysisResult> {
    state: Mutex<CacheState<T>>,
    freshness: Duration,
    max_entries: usize,
    eviction_batch: usize,
}

struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    /// Keys from oldest to newest write
    order: VecDeque<String>,
}

impl<T: Clone> ResultCache<T> {
    /// Creates an empty cache with the given limits
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            freshness: config.freshness(),
            max_entries: config.max_entries,
            eviction_batch: config.eviction_batch,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the cached value if it is still fresh
    ///
    /// Expired entries are treated as misses but stay until swept or replaced.
    pub fn get(&self, key: &str) -> Option<T> {
        let state = self.lock();
        let entry = state.entries.get(key)?;
        if entry.is_fresh(self.freshness) {
            Some(entry.data.clone())
        } else {
            tracing::debug!("Cache entry expired ({}s old): {}", entry.age().as_secs(), key);
            None
        }
    }

    /// Stores a value, replacing any previous entry for the key
    ///
    /// When the entry count exceeds the maximum, the oldest writes are evicted.
    pub fn put(&self, key: impl Into<String>, data: T) {
        let key = key.into();
        let mut state = self.lock();

        if state.entries.contains_key(&key) {
            state.order.retain(|existing| existing != &key);
        }
        state.order.push_back(key.clone());
        state.entries.insert(key.clone(), CacheEntry::new(key, data));

        if state.entries.len() > self.max_entries {
            let mut evicted = 0;
            while evicted < self.eviction_batch {
                let Some(oldest) = state.order.pop_front() else {
                    break;
                };
                state.entries.remove(&oldest);
                evicted += 1;
            }
            tracing::debug!(
                "Cache over {} entries, evicted {} oldest",
                self.max_entries,
                evicted
            );
        }
    }

    /// Removes every entry
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes entries older than `max_age` and returns how many were removed
    pub fn sweep_expired(&self, max_age: Duration) -> usize {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.age() <= max_age);

        let CacheState { entries, order } = &mut *state;
        order.retain(|key| entries.contains_key(key));

        before - entries.len()
    }

    #[cfg(test)]
    fn backdate(&self, key: &str, by: chrono::Duration) {
        if let Some(entry) = self.lock().entries.get_mut(key) {
            entry.created_at = entry.created_at - by;
        }
    }
}
