use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use super::QueryKey;

/// A cached query result.
///
/// `fetched_at`/`last_used` drive staleness and eviction; `updated_at` is
/// wall-clock time for display only.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub fetched_at: Instant,
    pub last_used: Instant,
    pub updated_at: DateTime<Utc>,
    pub stale_time: Duration,
    pub gc_time: Duration,
    generation: u64,
    invalidated: bool,
}

impl<T> CacheEntry<T> {
    pub fn is_stale(&self, now: Instant, stale_time: Duration) -> bool {
        self.invalidated || now.saturating_duration_since(self.fetched_at) >= stale_time
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_used) >= self.gc_time
    }
}

/// Snapshot of a query for display
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: T,
    pub updated_at: DateTime<Utc>,
    pub is_stale: bool,
}

impl<T> QueryState<T> {
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.updated_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else {
            format!("{}h ago", minutes / 60)
        }
    }
}

/// Keyed store behind `QueryClient`. Time is always passed in so the
/// rules stay independent of the clock.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, CacheEntry<T>>,
    next_generation: u64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            next_generation: 0,
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry, fresh or stale, and mark it used
    pub fn touch(&mut self, key: &QueryKey, now: Instant) -> Option<&CacheEntry<T>> {
        let entry = self.entries.get_mut(key)?;
        entry.last_used = now;
        Some(entry)
    }

    pub fn peek(&self, key: &QueryKey) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Reserve a generation number for a fetch that is about to start
    pub fn begin_fetch(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Store a fetch result. Returns false when a fetch that started later
    /// has already written this key; the older result is dropped.
    pub fn store(
        &mut self,
        key: QueryKey,
        data: T,
        generation: u64,
        stale_time: Duration,
        gc_time: Duration,
        now: Instant,
    ) -> bool {
        if let Some(existing) = self.entries.get(&key) {
            if existing.generation > generation {
                return false;
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                data,
                fetched_at: now,
                last_used: now,
                updated_at: Utc::now(),
                stale_time,
                gc_time,
                generation,
                invalidated: false,
            },
        );
        true
    }

    /// Mark every entry under `prefix` stale. Returns how many were marked.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        count
    }

    pub fn remove(&mut self, key: &QueryKey) -> Option<T> {
        self.entries.remove(key).map(|entry| entry.data)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Evict entries unused for longer than their retention window.
    /// Returns the number evicted.
    pub fn collect_garbage(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
