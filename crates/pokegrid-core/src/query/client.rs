use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::cache::{QueryCache, QueryState};
use super::{QueryKey, QueryPolicy};

/// A fetch that any number of callers can await. The error is behind an
/// `Arc` because `Shared` hands out clones of the output.
type SharedFetch<T> = Shared<BoxFuture<'static, Result<T, Arc<anyhow::Error>>>>;

/// Error handed to callers that joined a failed fetch started by someone else
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct SharedError(Arc<anyhow::Error>);

struct InFlight<T> {
    generation: u64,
    future: SharedFetch<T>,
}

struct Inner<T> {
    cache: QueryCache<T>,
    in_flight: HashMap<QueryKey, InFlight<T>>,
}

/// Shared query cache with fetch-through, retry and superseding.
/// Concurrent fetches of one key share a single request.
/// Clone is cheap - all clones share the same cache.
pub struct QueryClient<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for QueryClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for QueryClient<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                cache: QueryCache::new(),
                in_flight: HashMap::new(),
            })),
        }
    }
}

impl<T> fmt::Debug for QueryClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("QueryClient")
            .field("entries", &inner.cache.len())
            .field("in_flight", &inner.in_flight.len())
            .finish()
    }
}

// The lock is never held across an await, so a poisoned cache is still consistent
fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + Sync + 'static> QueryClient<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        lock(&self.inner)
    }

    /// Return the cached value for `key` while it is fresh. Otherwise join
    /// the fetch already running for `key`, or run `fetcher` (retrying per
    /// `policy`) and cache the result.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, policy: &QueryPolicy, fetcher: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let future = {
            let now = Instant::now();
            let mut inner = self.lock();
            inner.cache.collect_garbage(now);

            match inner.cache.touch(key, now) {
                Some(entry) if !entry.is_stale(now, policy.stale_time) => {
                    debug!(key = %key, "Query cache hit");
                    return Ok(entry.data.clone());
                }
                Some(_) => debug!(key = %key, "Query cache stale, refetching"),
                None => debug!(key = %key, "Query cache miss"),
            }

            let running = inner.in_flight.get(key).map(|running| {
                debug!(key = %key, generation = running.generation, "Joining in-flight query");
                running.future.clone()
            });
            match running {
                Some(future) => future,
                None => self.start_fetch(&mut inner, key, policy, fetcher),
            }
        };

        Self::settle(future).await
    }

    /// Fetch `key` now regardless of freshness. A fetch already running for
    /// the key is superseded: its callers still get its result, but it no
    /// longer writes the cache once this one has.
    pub async fn refetch<F, Fut>(&self, key: &QueryKey, policy: &QueryPolicy, fetcher: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let future = {
            let mut inner = self.lock();
            self.start_fetch(&mut inner, key, policy, fetcher)
        };

        Self::settle(future).await
    }

    fn start_fetch<F, Fut>(
        &self,
        inner: &mut Inner<T>,
        key: &QueryKey,
        policy: &QueryPolicy,
        mut fetcher: F,
    ) -> SharedFetch<T>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let generation = inner.cache.begin_fetch();
        let shared = Arc::clone(&self.inner);
        let task_key = key.clone();
        let policy = *policy;

        let future = async move {
            let result = Self::fetch_with_retry(&task_key, &policy, &mut fetcher).await;
            Self::complete(&shared, task_key, generation, &policy, result)
        }
        .boxed()
        .shared();

        inner.in_flight.insert(
            key.clone(),
            InFlight {
                generation,
                future: future.clone(),
            },
        );
        future
    }

    /// Record a finished fetch: clear its in-flight slot and cache the data
    /// unless a newer fetch already has.
    fn complete(
        shared: &Mutex<Inner<T>>,
        key: QueryKey,
        generation: u64,
        policy: &QueryPolicy,
        result: Result<T>,
    ) -> Result<T, Arc<anyhow::Error>> {
        let mut inner = lock(shared);
        if inner
            .in_flight
            .get(&key)
            .is_some_and(|running| running.generation == generation)
        {
            inner.in_flight.remove(&key);
        }

        let data = result.map_err(Arc::new)?;
        let stored = inner.cache.store(
            key.clone(),
            data.clone(),
            generation,
            policy.stale_time,
            policy.gc_time,
            Instant::now(),
        );
        if !stored {
            debug!(key = %key, generation, "Result superseded by a newer fetch");
        }
        Ok(data)
    }

    async fn settle(future: SharedFetch<T>) -> Result<T> {
        future.await.map_err(|e| match Arc::try_unwrap(e) {
            Ok(e) => e,
            Err(shared) => SharedError(shared).into(),
        })
    }

    async fn fetch_with_retry<F, Fut>(key: &QueryKey, policy: &QueryPolicy, fetcher: &mut F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut failures = 0;

        loop {
            match fetcher().await {
                Ok(data) => return Ok(data),
                Err(e) if failures < policy.retry => {
                    let delay = policy.retry_delay.delay(failures);
                    failures += 1;
                    warn!(
                        key = %key,
                        retry = failures,
                        backoff_ms = delay.as_millis() as u64,
                        error = %e,
                        "Query failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(key = %key, attempts = failures + 1, error = %e, "Query failed");
                    return Err(e);
                }
            }
        }
    }

    /// Cached value even if stale. Counts as a use for retention.
    pub fn get_data(&self, key: &QueryKey) -> Option<T> {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.cache.collect_garbage(now);
        inner.cache.touch(key, now).map(|entry| entry.data.clone())
    }

    pub fn state(&self, key: &QueryKey) -> Option<QueryState<T>> {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.cache.collect_garbage(now);
        inner.cache.peek(key).map(|entry| QueryState {
            data: entry.data.clone(),
            updated_at: entry.updated_at,
            is_stale: entry.is_stale(now, entry.stale_time),
        })
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }

    /// Mark matching entries stale so the next fetch goes to the network
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let count = self.lock().cache.invalidate(prefix);
        debug!(prefix = %prefix, count, "Invalidated queries");
        count
    }

    pub fn remove(&self, key: &QueryKey) -> Option<T> {
        self.lock().cache.remove(key)
    }

    /// Drop every entry. Running fetches finish for their callers but
    /// are no longer joinable.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.cache.clear();
        inner.in_flight.clear();
    }

    pub fn collect_garbage(&self) -> usize {
        self.lock().cache.collect_garbage(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().cache.is_empty()
    }
}
