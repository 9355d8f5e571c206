use std::time::Duration;

/// Cached data is served without refetching for this long.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Unused entries are evicted after this long.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);

/// Retries after the first failed attempt.
pub const DEFAULT_RETRY: u32 = 3;

/// First backoff delay; doubles with every retry.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Backoff ceiling.
const RETRY_MAX_DELAY: Duration = Duration::from_millis(30_000);

/// Delay before a retry, given the zero-based index of the failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDelay {
    Exponential { base: Duration, max: Duration },
    Fixed(Duration),
}

impl RetryDelay {
    pub fn delay(&self, attempt_index: u32) -> Duration {
        match *self {
            RetryDelay::Exponential { base, max } => 2u32
                .checked_pow(attempt_index)
                .and_then(|factor| base.checked_mul(factor))
                .map_or(max, |delay| delay.min(max)),
            RetryDelay::Fixed(delay) => delay,
        }
    }
}

impl Default for RetryDelay {
    fn default() -> Self {
        RetryDelay::Exponential {
            base: RETRY_BASE_DELAY,
            max: RETRY_MAX_DELAY,
        }
    }
}

/// Freshness, retention and retry settings for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry: u32,
    pub retry_delay: RetryDelay,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            gc_time: DEFAULT_GC_TIME,
            retry: DEFAULT_RETRY,
            retry_delay: RetryDelay::default(),
        }
    }
}

impl QueryPolicy {
    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: RetryDelay) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }
}
