//! In-memory sliding window rate limiting.
//!
//! Each client key maps to the timestamps of its recent requests. A check
//! purges timestamps that fell out of the trailing window, denies if the
//! remaining count has reached the limit, and otherwise records the request.
//!
//! The purge/count/append sequence runs under a single lock, so two
//! concurrent requests can never both take the last slot. State lives for the
//! lifetime of the process and is not shared between processes.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

/// Once the table holds more keys than this, fully expired keys are swept.
const SWEEP_THRESHOLD: usize = 10_000;

/// Rate limiter trait for admission checks.
#[cfg_attr(test, mockall::automock)]
pub trait RateLimiter: Send + Sync {
    /// Check and record a request for `key` at `now`.
    fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Admitted, includes the number of requests now in the window.
    Allowed(usize),
    /// Denied, includes the configured limit and when a slot frees up.
    Exceeded {
        limit: usize,
        window_secs: u64,
        retry_after_secs: u64,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }
}

/// Sliding window limiter keyed by client identifier.
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: TimeDelta,
    windows: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window_secs: u64) -> Self {
        let secs = i64::try_from(window_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Self {
            max_requests,
            window: TimeDelta::seconds(secs),
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn window_secs(&self) -> u64 {
        self.window.num_seconds().unsigned_abs()
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.windows.lock().len()
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&self, key: &str, now: DateTime<Utc>) -> RateLimitResult {
        // A window reaching past the earliest representable instant covers all history.
        let cutoff = now
            .checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut windows = self.windows.lock();

        if windows.len() > SWEEP_THRESHOLD {
            windows.retain(|_, timestamps| timestamps.back().is_some_and(|last| *last > cutoff));
        }

        let timestamps = windows.entry(key.to_owned()).or_default();
        while timestamps.front().is_some_and(|ts| *ts <= cutoff) {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            let retry_after_secs = timestamps
                .front()
                .and_then(|oldest| oldest.checked_add_signed(self.window))
                .map(|frees_at| {
                    let ms = (frees_at - now).num_milliseconds();
                    u64::try_from(ms.saturating_add(999) / 1000).unwrap_or(0)
                })
                .unwrap_or_else(|| self.window_secs())
                .max(1);

            return RateLimitResult::Exceeded {
                limit: self.max_requests,
                window_secs: self.window_secs(),
                retry_after_secs,
            };
        }

        timestamps.push_back(now);
        RateLimitResult::Allowed(timestamps.len())
    }
}
