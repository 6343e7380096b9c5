//! Outbound email rate limiting.
//!
//! The limiter is explicit, injectable state owned by the dispatcher rather
//! than a process-wide global. Counters are windowed per key (recipient
//! address) and reset when the window elapses.

use std::time::{Duration, Instant};

use dashmap::DashMap;

const DEFAULT_MAX_PER_WINDOW: u32 = 100;
const DEFAULT_WINDOW: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    window_start: Instant,
}

/// Windowed per-key counter for outbound email.
#[derive(Debug)]
pub struct EmailRateLimiter {
    max_per_window: u32,
    window: Duration,
    buckets: DashMap<String, Bucket>,
}

impl EmailRateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            buckets: DashMap::new(),
        }
    }

    /// Record one send attempt for `key`.
    ///
    /// Returns `true` if the send is within the limit, `false` if the key is
    /// currently rate limited.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.buckets.entry(key.to_string()).or_insert(Bucket {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_per_window {
            return false;
        }

        entry.count += 1;
        true
    }
}

impl Default for EmailRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_WINDOW, DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_blocks() {
        let limiter = EmailRateLimiter::new(2, Duration::from_secs(3600));

        assert!(limiter.check("a@example.test"));
        assert!(limiter.check("a@example.test"));
        assert!(!limiter.check("a@example.test"));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = EmailRateLimiter::new(1, Duration::from_secs(3600));

        assert!(limiter.check("a@example.test"));
        assert!(limiter.check("b@example.test"));
        assert!(!limiter.check("a@example.test"));
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let limiter = EmailRateLimiter::new(1, Duration::from_millis(20));

        assert!(limiter.check("a@example.test"));
        assert!(!limiter.check("a@example.test"));

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("a@example.test"));
    }
}
