//! Login rate limiting.
//!
//! Each username gets its own governor bucket so that guessing passwords for
//! one account does not lock out another. Usernames come from unauthenticated
//! requests, so buckets that have fully replenished are dropped periodically.

use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter as GovRateLimiter,
};
use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicU64, Ordering},
};

/// Number of checks between sweeps of replenished buckets.
const SWEEP_INTERVAL: u64 = 1024;

/// Per-username login attempt limiter shared across requests.
pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    checks: AtomicU64,
    attempts_per_minute: u32,
}

impl LoginRateLimiter {
    /// Returns `None` when `attempts_per_minute` is 0, which disables limiting.
    pub fn new(attempts_per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(attempts_per_minute)?;
        Some(Self::with_quota(Quota::per_minute(per_minute), attempts_per_minute))
    }

    fn with_quota(quota: Quota, attempts_per_minute: u32) -> Self {
        Self {
            limiter: GovRateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
            attempts_per_minute,
        }
    }

    /// Records an attempt for `username`.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds if rate limited.
    pub fn check(&self, username: &str) -> Result<(), u64> {
        let result = self.limiter.check_key(&username.to_string());

        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.sweep();
        }

        result.map_err(|not_until| {
            let wait_time = not_until.wait_time_from(DefaultClock::default().now());
            // Minimum 1 second
            wait_time.as_secs().max(1)
        })
    }

    /// Drops buckets that would allow a full burst again.
    fn sweep(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        tracing::debug!(
            before,
            after = self.limiter.len(),
            "Swept login rate limiter buckets"
        );
    }

    fn active_limiters(&self) -> usize {
        self.limiter.len()
    }
}

impl std::fmt::Debug for LoginRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRateLimiter")
            .field("attempts_per_minute", &self.attempts_per_minute)
            .field("active_limiters", &self.active_limiters())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_disables_limiter() {
        assert!(LoginRateLimiter::new(0).is_none());
        assert!(LoginRateLimiter::new(5).is_some());
    }

    #[test]
    fn test_rate_limiter_allows_requests() {
        let limiter = LoginRateLimiter::new(100).unwrap();
        assert!(limiter.check("admin").is_ok());
    }

    #[test]
    fn test_rate_limiter_exhaustion() {
        let limiter = LoginRateLimiter::new(3).unwrap();

        for i in 0..3 {
            assert!(limiter.check("admin").is_ok(), "Attempt {} should be allowed", i);
        }

        let result = limiter.check("admin");
        assert!(result.is_err());
        assert!(result.unwrap_err() >= 1);
    }

    #[test]
    fn test_rate_limiter_usernames_independent() {
        let limiter = LoginRateLimiter::new(1).unwrap();

        assert!(limiter.check("admin").is_ok());
        assert!(limiter.check("editor").is_ok());

        assert!(limiter.check("admin").is_err());
        assert!(limiter.check("editor").is_err());
        assert!(limiter.check("someone-else").is_ok());
    }

    #[test]
    fn test_sweep_drops_replenished_buckets() {
        let quota = Quota::with_period(Duration::from_millis(1)).unwrap();
        let limiter = LoginRateLimiter::with_quota(quota, 60_000);

        for i in 0..500 {
            limiter.check(&format!("user-{}", i)).unwrap();
        }
        assert_eq!(limiter.active_limiters(), 500);

        std::thread::sleep(Duration::from_millis(20));
        limiter.sweep();
        assert_eq!(limiter.active_limiters(), 0);
    }

    #[test]
    fn test_sweep_keeps_limited_buckets() {
        let limiter = LoginRateLimiter::new(1).unwrap();
        limiter.check("admin").unwrap();

        limiter.sweep();
        assert_eq!(limiter.active_limiters(), 1);
        assert!(limiter.check("admin").is_err());
    }

    #[test]
    fn test_distinct_usernames_swept_during_checks() {
        let quota = Quota::with_period(Duration::from_millis(1)).unwrap();
        let limiter = LoginRateLimiter::with_quota(quota, 60_000);

        for i in 0..SWEEP_INTERVAL - 1 {
            limiter.check(&format!("user-{}", i)).unwrap();
        }
        std::thread::sleep(Duration::from_millis(20));

        // The next check triggers a sweep of everything above
        limiter.check("admin").unwrap();
        assert!(limiter.active_limiters() <= 1);
    }

    #[test]
    fn test_rate_limiter_debug() {
        let limiter = LoginRateLimiter::new(10).unwrap();
        limiter.check("admin").unwrap();

        let debug = format!("{:?}", limiter);
        assert!(debug.contains("LoginRateLimiter"));
        assert!(debug.contains("attempts_per_minute: 10"));
        assert!(debug.contains("active_limiters: 1"));
    }
}
