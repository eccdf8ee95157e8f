//! Per-username login throttling.
//!
//! Tracks consecutive failed logins per (lowercased) identifier. After
//! [`MAX_FAILURES`] failures within the window the identifier is locked out
//! until the window since the last failure elapses. A successful login
//! clears the counter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Failures allowed before a lockout kicks in.
pub const MAX_FAILURES: u32 = 5;

/// How long a lockout lasts, measured from the most recent failure.
pub const LOCKOUT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy)]
struct FailureRecord {
    count: u32,
    last_failure: Instant,
}

/// In-memory failed-login tracker shared across request handlers.
#[derive(Debug, Default)]
pub struct LoginThrottle {
    records: Mutex<HashMap<String, FailureRecord>>,
}

impl LoginThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an identifier is currently locked out.
    ///
    /// Returns `Some(retry_after)` with the remaining lockout duration,
    /// or `None` if login attempts are allowed. Expired records are
    /// dropped as a side effect.
    pub fn check(&self, identifier: &str) -> Option<Duration> {
        self.check_at(identifier, Instant::now())
    }

    fn check_at(&self, identifier: &str, now: Instant) -> Option<Duration> {
        let key = identifier.to_lowercase();
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        let Some(record) = records.get(&key).copied() else {
            return None;
        };

        let elapsed = now.saturating_duration_since(record.last_failure);
        if elapsed >= LOCKOUT_WINDOW {
            records.remove(&key);
            return None;
        }

        if record.count >= MAX_FAILURES {
            return Some(LOCKOUT_WINDOW - elapsed);
        }

        None
    }

    /// Record a failed login attempt for an identifier.
    pub fn record_failure(&self, identifier: &str) {
        self.record_failure_at(identifier, Instant::now());
    }

    fn record_failure_at(&self, identifier: &str, now: Instant) {
        let key = identifier.to_lowercase();
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        let record = records.entry(key).or_insert(FailureRecord {
            count: 0,
            last_failure: now,
        });

        // Failures older than the window start a fresh count.
        if now.saturating_duration_since(record.last_failure) >= LOCKOUT_WINDOW {
            record.count = 0;
        }

        record.count += 1;
        record.last_failure = now;
    }

    /// Clear the failure record after a successful login.
    pub fn clear(&self, identifier: &str) {
        let key = identifier.to_lowercase();
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_until_max_failures() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES - 1 {
            throttle.record_failure_at("admin", now);
        }
        assert!(throttle.check_at("admin", now).is_none());

        throttle.record_failure_at("admin", now);
        assert!(throttle.check_at("admin", now).is_some());
    }

    #[test]
    fn test_lockout_expires_after_window() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES {
            throttle.record_failure_at("admin", now);
        }
        assert!(throttle.check_at("admin", now).is_some());

        let later = now + LOCKOUT_WINDOW;
        assert!(throttle.check_at("admin", later).is_none());
    }

    #[test]
    fn test_identifier_is_case_insensitive() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES {
            throttle.record_failure_at("Admin", now);
        }
        assert!(throttle.check_at("ADMIN", now).is_some());
    }

    #[test]
    fn test_clear_resets_counter() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES {
            throttle.record_failure_at("admin", now);
        }
        throttle.clear("admin");
        assert!(throttle.check_at("admin", now).is_none());
    }

    #[test]
    fn test_stale_failures_start_fresh_count() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES - 1 {
            throttle.record_failure_at("admin", now);
        }

        // One more failure after the window expires should not lock out.
        let later = now + LOCKOUT_WINDOW;
        throttle.record_failure_at("admin", later);
        assert!(throttle.check_at("admin", later).is_none());
    }

    #[test]
    fn test_remaining_time_counts_down() {
        let throttle = LoginThrottle::new();
        let now = Instant::now();

        for _ in 0..MAX_FAILURES {
            throttle.record_failure_at("admin", now);
        }

        let halfway = now + LOCKOUT_WINDOW / 2;
        let remaining = throttle.check_at("admin", halfway).unwrap();
        assert_eq!(remaining, LOCKOUT_WINDOW / 2);
    }
}
