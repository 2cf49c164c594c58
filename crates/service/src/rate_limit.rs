use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};

/// Lapsed windows are swept once the map grows past this many keys.
const PRUNE_AT: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client identity.
///
/// The map entry lock makes each check an atomic increment-and-check, so
/// concurrent requests from one client cannot slip past the cap.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, enabled: bool) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
            enabled,
        }
    }

    /// Count one request for `key`; `false` means over the cap.
    pub fn check(&self, key: &str) -> bool {
        if !self.enabled {
            return true;
        }
        if self.windows.len() > PRUNE_AT {
            self.prune();
        }
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }
        if entry.count < self.max_requests {
            entry.count += 1;
            debug!(key, count = entry.count, "request allowed");
            true
        } else {
            warn!(key, "rate limit exceeded");
            false
        }
    }

    /// Drop lapsed windows so the map does not grow unbounded.
    pub fn prune(&self) {
        let now = Instant::now();
        self.windows.retain(|_, w| now.duration_since(w.started) < self.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eleventh_request_in_window_is_rejected() {
        let limiter = RateLimiter::new(10, Duration::from_secs(3600), true);
        for _ in 0..10 {
            assert!(limiter.check("1.2.3.4"));
        }
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, Duration::from_secs(3600), true);
        assert!(limiter.check("1.1.1.1"));
        assert!(limiter.check("2.2.2.2"));
        assert!(!limiter.check("1.1.1.1"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20), true);
        assert!(limiter.check("k"));
        assert!(!limiter.check("k"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("k"));
    }

    #[test]
    fn disabled_limiter_always_allows() {
        let limiter = RateLimiter::new(1, Duration::from_secs(3600), false);
        for _ in 0..100 {
            assert!(limiter.check("k"));
        }
    }

    #[test]
    fn prune_drops_lapsed_windows() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10), true);
        limiter.check("gone");
        std::thread::sleep(Duration::from_millis(20));
        limiter.prune();
        assert!(limiter.windows.is_empty());
    }
}
