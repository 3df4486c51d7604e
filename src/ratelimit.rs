//! Fixed-window request throttle for the grading endpoints.
//!
//! One counter slot per caller key (the peer address — never a
//! client-supplied header). Expired slots are swept whenever the map grows
//! past a threshold, so the store cannot grow without bound.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sweep expired slots once the map holds this many keys.
const SWEEP_THRESHOLD: usize = 1024;

pub struct RateLimiter {
    max_per_window: u32,
    window: Duration,
    slots: Mutex<HashMap<String, WindowSlot>>,
}

struct WindowSlot {
    count: u32,
    started: Instant,
}

impl RateLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key`. Returns false when the caller has
    /// exhausted its window.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if slots.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            slots.retain(|_, slot| now.duration_since(slot.started) < window);
        }

        let slot = slots.entry(key.to_string()).or_insert(WindowSlot {
            count: 0,
            started: now,
        });
        if now.duration_since(slot.started) >= self.window {
            slot.count = 0;
            slot.started = now;
        }

        if slot.count < self.max_per_window {
            slot.count += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_cap_then_rejects() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.2"));
    }

    #[test]
    fn window_expiry_readmits_the_caller() {
        let limiter = RateLimiter::new(1, Duration::from_millis(30));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        std::thread::sleep(Duration::from_millis(40));
        assert!(limiter.check("10.0.0.1"));
    }
}
