use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

// Rate limit entry - tracks requests per client within the current window
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

// Fixed-window counter per client. A request landing just before a window
// boundary plus one just after can let a client through 2x the limit;
// the quota is advisory cost control, not a security boundary.
pub struct RateLimiter {
    buckets: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: Duration,
    // table capacity; expired windows are swept when a new client hits the cap
    max_clients: usize,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, max_clients: usize) -> Self {
        Self {
            buckets: DashMap::new(),
            max_requests,
            window,
            max_clients,
        }
    }

    pub fn check(&self, client_id: &str) -> bool {
        self.check_at(client_id, Instant::now())
    }

    // Bucket key is a hash of the client id, so attacker-sized
    // forwarded-for values never inflate stored key length
    fn bucket_key(client_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(client_id);
        format!("{:x}", hasher.finalize())
    }

    // `now` is injected so window expiry is testable without sleeping
    pub(crate) fn check_at(&self, client_id: &str, now: Instant) -> bool {
        let key = Self::bucket_key(client_id);

        // New client against a full table: sweep expired windows first.
        // Still full means every tracked window is live, so deny rather
        // than grow past the cap.
        if !self.buckets.contains_key(&key) && self.buckets.len() >= self.max_clients {
            self.sweep_expired(now);
            if self.buckets.len() >= self.max_clients {
                return false;
            }
        }

        // entry() holds the shard lock, so the read-check-increment below
        // is atomic per key under concurrent requests
        let mut entry = self.buckets.entry(key).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        // window expired? reset it
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        // under limit? allow
        if entry.count < self.max_requests {
            entry.count += 1;
            return true;
        }

        // over limit
        false
    }

    fn sweep_expired(&self, now: Instant) {
        self.buckets
            .retain(|_, entry| now.duration_since(entry.window_start) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_first_ten_allowed_eleventh_denied() {
        let limiter = RateLimiter::new(10, WINDOW, 100);
        let now = Instant::now();

        for _ in 0..10 {
            assert!(limiter.check_at("1.2.3.4", now));
        }
        assert!(!limiter.check_at("1.2.3.4", now));
        // still denied, entry unchanged
        assert!(!limiter.check_at("1.2.3.4", now));
    }

    #[test]
    fn test_window_expiry_resets_counter() {
        let limiter = RateLimiter::new(10, WINDOW, 100);
        let now = Instant::now();

        for _ in 0..10 {
            assert!(limiter.check_at("1.2.3.4", now));
        }
        assert!(!limiter.check_at("1.2.3.4", now + Duration::from_secs(30)));

        // 60s after the first request the window rolls over and the
        // counter restarts at 1
        let later = now + Duration::from_secs(60);
        assert!(limiter.check_at("1.2.3.4", later));
        for _ in 0..9 {
            assert!(limiter.check_at("1.2.3.4", later));
        }
        assert!(!limiter.check_at("1.2.3.4", later));
    }

    #[test]
    fn test_distinct_clients_have_independent_quotas() {
        let limiter = RateLimiter::new(2, WINDOW, 100);
        let now = Instant::now();

        assert!(limiter.check_at("1.2.3.4", now));
        assert!(limiter.check_at("1.2.3.4", now));
        assert!(!limiter.check_at("1.2.3.4", now));

        assert!(limiter.check_at("5.6.7.8", now));
        assert!(limiter.check_at("5.6.7.8", now));
    }

    #[test]
    fn test_full_table_of_live_windows_denies_new_client() {
        let limiter = RateLimiter::new(10, WINDOW, 2);
        let now = Instant::now();

        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
        assert!(!limiter.check_at("c", now));

        // known clients keep working at the cap
        assert!(limiter.check_at("a", now));
    }

    #[test]
    fn test_sweep_makes_room_once_windows_expire() {
        let limiter = RateLimiter::new(10, WINDOW, 2);
        let now = Instant::now();

        assert!(limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
        assert!(!limiter.check_at("c", now));

        // a and b have expired by now + 60s, so the sweep evicts them
        let later = now + Duration::from_secs(60);
        assert!(limiter.check_at("c", later));
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
