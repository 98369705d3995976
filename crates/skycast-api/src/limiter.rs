//! Per-IP rate limiting for the authentication endpoints.
//!
//! A token bucket per client IP with continuous refill based on elapsed
//! time, so limits are smooth rather than bursty window resets.

use skycast_configs::RateLimitSettings;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

/// Refill window for auth attempts.
const REFILL_WINDOW: Duration = Duration::from_secs(60);

/// Buckets idle for this long are dropped when a new IP is tracked, so the
/// map stays bounded by recently active clients instead of growing with
/// every address a client claims via proxy headers.
const IDLE_EVICT_AFTER: Duration = Duration::from_secs(120);

/// Token bucket with continuous refill.
#[derive(Debug)]
struct TokenBucket {
    capacity: u32,
    tokens: u32,
    last_refill: Instant,
    /// Pre-computed refill rate, avoids division on the hot path
    tokens_per_sec: f64,
}

impl TokenBucket {
    fn new(capacity: u32, refill_rate: u32, window: Duration) -> Self {
        let tokens_per_sec = refill_rate as f64 / window.as_secs_f64();
        Self {
            capacity,
            tokens: capacity,
            last_refill: Instant::now(),
            tokens_per_sec,
        }
    }

    fn try_consume(&mut self, tokens: u32) -> bool {
        self.refill();

        if self.tokens >= tokens {
            self.tokens -= tokens;
            true
        } else {
            false
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);

        if elapsed.as_millis() < 10 {
            return;
        }

        let tokens_to_add = (self.tokens_per_sec * elapsed.as_secs_f64()) as u32;
        if tokens_to_add > 0 {
            self.tokens = self.capacity.min(self.tokens + tokens_to_add);
            self.last_refill = now;
        }
    }
}

/// Rate limiter for login and signup attempts, keyed by client IP.
pub struct RateLimiter {
    enabled: bool,
    max_attempts_per_min: u32,
    idle_evict_after: Duration,
    buckets: RwLock<HashMap<IpAddr, Mutex<TokenBucket>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_config(&RateLimitSettings::default())
    }

    pub fn with_config(config: &RateLimitSettings) -> Self {
        Self {
            enabled: config.enabled,
            max_attempts_per_min: config.max_auth_attempts_per_min,
            idle_evict_after: IDLE_EVICT_AFTER,
            buckets: RwLock::new(HashMap::new()),
        }
    }

    /// Check whether an auth attempt from this IP is allowed.
    ///
    /// Always `true` when limiting is disabled.
    pub fn check_auth_rate(&self, ip: IpAddr) -> bool {
        if !self.enabled {
            return true;
        }

        // Fast path: bucket already exists
        {
            let buckets = self.buckets.read().expect("Rate limiter lock poisoned");
            if let Some(bucket) = buckets.get(&ip) {
                return bucket
                    .lock()
                    .expect("Rate limiter mutex poisoned")
                    .try_consume(1);
            }
        }

        let mut buckets = self.buckets.write().expect("Rate limiter lock poisoned");

        // Tracking a new IP pays for map hygiene: sweep buckets whose last
        // activity is past the idle cutoff before inserting.
        let now = Instant::now();
        let idle_evict_after = self.idle_evict_after;
        buckets.retain(|_, bucket| {
            bucket
                .lock()
                .map(|b| now.duration_since(b.last_refill) < idle_evict_after)
                .unwrap_or(false)
        });

        let allowed = buckets
            .entry(ip)
            .or_insert_with(|| {
                Mutex::new(TokenBucket::new(
                    self.max_attempts_per_min,
                    self.max_attempts_per_min,
                    REFILL_WINDOW,
                ))
            })
            .lock()
            .expect("Rate limiter mutex poisoned")
            .try_consume(1);
        allowed
    }

    /// Number of IPs currently tracked.
    pub fn tracked_ips(&self) -> usize {
        self.buckets.read().expect("Rate limiter lock poisoned").len()
    }

    #[cfg(test)]
    fn with_idle_eviction(max_attempts_per_min: u32, idle_evict_after: Duration) -> Self {
        Self {
            enabled: true,
            max_attempts_per_min,
            idle_evict_after,
            buckets: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([203, 0, 113, last])
    }

    #[test]
    fn test_token_bucket_basic() {
        let mut bucket = TokenBucket::new(10, 10, Duration::from_secs(1));

        assert!(bucket.try_consume(5));
        assert!(bucket.try_consume(5));
        assert!(!bucket.try_consume(1));
    }

    #[test]
    fn test_token_bucket_refill() {
        let mut bucket = TokenBucket::new(10, 10, Duration::from_millis(100));

        assert!(bucket.try_consume(10));
        assert!(!bucket.try_consume(1));

        thread::sleep(Duration::from_millis(150));
        assert!(bucket.try_consume(10));
    }

    #[test]
    fn test_limit_enforced_per_ip() {
        let limiter = RateLimiter::with_config(&RateLimitSettings {
            enabled: true,
            max_auth_attempts_per_min: 3,
        });

        for _ in 0..3 {
            assert!(limiter.check_auth_rate(ip(1)));
        }
        assert!(!limiter.check_auth_rate(ip(1)));

        // A different IP has its own bucket
        assert!(limiter.check_auth_rate(ip(2)));
        assert_eq!(limiter.tracked_ips(), 2);
    }

    #[test]
    fn test_idle_buckets_swept_when_new_ip_tracked() {
        let limiter = RateLimiter::with_idle_eviction(3, Duration::ZERO);

        // With a zero idle cutoff every existing bucket counts as stale, so
        // each new IP evicts the previous one and the map never accumulates
        for last in 1..=50 {
            assert!(limiter.check_auth_rate(ip(last)));
        }
        assert_eq!(limiter.tracked_ips(), 1);
    }

    #[test]
    fn test_active_buckets_survive_sweep() {
        let limiter = RateLimiter::with_idle_eviction(3, Duration::from_secs(120));

        for last in 1..=10 {
            assert!(limiter.check_auth_rate(ip(last)));
        }
        assert_eq!(limiter.tracked_ips(), 10);

        // Recently throttled state is kept too: ip(1) is still limited
        assert!(limiter.check_auth_rate(ip(1)));
        assert!(limiter.check_auth_rate(ip(1)));
        assert!(!limiter.check_auth_rate(ip(1)));
    }

    #[test]
    fn test_disabled_limiter_allows_everything() {
        let limiter = RateLimiter::with_config(&RateLimitSettings {
            enabled: false,
            max_auth_attempts_per_min: 1,
        });

        for _ in 0..100 {
            assert!(limiter.check_auth_rate(ip(1)));
        }
        assert_eq!(limiter.tracked_ips(), 0);
    }
}
