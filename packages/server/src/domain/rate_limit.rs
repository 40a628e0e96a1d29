//! Per-identity token-bucket admission policy.
//!
//! Each client identity gets a bucket of `points` tokens refilled
//! continuously at `points` per `duration_ms`. A fresh identity starts with
//! a full bucket; each accepted update consumes one token. The caller
//! decides the consequence of a rejection (this server terminates the
//! connection).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use oekaki_shared::time::Clock;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Bucket capacity, and the amount refilled per `duration_ms`.
    pub points: u32,
    /// Refill window in milliseconds.
    pub duration_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            points: 10,
            duration_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TokenBucket {
    tokens: f64,
    last_refill_ms: i64,
}

impl TokenBucket {
    fn full(now_ms: i64, capacity: u32) -> Self {
        Self {
            tokens: f64::from(capacity),
            last_refill_ms: now_ms,
        }
    }

    fn try_consume(&mut self, now_ms: i64, config: &RateLimitConfig) -> Admission {
        let elapsed_ms = (now_ms - self.last_refill_ms).max(0) as f64;
        let rate = f64::from(config.points) / config.duration_ms as f64;
        self.tokens = (self.tokens + elapsed_ms * rate).min(f64::from(config.points));
        self.last_refill_ms = now_ms;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Admission::Accepted
        } else {
            Admission::Rejected
        }
    }
}

/// Token buckets keyed by client identity.
///
/// Buckets are created lazily on first use and removed via [`forget`] when
/// the identity disconnects, so the map never outgrows the set of
/// recently-connected identities.
///
/// [`forget`]: RateLimiter::forget
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    buckets: Mutex<HashMap<String, TokenBucket>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Take one token from the identity's bucket, creating a fresh full
    /// bucket on first use.
    pub async fn consume(&self, identity: &str) -> Admission {
        let now_ms = self.clock.now_millis();
        let mut buckets = self.buckets.lock().await;
        let bucket = buckets
            .entry(identity.to_string())
            .or_insert_with(|| TokenBucket::full(now_ms, self.config.points));
        bucket.try_consume(now_ms, &self.config)
    }

    /// Drop the identity's bucket state.
    pub async fn forget(&self, identity: &str) {
        let mut buckets = self.buckets.lock().await;
        if buckets.remove(identity).is_some() {
            tracing::debug!("Dropped rate-limiter bucket for '{}'", identity);
        }
    }

    /// Number of identities currently tracked.
    pub async fn tracked_identities(&self) -> usize {
        self.buckets.lock().await.len()
    }
}
