//! Outbound request rate limiting
//!
//! A token bucket bounds how often the walker may start a fetch attempt.
//! The default quota (5 permits per second, burst capacity 1) spaces fetch
//! starts roughly 200ms apart. The walker acquires a permit before every
//! attempt, including attempts that end up served from the cache.

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;

/// Token-bucket limiter for fetch attempts
pub struct FetchLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl FetchLimiter {
    /// Creates a limiter with the given steady rate and burst capacity
    ///
    /// Values below 1 are clamped to 1; configuration validation rejects
    /// them before a walker is ever built.
    ///
    /// # Arguments
    ///
    /// * `requests_per_second` - Steady-state permit replenishment rate
    /// * `burst` - Maximum permits available at once
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        let quota = Quota::per_second(nonzero(requests_per_second)).allow_burst(nonzero(burst));
        Self {
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Waits until the next fetch attempt is permitted
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

fn nonzero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value.max(1)).unwrap_or(NonZeroU32::MIN)
}
