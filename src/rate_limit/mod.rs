//! Token-bucket rate limiting for value streams.
//!
//! [`rate_limit`] builds an operator that caps delivery to at most `count`
//! values in any sliding `window_ms` interval. Values are never dropped:
//! excess values wait upstream and are released strictly in arrival order
//! as tokens come back.
//!
//! ```text
//! source ──→ RateLimited ──→ consumer
//!              │  ▲
//!       consume│  │replenish (window after each consumption)
//!              ▼  │
//!           TokenBucket
//! ```

mod bucket;
mod feed;
mod stream;

use std::time::Duration;

use futures_core::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bucket::TokenBucket;
pub use feed::Feed;
pub use stream::RateLimited;

/// Misconfiguration detected when building a limiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A bucket without tokens would block forever.
    #[error("Rate limit count must be positive: a zero-capacity bucket never releases anything")]
    ZeroCapacity,

    #[error("Rate limit window_ms must be positive")]
    ZeroWindow,
}

/// Bucket capacity and replenishment delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Bucket capacity (default: 1).
    #[serde(default = "default_count")]
    pub count: u32,
    /// Delay before a consumed token returns, in milliseconds (default: 1000).
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

fn default_count() -> u32 {
    1
}

fn default_window_ms() -> u64 {
    1000
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            window_ms: default_window_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn new(count: u32, window_ms: u64) -> Self {
        Self { count, window_ms }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.count == 0 {
            return Err(ConfigurationError::ZeroCapacity);
        }
        if self.window_ms == 0 {
            return Err(ConfigurationError::ZeroWindow);
        }
        Ok(())
    }
}

/// Validated rate-limit operator.
///
/// Every [`apply`](Self::apply) gets its own bucket, so two consumers
/// throttled by the same operator do not compete for tokens.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    config: RateLimitConfig,
}

/// Build a rate-limit operator from `config`.
///
/// # Errors
/// Returns [`ConfigurationError`] for a zero count or zero window instead of
/// deadlocking at first use.
pub fn rate_limit(config: RateLimitConfig) -> Result<RateLimit, ConfigurationError> {
    config.validate()?;
    Ok(RateLimit { config })
}

impl RateLimit {
    /// Throttle `source` through a fresh, full bucket.
    pub fn apply<S>(&self, source: S) -> RateLimited<S>
    where
        S: Stream + Unpin,
    {
        RateLimited::new(source, TokenBucket::full(self.config))
    }
}
