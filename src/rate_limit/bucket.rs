//! Sliding-window token bucket.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use super::{ConfigurationError, RateLimitConfig};

/// Token bucket where each consumed token comes back `window` after its own
/// consumption (sliding window, not a tumbling one).
///
/// The bucket keeps one replenishment deadline per consumed token, so the
/// number of available tokens can never exceed `capacity`.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: u32,
    window: Duration,
    /// Replenishment deadlines, oldest first.
    outstanding: VecDeque<Instant>,
}

impl TokenBucket {
    /// Create a full bucket.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when `config` fails validation.
    pub fn new(config: RateLimitConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::full(config))
    }

    /// Full bucket from an already validated config.
    pub(crate) fn full(config: RateLimitConfig) -> Self {
        Self {
            capacity: config.count,
            window: config.window(),
            outstanding: VecDeque::with_capacity(config.count as usize),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Tokens available at `now`.
    pub fn available(&mut self, now: Instant) -> u32 {
        self.replenish(now);
        self.capacity - self.outstanding.len() as u32
    }

    /// Consume one token at `now`.
    ///
    /// # Errors
    /// When the bucket is empty, returns the instant the next token returns.
    pub fn try_acquire(&mut self, now: Instant) -> Result<(), Instant> {
        self.replenish(now);
        if (self.outstanding.len() as u32) < self.capacity {
            self.outstanding.push_back(now + self.window);
            return Ok(());
        }
        Err(self.outstanding.front().copied().unwrap_or(now))
    }

    /// When the oldest consumed token returns, if any is out.
    pub fn next_replenish(&self) -> Option<Instant> {
        self.outstanding.front().copied()
    }

    fn replenish(&mut self, now: Instant) {
        while let Some(&deadline) = self.outstanding.front() {
            if deadline > now {
                break;
            }
            self.outstanding.pop_front();
        }
    }
}
