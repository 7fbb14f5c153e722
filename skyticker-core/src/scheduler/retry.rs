//! Bounded retry policy
//!
//! [`RetryPolicy::decide`] is a pure function of the attempts made so far.
//! [`RetryState`] carries the attempt count for the cycle in progress.

use crate::config::RefreshConfig;

/// What to do after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryDecision {
    /// Attempt again once `delay_ms` has passed since the failure returned
    Backoff {
        /// Wait before the next attempt (ms)
        delay_ms: u64,
    },
    /// Attempts exhausted; give up on this cycle
    Abandon,
}

/// Retry limits for one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Attempts per cycle, including the first
    pub max_attempts: u8,
    /// Wait after a failed attempt (ms)
    pub backoff_ms: u32,
}

impl RetryPolicy {
    pub fn from_config(config: &RefreshConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_ms: config.backoff_ms,
        }
    }

    /// Decide the next step after `attempts` failed attempts
    pub fn decide(&self, attempts: u8) -> RetryDecision {
        if attempts >= self.max_attempts {
            RetryDecision::Abandon
        } else {
            RetryDecision::Backoff {
                delay_ms: self.backoff_ms as u64,
            }
        }
    }
}

/// Attempt bookkeeping for the cycle in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryState {
    attempt: u8,
    policy: RetryPolicy,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { attempt: 0, policy }
    }

    /// Count one attempt, never past `max_attempts`
    ///
    /// Returns the 1-based number of the attempt being made.
    pub fn begin_attempt(&mut self) -> u8 {
        if self.attempt < self.policy.max_attempts {
            self.attempt += 1;
        }
        self.attempt
    }

    /// Clear the count after a success or an abandoned cycle
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Decide after the current attempt failed
    pub fn decide(&self) -> RetryDecision {
        self.policy.decide(self.attempt)
    }

    pub fn exhausted(&self) -> bool {
        self.attempt >= self.policy.max_attempts
    }

    pub fn attempt(&self) -> u8 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u8 {
        self.policy.max_attempts
    }

    pub fn backoff_ms(&self) -> u32 {
        self.policy.backoff_ms
    }
}
