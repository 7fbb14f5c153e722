//! Events that trigger fetch state transitions

/// Events that can trigger fetch state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchEvent {
    /// Refresh interval elapsed while idle
    CycleDue,
    /// The data source returned a valid snapshot
    AttemptSucceeded,
    /// The attempt failed and another is allowed after `retry_at_ms`
    AttemptFailed {
        /// Earliest time for the next attempt (ms)
        retry_at_ms: u64,
    },
    /// The attempt failed and no attempts remain
    RetriesExhausted,
    /// The retry deadline has passed
    BackoffElapsed,
}
