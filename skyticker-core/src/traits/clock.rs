//! Wall-clock and uptime source trait

use crate::time::UnixTime;

/// Clock synchronization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Server name could not be resolved or the link is down
    Network,
    /// No reply within the sync timeout
    Timeout,
    /// Reply too short or not a server-mode packet
    BadResponse,
}

/// Source of wall-clock time
pub trait ClockSource {
    /// Perform one synchronization attempt
    ///
    /// On failure the previously synchronized time stays in effect.
    fn resync(&mut self) -> impl core::future::Future<Output = Result<(), SyncError>>;

    /// Current time, `None` until the first successful sync
    fn now(&self) -> Option<UnixTime>;

    /// Monotonic milliseconds since boot
    ///
    /// Unaffected by resyncs. Used to time how long a fetch attempt took.
    fn uptime_ms(&self) -> u64;
}
