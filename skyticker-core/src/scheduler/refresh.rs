//! Fetch and resync cadence

use crate::config::RefreshConfig;

/// When the next fetch cycle and clock resync are due
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTimer {
    last_fetch_ms: Option<u64>,
    interval_ms: u64,
    success_count: u32,
    resync_every: u32,
}

impl RefreshTimer {
    pub fn new(interval_ms: u64, resync_every: u32) -> Self {
        Self {
            last_fetch_ms: None,
            interval_ms,
            success_count: 0,
            resync_every: resync_every.max(1),
        }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(config.interval_ms as u64, config.resync_every as u32)
    }

    /// Whether a fetch cycle should start at `now_ms`
    ///
    /// Always true before the first cycle.
    pub fn due(&self, now_ms: u64) -> bool {
        match self.last_fetch_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Record that a cycle started at `now_ms`
    pub fn mark_started(&mut self, now_ms: u64) {
        self.last_fetch_ms = Some(now_ms);
    }

    /// Count one completed successful cycle
    pub fn record_success(&mut self) {
        self.success_count = self.success_count.saturating_add(1);
    }

    /// Whether enough successes have accumulated for a clock resync
    pub fn resync_due(&self) -> bool {
        self.success_count >= self.resync_every
    }

    /// Reset the success counter after a resync ran
    pub fn reset_successes(&mut self) {
        self.success_count = 0;
    }

    pub fn success_count(&self) -> u32 {
        self.success_count
    }

    pub fn last_fetch_ms(&self) -> Option<u64> {
        self.last_fetch_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
