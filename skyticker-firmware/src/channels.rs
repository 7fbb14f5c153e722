//! Inter-task communication
//!
//! The display task publishes a small status summary for the main loop's
//! heartbeat log. Nothing flows back into the orchestrator.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Snapshot of application status for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppStatus {
    /// Last fetch attempt succeeded
    pub connected: bool,
    /// Successful cycles since the last clock resync
    pub update_count: u32,
    /// Backlight level
    pub brightness: u8,
    /// Frames drawn since boot
    pub frames: u32,
}

/// Latest status, overwritten on every change
pub static STATUS: Signal<CriticalSectionRawMutex, AppStatus> = Signal::new();
