//! Ticker message text

use core::fmt;

use super::snapshot::Snapshot;
use crate::config::Units;
use crate::time::ClockTime;

/// Shown from boot until the first fetch completes
pub const INITIAL_MESSAGE: &str = "Initializing weather data...";

/// Published when a fetch cycle starts; stays up if the cycle is abandoned
pub const PLACEHOLDER_MESSAGE: &str = "Updating weather data...";

/// Scrolling summary line for a snapshot
///
/// Formats as `"<description>, visibility is <km> km, wind speed of
/// <speed> <unit>, last updated at HH:MM:SS..."`.
pub struct MessageLine<'a> {
    snapshot: &'a Snapshot,
    units: Units,
}

impl<'a> MessageLine<'a> {
    pub fn new(snapshot: &'a Snapshot, units: Units) -> Self {
        Self { snapshot, units }
    }
}

impl fmt::Display for MessageLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.snapshot;
        write!(
            f,
            "{}, visibility is {:.1} km, wind speed of {:.1} {}, last updated at {}...",
            snap.description(),
            snap.visibility_km(),
            snap.wind_speed_in(self.units),
            self.units.wind_symbol(),
            snap.updated_at().unwrap_or(ClockTime::FALLBACK),
        )
    }
}
