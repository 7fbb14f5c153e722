//! Renderer trait

use crate::config::Units;
use crate::time::ClockTime;
use crate::weather::Snapshot;

/// Rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Panel bus write failed
    Bus,
}

/// Everything the renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Latest snapshot, `None` before the first successful fetch
    pub snapshot: Option<&'a Snapshot>,
    /// Committed ticker text
    pub message: &'a str,
    /// Left x of the leading ticker copy
    pub offset: i32,
    /// Measured ticker text width (px)
    pub extent: i32,
    /// Gap between ticker copies (px)
    pub spacing: i32,
    /// Current local time, `None` before the first clock sync
    pub clock: Option<ClockTime>,
    /// Successful fetch cycles since the last resync
    pub update_count: u32,
    /// Whether the most recent fetch attempt succeeded
    pub connected: bool,
    /// Location name shown in the header
    pub location: &'a str,
    pub units: Units,
}

/// Draws frames; never feeds anything back into core state
pub trait Renderer {
    /// Width in pixels of `text` in the ticker font
    fn measure(&mut self, text: &str) -> u32;

    /// Draw one complete frame
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}
