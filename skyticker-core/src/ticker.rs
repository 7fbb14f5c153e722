//! Ticker scroll animation
//!
//! The message is drawn twice, the second copy `extent + spacing` pixels
//! after the first. The offset decreases by `step` every tick; once the
//! first copy has scrolled fully off the left edge and the second has not
//! yet reached the right edge, the offset jumps back to the start. That jump
//! is the only moment a new message may be swapped in, because nothing of
//! either copy is on screen.
//!
//! With `start_position` equal to the viewport width the reset threshold is
//! `start + step - (extent + spacing)`, and `spacing >= start + step`
//! guarantees both copies are off screen at the crossing.

use crate::config::TickerConfig;

/// Result of one [`TickerAnimator::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// Offset moved left by one step
    Scrolled,
    /// Offset crossed the reset threshold and jumped back to the start
    Wrapped,
}

/// Scroll state for the ticker strip
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickerAnimator {
    offset: i32,
    extent: i32,
    reset_threshold: i32,
    step: i32,
    start_position: i32,
    spacing: i32,
    extent_dirty: bool,
}

impl TickerAnimator {
    pub fn new(start_position: i32, step: i32, spacing: i32) -> Self {
        let mut animator = Self {
            offset: start_position,
            extent: 0,
            reset_threshold: 0,
            step: step.max(1),
            start_position,
            spacing,
            extent_dirty: true,
        };
        animator.update_threshold();
        animator
    }

    pub fn from_config(config: &TickerConfig) -> Self {
        Self::new(
            config.viewport_width as i32,
            config.step as i32,
            config.spacing as i32,
        )
    }

    /// Move one step left, wrapping to the start at the safe boundary
    pub fn advance(&mut self) -> Advance {
        self.offset -= self.step;
        if self.at_safe_boundary() {
            self.offset = self.start_position;
            self.extent_dirty = true;
            Advance::Wrapped
        } else {
            Advance::Scrolled
        }
    }

    /// Whether the offset has crossed the reset threshold
    pub fn at_safe_boundary(&self) -> bool {
        self.offset < self.reset_threshold
    }

    /// Record the measured width of the active message
    pub fn set_extent(&mut self, extent: u32) {
        self.extent = extent.min(i32::MAX as u32 / 4) as i32;
        self.extent_dirty = false;
        self.update_threshold();
    }

    /// Request a remeasure before the next render
    pub fn mark_extent_dirty(&mut self) {
        self.extent_dirty = true;
    }

    pub fn extent_dirty(&self) -> bool {
        self.extent_dirty
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn extent(&self) -> i32 {
        self.extent
    }

    pub fn reset_threshold(&self) -> i32 {
        self.reset_threshold
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn start_position(&self) -> i32 {
        self.start_position
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Left x of the leading and trailing copies
    pub fn copies(&self) -> [i32; 2] {
        [self.offset, self.offset + self.extent + self.spacing]
    }

    fn update_threshold(&mut self) {
        self.reset_threshold = self.start_position + self.step - (self.extent + self.spacing);
    }
}
