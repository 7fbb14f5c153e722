//! Button press debouncing
//!
//! The brightness buttons share one lockout window: once any press is
//! accepted, further presses are ignored until the window passes. A held
//! button therefore repeats once per window.

use crate::button::ButtonLine;

/// Lockout after an accepted press (ms)
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Shared lockout for a group of buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    lockout_ms: u64,
    last_press_ms: Option<u64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub const fn new(lockout_ms: u64) -> Self {
        Self {
            lockout_ms,
            last_press_ms: None,
        }
    }

    /// Filter raw pressed states sampled at `now_ms`
    ///
    /// Inside the lockout window every state reads as released.
    pub fn filter<const N: usize>(&mut self, now_ms: u64, pressed: [bool; N]) -> [bool; N] {
        if self.locked(now_ms) {
            return [false; N];
        }
        if pressed.iter().any(|p| *p) {
            self.last_press_ms = Some(now_ms);
        }
        pressed
    }

    /// Read `lines` and filter them
    pub fn sample<L: ButtonLine, const N: usize>(
        &mut self,
        now_ms: u64,
        lines: [&L; N],
    ) -> [bool; N] {
        self.filter(now_ms, lines.map(|line| line.is_pressed()))
    }

    fn locked(&self, now_ms: u64) -> bool {
        self.last_press_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.lockout_ms)
    }
}
