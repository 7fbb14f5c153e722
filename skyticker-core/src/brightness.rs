//! Backlight level control

use crate::config::DisplayConfig;
use crate::traits::Buttons;

/// Current backlight level and its stepping rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness {
    level: u8,
    step: u8,
    min: u8,
    max: u8,
}

impl Brightness {
    pub fn new(config: &DisplayConfig) -> Self {
        let min = config.min_brightness.min(config.max_brightness);
        let max = config.max_brightness.max(min);
        Self {
            level: config.brightness.clamp(min, max),
            step: config.brightness_step,
            min,
            max,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// One step brighter, saturating at the maximum
    pub fn raise(&mut self) {
        self.level = self.level.saturating_add(self.step).min(self.max);
    }

    /// One step dimmer, saturating at the minimum
    pub fn lower(&mut self) {
        self.level = self.level.saturating_sub(self.step).max(self.min);
    }

    /// Apply a set of presses; returns the new level if it changed
    ///
    /// Up is applied before down when both are pressed.
    pub fn apply(&mut self, buttons: Buttons) -> Option<u8> {
        let before = self.level;
        if buttons.contains(Buttons::BRIGHTNESS_UP) {
            self.raise();
        }
        if buttons.contains(Buttons::BRIGHTNESS_DOWN) {
            self.lower();
        }
        (self.level != before).then_some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness() -> Brightness {
        Brightness::new(&DisplayConfig::default())
    }

    #[test]
    fn test_default_level() {
        assert_eq!(brightness().level(), 215);
    }

    #[test]
    fn test_raise_saturates() {
        let mut b = brightness();
        assert_eq!(b.apply(Buttons::BRIGHTNESS_UP), Some(240));
        assert_eq!(b.apply(Buttons::BRIGHTNESS_UP), Some(255));
        assert_eq!(b.apply(Buttons::BRIGHTNESS_UP), None);
    }

    #[test]
    fn test_lower_stops_at_min() {
        let mut b = brightness();
        for _ in 0..20 {
            b.apply(Buttons::BRIGHTNESS_DOWN);
        }
        assert_eq!(b.level(), 10);
    }

    #[test]
    fn test_no_buttons_no_change() {
        let mut b = brightness();
        assert_eq!(b.apply(Buttons::empty()), None);
    }

    #[test]
    fn test_both_buttons_cancel_out() {
        let mut b = brightness();
        assert_eq!(b.apply(Buttons::all()), None);
        assert_eq!(b.level(), 215);
    }

    #[test]
    fn test_config_out_of_range_clamped() {
        let config = DisplayConfig {
            brightness: 2,
            ..Default::default()
        };
        assert_eq!(Brightness::new(&config).level(), 10);
    }
}
