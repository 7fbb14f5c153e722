//! Panel backlight trait

/// PWM-driven backlight
pub trait Backlight {
    /// Set the backlight level, 0 = off, 255 = full
    fn set_brightness(&mut self, level: u8);
}
