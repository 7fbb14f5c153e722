//! Button input trait

use bitflags::bitflags;

bitflags! {
    /// Buttons pressed since the last poll
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const BRIGHTNESS_UP = 1 << 0;
        const BRIGHTNESS_DOWN = 1 << 1;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Buttons {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Buttons({=u8:#04x})", self.bits())
    }
}

/// Source of debounced button presses
pub trait InputSource {
    /// Presses since the last poll; empty if none
    fn poll_buttons(&mut self) -> Buttons;
}
