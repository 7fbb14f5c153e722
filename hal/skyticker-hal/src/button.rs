//! Push-button lines

/// A momentary button as wired on the board
///
/// Implementations fold in the wiring polarity, so `is_pressed` is true
/// while the button is held regardless of pull direction.
pub trait ButtonLine {
    fn is_pressed(&self) -> bool;
}
