//! Grayscale palette
//!
//! Thirteen levels from light (index 0) to dark, 20 apart starting at 210
//! and clamped at black.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Number of gray levels
pub const GRAY_LEVELS: usize = 13;

pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Palette, lightest first
pub const GRAYS: [Rgb565; GRAY_LEVELS] = grays();

/// 8-bit gray to RGB565
pub const fn gray(value: u8) -> Rgb565 {
    Rgb565::new(value >> 3, value >> 2, value >> 3)
}

const fn grays() -> [Rgb565; GRAY_LEVELS] {
    let mut out = [BLACK; GRAY_LEVELS];
    let mut i = 0;
    while i < GRAY_LEVELS {
        let value = 210 - 20 * i as i32;
        out[i] = gray(if value > 0 { value as u8 } else { 0 });
        i += 1;
    }
    out
}
