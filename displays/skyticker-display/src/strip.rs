//! Off-screen ticker strip
//!
//! The message is composed here and pushed to the panel as one contiguous
//! rectangle, so a partially drawn strip is never visible.

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use crate::layout::{STRIP_HEIGHT, STRIP_WIDTH, TICKER_FONT};
use crate::palette::GRAYS;

const PIXELS: usize = (STRIP_WIDTH * STRIP_HEIGHT) as usize;

pub const STRIP_BACKGROUND: Rgb565 = GRAYS[10];
pub const STRIP_TEXT: Rgb565 = GRAYS[1];

/// In-memory RGB565 buffer the size of the visible strip
pub struct TickerStrip {
    pixels: [Rgb565; PIXELS],
}

impl Default for TickerStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerStrip {
    pub const fn new() -> Self {
        Self {
            pixels: [STRIP_BACKGROUND; PIXELS],
        }
    }

    /// Compose both ticker copies
    ///
    /// The leading copy starts at `offset`, the trailing one at
    /// `offset + extent + spacing`. Anything outside the strip is clipped.
    pub fn compose(&mut self, message: &str, offset: i32, extent: i32, spacing: i32) {
        self.pixels.fill(STRIP_BACKGROUND);

        let style = MonoTextStyleBuilder::new()
            .font(TICKER_FONT)
            .text_color(STRIP_TEXT)
            .build();

        for x in [offset, offset + extent + spacing] {
            if x >= STRIP_WIDTH as i32 || x + extent <= 0 {
                continue;
            }
            // Drawing into memory cannot fail
            let _ = Text::with_baseline(message, Point::new(x, 0), style, Baseline::Top).draw(self);
        }
    }

    /// Push the strip to `target` with its top-left at `origin`
    pub fn blit<D>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = Rectangle::new(origin, self.size());
        target.fill_contiguous(&area, self.pixels.iter().copied())
    }

    /// Pixel at `point`, if inside the strip
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        index(point).map(|i| self.pixels[i])
    }
}

fn index(point: Point) -> Option<usize> {
    let (x, y) = (point.x, point.y);
    if x < 0 || y < 0 || x >= STRIP_WIDTH as i32 || y >= STRIP_HEIGHT as i32 {
        return None;
    }
    Some(y as usize * STRIP_WIDTH as usize + x as usize)
}

impl OriginDimensions for TickerStrip {
    fn size(&self) -> Size {
        Size::new(STRIP_WIDTH, STRIP_HEIGHT)
    }
}

impl DrawTarget for TickerStrip {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ticker_char_width;

    fn lit_columns(strip: &TickerStrip) -> impl Iterator<Item = i32> + '_ {
        (0..STRIP_WIDTH as i32).filter(move |x| {
            (0..STRIP_HEIGHT as i32)
                .any(|y| strip.pixel(Point::new(*x, y)) != Some(STRIP_BACKGROUND))
        })
    }

    #[test]
    fn test_new_strip_is_background() {
        let strip = TickerStrip::new();
        assert_eq!(lit_columns(&strip).count(), 0);
    }

    #[test]
    fn test_leading_copy_at_offset() {
        let mut strip = TickerStrip::new();
        let extent = 3 * ticker_char_width() as i32;
        strip.compose("HHH", 10, extent, 200);

        let first = lit_columns(&strip).next().unwrap();
        let last = lit_columns(&strip).last().unwrap();
        assert!(first >= 10);
        assert!(last < 10 + extent);
    }

    #[test]
    fn test_trailing_copy_follows_spacing() {
        let mut strip = TickerStrip::new();
        let extent = 2 * ticker_char_width() as i32;
        // Leading copy fully off the left edge; trailing copy at x=20
        let offset = 20 - extent - 30;
        strip.compose("HH", offset, extent, 30);

        let first = lit_columns(&strip).next().unwrap();
        assert!(first >= 20);
        assert!(first < 20 + extent);
    }

    #[test]
    fn test_message_off_strip_draws_nothing() {
        let mut strip = TickerStrip::new();
        strip.compose("HELLO", STRIP_WIDTH as i32, 35, 170);
        assert_eq!(lit_columns(&strip).count(), 0);
    }

    #[test]
    fn test_compose_clears_previous_frame() {
        let mut strip = TickerStrip::new();
        strip.compose("HHHH", 0, 28, 170);
        strip.compose("HHHH", 100, 28, 170);
        assert!(lit_columns(&strip).all(|x| x >= 100));
    }
}
