//! Fixed layout for the 320x170 landscape panel
//!
//! All positions are top-left pixel coordinates unless noted.

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_6X10, FONT_7X13, FONT_9X15};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 170;

/// Vertical divider between the panels
pub const DIVIDER_X: i32 = 138;

/// Left panel: header, temperature, city and clock
pub const LEFT_PANEL: Rectangle =
    Rectangle::new(Point::new(0, 0), Size::new(DIVIDER_X as u32, SCREEN_HEIGHT));

/// Right panel above the ticker: sun times, readings and status line
pub const RIGHT_PANEL: Rectangle = Rectangle::new(
    Point::new(DIVIDER_X + 1, 0),
    Size::new(SCREEN_WIDTH - DIVIDER_X as u32 - 1, 147),
);

/// Rounded frame around the ticker strip
pub const TICKER_FRAME: Rectangle = Rectangle::new(Point::new(144, 148), Size::new(174, 16));

/// Visible ticker strip
pub const STRIP_ORIGIN: Point = Point::new(148, 150);
pub const STRIP_WIDTH: u32 = 164;
pub const STRIP_HEIGHT: u32 = 13;

pub const HEADER_FONT: &MonoFont<'static> = &FONT_9X15;
pub const TEMPERATURE_FONT: &MonoFont<'static> = &FONT_10X20;
pub const CLOCK_FONT: &MonoFont<'static> = &FONT_10X20;
pub const VALUE_FONT: &MonoFont<'static> = &FONT_7X13;
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;
pub const TICKER_FONT: &MonoFont<'static> = &FONT_7X13;

/// Temperature, centered
pub const TEMPERATURE_CENTER: Point = Point::new(50, 60);
pub const DEGREE_CENTER: Point = Point::new(103, 52);
pub const UNIT_POS: Point = Point::new(110, 50);

pub const CITY_LABEL_POS: Point = Point::new(6, 110);
pub const CITY_POS: Point = Point::new(42, 110);

pub const CLOCK_POS: Point = Point::new(6, 132);
pub const SECONDS_BOX: Rectangle = Rectangle::new(Point::new(90, 132), Size::new(42, 22));
pub const SECONDS_LABEL_POS: Point = Point::new(91, 157);

pub const SUNRISE_POS: Point = Point::new(144, 8);
pub const SUNSET_POS: Point = Point::new(144, 26);
pub const SUN_TIME_X: i32 = 210;
/// Condition icon, right of the sun times
pub const ICON_BOX: Rectangle = Rectangle::new(Point::new(292, 6), Size::new(24, 24));

/// Reading boxes: two rows of three
pub const BOX_ORIGIN: Point = Point::new(144, 53);
pub const BOX_SIZE: Size = Size::new(54, 32);
pub const BOX_PITCH_X: i32 = 60;
pub const BOX_PITCH_Y: i32 = 40;

pub const STATUS_POS: Point = Point::new(145, 134);
pub const COUNTER_POS: Point = Point::new(296, 134);
pub const LINK_CENTER: Point = Point::new(312, 139);

/// Reading box at `row`, `col`
pub const fn reading_box(row: i32, col: i32) -> Rectangle {
    Rectangle::new(
        Point::new(BOX_ORIGIN.x + col * BOX_PITCH_X, BOX_ORIGIN.y + row * BOX_PITCH_Y),
        BOX_SIZE,
    )
}

/// Advance of one ticker character (px)
pub const fn ticker_char_width() -> u32 {
    TICKER_FONT.character_size.width + TICKER_FONT.character_spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_inside_right_panel() {
        for row in 0..2 {
            for col in 0..3 {
                let b = reading_box(row, col);
                assert!(RIGHT_PANEL.contains(b.top_left));
                assert!(RIGHT_PANEL.contains(b.bottom_right().unwrap()));
            }
        }
    }

    #[test]
    fn test_strip_inside_frame() {
        let strip = Rectangle::new(STRIP_ORIGIN, Size::new(STRIP_WIDTH, STRIP_HEIGHT));
        assert!(TICKER_FRAME.contains(strip.top_left));
        assert!(TICKER_FRAME.contains(strip.bottom_right().unwrap()));
    }

    #[test]
    fn test_icon_box_clear_of_sun_times() {
        assert!(RIGHT_PANEL.contains(ICON_BOX.top_left));
        assert!(RIGHT_PANEL.contains(ICON_BOX.bottom_right().unwrap()));
        // "HH:MM:SS" after the sun labels
        let sun_time_end = SUN_TIME_X + 8 * VALUE_FONT.character_size.width as i32;
        assert!(ICON_BOX.top_left.x > sun_time_end);
        assert!(ICON_BOX.bottom_right().unwrap().y < BOX_ORIGIN.y);
    }

    #[test]
    fn test_ticker_font_fits_strip() {
        assert!(TICKER_FONT.character_size.height <= STRIP_HEIGHT);
    }
}
