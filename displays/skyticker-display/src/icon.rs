//! Weather condition icons
//!
//! OpenWeatherMap icon codes are two digits for the condition and a `d` or
//! `n` suffix for day or night. Each icon is composed from primitives inside
//! a [`ICON_SIZE`] square around its center.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, Polyline, PrimitiveStyle, Rectangle, RoundedRectangle,
};

use crate::palette::{BLACK, GRAYS};

/// Icon bounding square (px)
pub const ICON_SIZE: Size = Size::new(24, 24);

/// Condition group, from the first two characters of the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sky {
    Clear,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
}

impl Sky {
    /// Unknown codes read as clear sky
    pub fn from_code(code: &str) -> Self {
        match code.get(..2) {
            Some("02") => Sky::FewClouds,
            Some("03") => Sky::ScatteredClouds,
            Some("04") => Sky::BrokenClouds,
            Some("09") => Sky::ShowerRain,
            Some("10") => Sky::Rain,
            Some("11") => Sky::Thunderstorm,
            Some("13") => Sky::Snow,
            Some("50") => Sky::Mist,
            _ => Sky::Clear,
        }
    }
}

/// Icon for one code, positioned by its center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherIcon {
    pub sky: Sky,
    pub night: bool,
    pub center: Point,
}

impl WeatherIcon {
    pub fn new(code: &str, center: Point) -> Self {
        Self {
            sky: Sky::from_code(code),
            night: code.ends_with('n'),
            center,
        }
    }

    /// Area the icon may draw into
    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::with_center(self.center, ICON_SIZE)
    }
}

const SUN: Rgb565 = GRAYS[1];
const CLOUD: Rgb565 = GRAYS[2];
const BACK_CLOUD: Rgb565 = GRAYS[6];
const STORM_CLOUD: Rgb565 = GRAYS[5];
const PRECIPITATION: Rgb565 = GRAYS[3];

const RAYS: [((i32, i32), (i32, i32)); 8] = [
    ((0, -7), (0, -10)),
    ((0, 7), (0, 10)),
    ((-7, 0), (-10, 0)),
    ((7, 0), (10, 0)),
    ((5, -5), (7, -7)),
    ((-5, -5), (-7, -7)),
    ((5, 5), (7, 7)),
    ((-5, 5), (-7, 7)),
];

impl Drawable for WeatherIcon {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let c = self.center;
        let at = |x, y| c + Point::new(x, y);

        match self.sky {
            Sky::Clear if self.night => moon(target, c, 13),
            Sky::Clear => {
                for ((x0, y0), (x1, y1)) in RAYS {
                    Line::new(at(x0, y0), at(x1, y1))
                        .into_styled(PrimitiveStyle::with_stroke(SUN, 1))
                        .draw(target)?;
                }
                disc(target, c, 9, SUN)
            }
            Sky::FewClouds => {
                self.small_light(target, at(-5, -5))?;
                cloud(target, at(2, 4), CLOUD)
            }
            Sky::ScatteredClouds => cloud(target, at(0, 2), CLOUD),
            Sky::BrokenClouds => {
                cloud(target, at(2, -2), BACK_CLOUD)?;
                cloud(target, at(-1, 4), CLOUD)
            }
            Sky::ShowerRain => {
                cloud(target, at(0, -2), CLOUD)?;
                drops(target, at(0, 5))
            }
            Sky::Rain => {
                self.small_light(target, at(-6, -6))?;
                cloud(target, at(1, -1), CLOUD)?;
                drops(target, at(2, 6))
            }
            Sky::Thunderstorm => {
                cloud(target, at(0, -3), STORM_CLOUD)?;
                let bolt = [at(1, 2), at(-3, 7), at(1, 7), at(-2, 11)];
                Polyline::new(&bolt)
                    .into_styled(PrimitiveStyle::with_stroke(SUN, 1))
                    .draw(target)
            }
            Sky::Snow => {
                cloud(target, at(0, -3), CLOUD)?;
                for (x, y) in [(-6, 7), (0, 9), (6, 7)] {
                    disc(target, at(x, y), 3, GRAYS[0])?;
                }
                Ok(())
            }
            Sky::Mist => {
                for (x0, x1, y) in [(-10, 10, -5), (-8, 10, 0), (-10, 8, 5)] {
                    Line::new(at(x0, y), at(x1, y))
                        .into_styled(PrimitiveStyle::with_stroke(CLOUD, 2))
                        .draw(target)?;
                }
                Ok(())
            }
        }
    }
}

impl WeatherIcon {
    /// Sun or moon peeking out behind a cloud
    fn small_light<D>(&self, target: &mut D, c: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.night {
            moon(target, c, 9)
        } else {
            disc(target, c, 9, SUN)
        }
    }
}

fn disc<D>(target: &mut D, c: Point, diameter: u32, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(c, diameter)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

/// Crescent: a disc with a background-colored disc cut out of its upper right
fn moon<D>(target: &mut D, c: Point, diameter: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    disc(target, c, diameter, SUN)?;
    let d = diameter as i32;
    disc(target, c + Point::new(d / 3, -d / 4), diameter * 4 / 5, BLACK)
}

/// Cloud spanning x -10..=9 and y -8..=5 around `c`
fn cloud<D>(target: &mut D, c: Point, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(
        Rectangle::new(c + Point::new(-10, -1), Size::new(20, 7)),
        Size::new(3, 3),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(target)?;
    disc(target, c + Point::new(-4, -2), 9, color)?;
    disc(target, c + Point::new(3, -3), 11, color)
}

/// Three slanted drops starting on the row of `c`
fn drops<D>(target: &mut D, c: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for x in [-6, 0, 6] {
        let top = c + Point::new(x, 0);
        Line::new(top, top + Point::new(-2, 4))
            .into_styled(PrimitiveStyle::with_stroke(PRECIPITATION, 1))
            .draw(target)?;
    }
    Ok(())
}
