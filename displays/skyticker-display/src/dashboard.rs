//! Two-panel weather dashboard
//!
//! Panels are redrawn only when something they show changes (at most once
//! a second, when the clock ticks). The ticker strip is recomposed and
//! pushed every frame.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use skyticker_core::config::Units;
use skyticker_core::time::ClockTime;
use skyticker_core::traits::{Frame, RenderError, Renderer};
use skyticker_core::weather::Snapshot;

use crate::icon::WeatherIcon;
use crate::layout::*;
use crate::palette::{BLACK, GRAYS};
use crate::strip::TickerStrip;

const TOP_LABELS: [&str; 3] = ["FEELS", "CLOUDS", "VISIBIL."];
const BOTTOM_LABELS: [&str; 3] = ["HUMIDITY", "PRESSURE", "WIND"];
const MISSING: &str = "--";

type Value = String<16>;

/// What the panels currently show
#[derive(Clone, PartialEq)]
struct PanelState {
    snapshot: Option<Snapshot>,
    clock: Option<ClockTime>,
    update_count: u32,
    connected: bool,
}

impl PanelState {
    fn of(frame: &Frame<'_>) -> Self {
        Self {
            snapshot: frame.snapshot.cloned(),
            clock: frame.clock,
            update_count: frame.update_count,
            connected: frame.connected,
        }
    }
}

/// Dashboard renderer over an RGB565 draw target
pub struct Dashboard<D> {
    target: D,
    strip: TickerStrip,
    drawn: Option<PanelState>,
}

impl<D> Dashboard<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            strip: TickerStrip::new(),
            drawn: None,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    fn draw_chrome(&mut self) -> Result<(), D::Error> {
        self.target.clear(BLACK)?;
        Line::new(Point::new(DIVIDER_X, 10), Point::new(DIVIDER_X, 164))
            .into_styled(PrimitiveStyle::with_stroke(GRAYS[6], 1))
            .draw(&mut self.target)?;
        RoundedRectangle::with_equal_corners(TICKER_FRAME, Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(GRAYS[10]))
            .draw(&mut self.target)
    }

    fn draw_left(&mut self, frame: &Frame<'_>) -> Result<(), D::Error> {
        let target = &mut self.target.clipped(&LEFT_PANEL);
        target.clear(BLACK)?;

        text(target, "WEATHER", Point::new(6, 10), HEADER_FONT, GRAYS[1], Alignment::Left)?;
        text(target, "MICRO", Point::new(88, 10), LABEL_FONT, GRAYS[5], Alignment::Left)?;
        text(target, "STATION", Point::new(88, 20), LABEL_FONT, GRAYS[5], Alignment::Left)?;

        let temperature = match frame.snapshot {
            Some(snap) => fixed(snap.temperature(), 1),
            None => Value::try_from("--.-").unwrap_or_default(),
        };
        Text::with_text_style(
            &temperature,
            TEMPERATURE_CENTER,
            MonoTextStyle::new(TEMPERATURE_FONT, GRAYS[0]),
            TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Middle)
                .build(),
        )
        .draw(target)?;

        Circle::with_center(DEGREE_CENTER, 5)
            .into_styled(PrimitiveStyle::with_stroke(GRAYS[2], 1))
            .draw(target)?;
        text(
            target,
            frame.units.temperature_symbol(),
            UNIT_POS,
            VALUE_FONT,
            GRAYS[2],
            Alignment::Left,
        )?;

        Line::new(Point::new(100, 105), Point::new(134, 105))
            .into_styled(PrimitiveStyle::with_stroke(GRAYS[6], 1))
            .draw(target)?;

        text(target, "CITY:", CITY_LABEL_POS, LABEL_FONT, GRAYS[7], Alignment::Left)?;
        text(target, frame.location, CITY_POS, LABEL_FONT, GRAYS[3], Alignment::Left)?;

        let (hm, ss) = match frame.clock {
            Some(t) => clock_parts(t),
            None => (
                Value::try_from("--:--").unwrap_or_default(),
                Value::try_from(MISSING).unwrap_or_default(),
            ),
        };
        text(target, &hm, CLOCK_POS, CLOCK_FONT, GRAYS[4], Alignment::Left)?;

        RoundedRectangle::with_equal_corners(SECONDS_BOX, Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(GRAYS[2]))
            .draw(target)?;
        Text::with_text_style(
            &ss,
            SECONDS_BOX.center(),
            MonoTextStyle::new(VALUE_FONT, BLACK),
            TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Middle)
                .build(),
        )
        .draw(target)?;
        text(target, "SECONDS", SECONDS_LABEL_POS, LABEL_FONT, GRAYS[5], Alignment::Left)?;

        Ok(())
    }

    fn draw_right(&mut self, frame: &Frame<'_>) -> Result<(), D::Error> {
        let target = &mut self.target.clipped(&RIGHT_PANEL);
        target.clear(BLACK)?;

        let snapshot = frame.snapshot;

        text(target, "sunrise:", SUNRISE_POS, VALUE_FONT, GRAYS[1], Alignment::Left)?;
        text(target, "sunset:", SUNSET_POS, VALUE_FONT, GRAYS[1], Alignment::Left)?;
        for (pos, time) in [
            (SUNRISE_POS, snapshot.and_then(|s| s.sunrise())),
            (SUNSET_POS, snapshot.and_then(|s| s.sunset())),
        ] {
            let value = sun_time(time);
            let at = Point::new(SUN_TIME_X, pos.y + 2);
            text(target, &value, at, VALUE_FONT, GRAYS[3], Alignment::Left)?;
        }
        if let Some(snap) = snapshot {
            WeatherIcon::new(snap.icon(), ICON_BOX.center()).draw(target)?;
        }

        let values = readings(snapshot, frame.units);
        for (row, labels) in [TOP_LABELS, BOTTOM_LABELS].iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                let area = reading_box(row as i32, col as i32);
                RoundedRectangle::with_equal_corners(area, Size::new(3, 3))
                    .into_styled(PrimitiveStyle::with_fill(GRAYS[9]))
                    .draw(target)?;

                let cx = area.top_left.x + area.size.width as i32 / 2;
                let top = area.top_left.y;
                text(
                    target,
                    label,
                    Point::new(cx, top + 3),
                    LABEL_FONT,
                    GRAYS[3],
                    Alignment::Center,
                )?;
                text(
                    target,
                    &values[row * 3 + col],
                    Point::new(cx, top + 16),
                    VALUE_FONT,
                    GRAYS[2],
                    Alignment::Center,
                )?;
            }
        }

        text(target, "CURRENT CONDITIONS", STATUS_POS, LABEL_FONT, GRAYS[4], Alignment::Left)?;
        let mut counter = Value::new();
        let _ = write!(counter, "{}", frame.update_count);
        text(target, &counter, COUNTER_POS, LABEL_FONT, GRAYS[9], Alignment::Right)?;

        let link = Circle::with_center(LINK_CENTER, 7);
        if frame.connected {
            link.into_styled(PrimitiveStyle::with_fill(GRAYS[1])).draw(target)?;
        } else {
            link.into_styled(PrimitiveStyle::with_stroke(GRAYS[6], 1)).draw(target)?;
        }

        Ok(())
    }
}

impl<D> Renderer for Dashboard<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn measure(&mut self, text: &str) -> u32 {
        text.chars().count() as u32 * ticker_char_width()
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let state = PanelState::of(frame);
        if self.drawn.as_ref() != Some(&state) {
            if self.drawn.is_none() {
                self.draw_chrome().map_err(|_| RenderError::Bus)?;
            }
            self.draw_left(frame).map_err(|_| RenderError::Bus)?;
            self.draw_right(frame).map_err(|_| RenderError::Bus)?;
            self.drawn = Some(state);
        }

        self.strip
            .compose(frame.message, frame.offset, frame.extent, frame.spacing);
        self.strip
            .blit(&mut self.target, STRIP_ORIGIN)
            .map_err(|_| RenderError::Bus)
    }
}

/// Left/center/right aligned text with its top at `pos.y`
fn text<D>(
    target: &mut D,
    s: &str,
    pos: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
    alignment: Alignment,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(s, pos, MonoTextStyle::new(font, color), style).draw(target)?;
    Ok(())
}

fn fixed(value: f32, decimals: usize) -> Value {
    let mut s = Value::new();
    let _ = write!(s, "{:.*}", decimals, value);
    s
}

fn clock_parts(t: ClockTime) -> (Value, Value) {
    let mut hm = Value::new();
    let mut ss = Value::new();
    let _ = write!(hm, "{:02}:{:02}", t.hour(), t.minute());
    let _ = write!(ss, "{:02}", t.second());
    (hm, ss)
}

fn sun_time(time: Option<ClockTime>) -> Value {
    let mut s = Value::new();
    match time {
        Some(t) => {
            let _ = write!(s, "{}", t);
        }
        None => {
            let _ = s.push_str("--:--");
        }
    }
    s
}

/// Box values in label order: feels, clouds, visibility, humidity, pressure, wind
fn readings(snapshot: Option<&Snapshot>, units: Units) -> [Value; 6] {
    let Some(snap) = snapshot else {
        return core::array::from_fn(|_| Value::try_from(MISSING).unwrap_or_default());
    };

    let mut values: [Value; 6] = Default::default();
    let _ = write!(values[0], "{:.1}\u{b0}{}", snap.feels_like(), units.temperature_symbol());
    let _ = write!(values[1], "{:.0}%", snap.cloud_coverage());
    let _ = write!(values[2], "{:.0} km", snap.visibility_km());
    let _ = write!(values[3], "{:.0}%", snap.humidity());
    let _ = write!(values[4], "{:.0}hPa", snap.pressure());
    let _ = write!(values[5], "{:.0}{}", snap.wind_speed_in(units), units.wind_symbol());
    values
}
