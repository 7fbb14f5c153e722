//! Brightness buttons
//!
//! Two momentary buttons wired to ground with the internal pull-ups
//! enabled. Reads go through the shared [`Debouncer`] so the core only ever
//! sees accepted presses.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use embassy_time::Instant;
use skyticker_core::traits::{Buttons, InputSource};
use skyticker_hal::{ButtonLine, Debouncer};

/// Button to ground on a pulled-up input
pub struct ButtonPin<'d>(Input<'d>);

impl<'d> ButtonPin<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl ButtonLine for ButtonPin<'_> {
    fn is_pressed(&self) -> bool {
        self.0.is_low()
    }
}

/// Up/down brightness buttons
pub struct BrightnessButtons<'d> {
    up: ButtonPin<'d>,
    down: ButtonPin<'d>,
    debouncer: Debouncer,
}

impl<'d> BrightnessButtons<'d> {
    pub fn new(up: ButtonPin<'d>, down: ButtonPin<'d>) -> Self {
        Self {
            up,
            down,
            debouncer: Debouncer::default(),
        }
    }
}

impl InputSource for BrightnessButtons<'_> {
    fn poll_buttons(&mut self) -> Buttons {
        let now_ms = Instant::now().as_millis();
        let [up, down] = self.debouncer.sample(now_ms, [&self.up, &self.down]);

        let mut buttons = Buttons::empty();
        buttons.set(Buttons::BRIGHTNESS_UP, up);
        buttons.set(Buttons::BRIGHTNESS_DOWN, down);
        buttons
    }
}
