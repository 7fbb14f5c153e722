//! PWM panel backlight

use embassy_rp::pwm::{ChannelBPin, Config as PwmConfig, Pwm, Slice};
use embassy_rp::Peri;
use skyticker_core::traits::Backlight;

/// PWM wrap value; one count per brightness level
const PWM_TOP: u16 = 255;

/// Backlight on a slice's B output
pub struct PwmBacklight<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmBacklight<'d> {
    /// Start dark; the orchestrator sets the configured level on start
    pub fn new<T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelBPin<T>>) -> Self {
        let mut config = PwmConfig::default();
        config.top = PWM_TOP;
        config.compare_b = 0;
        let pwm = Pwm::new_output_b(slice, pin, config.clone());
        Self { pwm, config }
    }
}

impl Backlight for PwmBacklight<'_> {
    fn set_brightness(&mut self, level: u8) {
        self.config.compare_b = level as u16;
        self.pwm.set_config(&self.config);
    }
}
