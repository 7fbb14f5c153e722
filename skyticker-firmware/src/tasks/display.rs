//! Tick task driving the orchestrator
//!
//! One tick per `tick_ms`: input, ticker advance, fetch cycle step and a
//! frame. The fetch step awaits inside the tick, so the animation pauses
//! for at most one fetch timeout (plus a bounded resync). After such a
//! pause the ticker is restarted instead of replaying the missed ticks.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use skyticker_core::Orchestrator;
use skyticker_hal_rp2040::backlight::PwmBacklight;
use skyticker_hal_rp2040::input::BrightnessButtons;

use crate::channels::{AppStatus, STATUS};
use crate::display::PanelDashboard;
use crate::net::{HttpWeatherSource, SntpClock};

pub type App = Orchestrator<
    HttpWeatherSource,
    SntpClock,
    PanelDashboard,
    BrightnessButtons<'static>,
    PwmBacklight<'static>,
>;

#[embassy_executor::task]
pub async fn display_task(mut app: App, tick_ms: u16) {
    info!("Display task started");

    app.start().await;

    let period = Duration::from_millis(tick_ms as u64);
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        let started = Instant::now();
        app.tick(started.as_millis()).await;

        if started.elapsed() > period {
            debug!("Tick overran by {} ms", (started.elapsed() - period).as_millis());
            ticker.reset();
        }

        STATUS.signal(status_of(&app));
    }
}

fn status_of(app: &App) -> AppStatus {
    AppStatus {
        connected: app.is_connected(),
        update_count: app.timer().success_count(),
        brightness: app.brightness(),
        frames: app.frames(),
    }
}
