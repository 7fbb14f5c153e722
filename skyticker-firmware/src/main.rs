//! Skyticker - Ambient Weather Display Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W driving a 320x170
//! ST7789 panel. Current conditions are fetched over Wi-Fi every few
//! minutes and shown on a two-panel dashboard with a scrolling summary.
//!
//! Pin assignments:
//!
//! | Function        | Pin             |
//! |-----------------|-----------------|
//! | Panel SCK/MOSI  | GP10 / GP11     |
//! | Panel CS/DC/RST | GP9 / GP8 / GP12|
//! | Backlight PWM   | GP13 (PWM6 B)   |
//! | Brightness +/-  | GP15 / GP14     |
//! | CYW43 radio     | GP23/24/25/29   |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_net::tcp::client::TcpClientState;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH1, FLASH, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::spi::Spi;
use embassy_rp::Peri;
use embassy_time::{with_timeout, Duration, Timer};
use rand_core::RngCore;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use skyticker_core::config::DeviceConfig;
use skyticker_core::Orchestrator;
use skyticker_hal_rp2040::backlight::PwmBacklight;
use skyticker_hal_rp2040::flash::FlashStorage;
use skyticker_hal_rp2040::input::{BrightnessButtons, ButtonPin};

use crate::channels::{AppStatus, STATUS};
use crate::config::ConfigPersistence;
use crate::display::PanelPins;
use crate::net::weather::{WeatherTcpClient, TLS_READ_LEN, TLS_WRITE_LEN};
use crate::net::{HttpWeatherSource, SntpClock};

mod channels;
mod config;
mod display;
mod net;
mod tasks;

/// Embedded default configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// CYW43 firmware and CLM blobs, flashed separately with probe-rs:
///
/// ```text
/// probe-rs download 43439A0.bin --binary-format bin --chip RP2040 --base-address 0x10100000
/// probe-rs download 43439A0_clm.bin --binary-format bin --chip RP2040 --base-address 0x10140000
/// ```
///
/// Lengths must match the blobs shipped with the cyw43 crate version in use.
const CYW43_FW_ADDR: usize = 0x1010_0000;
const CYW43_FW_LEN: usize = 231_077;
const CYW43_CLM_ADDR: usize = 0x1014_0000;
const CYW43_CLM_LEN: usize = 984;

/// How long to wait for a DHCP lease before starting anyway
const DHCP_TIMEOUT_S: u64 = 30;

/// Main loop heartbeat period
const HEARTBEAT_S: u64 = 30;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<5>> = StaticCell::new();
static TCP_STATE: StaticCell<TcpClientState<1, 1024, 1024>> = StaticCell::new();
static TCP_CLIENT: StaticCell<WeatherTcpClient> = StaticCell::new();
static TLS_READ: StaticCell<[u8; TLS_READ_LEN]> = StaticCell::new();
static TLS_WRITE: StaticCell<[u8; TLS_WRITE_LEN]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Skyticker firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config(p.FLASH, p.DMA_CH1).await;
    if let Err(e) = config.validate() {
        error!("Configuration rejected: {}", e);
        cortex_m::peripheral::SCB::sys_reset();
    }

    // Radio
    let (fw, clm) = cyw43_blobs();
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = cyw43_pio::PioSpi::new(
        &mut pio.common,
        pio.sm0,
        cyw43_pio::DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(tasks::cyw43_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("CYW43 initialized");

    // IP stack
    let seed = RoscRng.next_u64();
    let (stack, net_runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(tasks::net_task(net_runner)).unwrap();

    if net::wifi::join(&mut control, &config.network).await.is_err() {
        error!(
            "Could not join {} after {} attempts",
            config.network.ssid.as_str(),
            net::wifi::JOIN_ATTEMPTS
        );
        cortex_m::peripheral::SCB::sys_reset();
    }

    wait_for_lease(stack).await;

    // Panel
    let panel_pins = PanelPins {
        spi: Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, display::spi_config()),
        cs: Output::new(p.PIN_9, Level::High),
        dc: Output::new(p.PIN_8, Level::Low),
        rst: Output::new(p.PIN_12, Level::High),
    };
    let Some(dashboard) = display::init(panel_pins) else {
        error!("Panel initialization failed");
        cortex_m::peripheral::SCB::sys_reset();
    };
    info!("Panel initialized");

    let backlight = PwmBacklight::new(p.PWM_SLICE6, p.PIN_13);
    let buttons = BrightnessButtons::new(ButtonPin::new(p.PIN_15), ButtonPin::new(p.PIN_14));

    // Collaborators
    let tcp = TCP_CLIENT.init(WeatherTcpClient::new(
        stack,
        TCP_STATE.init(TcpClientState::new()),
    ));
    let source = HttpWeatherSource::new(
        stack,
        tcp,
        TLS_READ.init([0; TLS_READ_LEN]),
        TLS_WRITE.init([0; TLS_WRITE_LEN]),
        config.time,
        config.refresh.fetch_timeout_ms,
    );
    let clock = SntpClock::new(
        stack,
        config.network.ntp_server.clone(),
        config.refresh.sync_timeout_ms,
    );

    let app = Orchestrator::new(&config, source, clock, dashboard, buttons, backlight);
    spawner
        .spawn(tasks::display_task(app, config.ticker.tick_ms))
        .unwrap();

    info!("All tasks spawned, firmware running");

    let mut status = AppStatus::default();
    let mut frames_at_last_beat = 0;
    loop {
        Timer::after_secs(HEARTBEAT_S).await;
        if let Some(latest) = STATUS.try_take() {
            status = latest;
        }
        let fps = status.frames.wrapping_sub(frames_at_last_beat) / HEARTBEAT_S as u32;
        frames_at_last_beat = status.frames;
        info!(
            "Heartbeat: link {}, ip {}, {} fps, {:?}",
            stack.is_link_up(),
            stack.is_config_up(),
            fps,
            status
        );
    }
}

/// Resolve the configuration from flash or the embedded default
async fn load_config(flash: Peri<'static, FLASH>, dma: Peri<'static, DMA_CH1>) -> DeviceConfig {
    let mut persistence = ConfigPersistence::new(FlashStorage::new(flash, dma));
    let (config, source) = persistence.resolve(EMBEDDED_CONFIG).await;
    config::log_config_summary(&config, source);
    config
}

/// Wait for DHCP, but start the display regardless
async fn wait_for_lease(stack: Stack<'static>) {
    match with_timeout(Duration::from_secs(DHCP_TIMEOUT_S), stack.wait_config_up()).await {
        Ok(()) => {
            if let Some(v4) = stack.config_v4() {
                info!("DHCP lease {}", v4.address);
            }
        }
        Err(_) => warn!("No DHCP lease after {} s, continuing", DHCP_TIMEOUT_S),
    }
}

/// CYW43 firmware and CLM blobs from their flash locations
fn cyw43_blobs() -> (&'static [u8], &'static [u8]) {
    // SAFETY: both regions lie in XIP flash above the application image
    // (see memory.x) and are never written at runtime.
    unsafe {
        (
            core::slice::from_raw_parts(CYW43_FW_ADDR as *const u8, CYW43_FW_LEN),
            core::slice::from_raw_parts(CYW43_CLM_ADDR as *const u8, CYW43_CLM_LEN),
        )
    }
}
