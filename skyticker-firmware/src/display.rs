//! ST7789 panel bring-up
//!
//! 1.9" 170x320 IPS module on SPI1, used in landscape. The controller's
//! 240x320 RAM is offset by 35 columns for this glass.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;

use skyticker_display::Dashboard;

/// SPI clock for the panel
const SPI_FREQUENCY_HZ: u32 = 62_500_000;

/// Native (portrait) panel size
const PANEL_WIDTH: u16 = 170;
const PANEL_HEIGHT: u16 = 320;
const PANEL_COLUMN_OFFSET: u16 = 35;

pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;
pub type PanelInterface = SpiInterface<'static, PanelSpi, Output<'static>>;
pub type Panel = mipidsi::Display<PanelInterface, ST7789, Output<'static>>;
pub type PanelDashboard = Dashboard<Panel>;

/// Display command buffer
static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Panel pins, already claimed
pub struct PanelPins {
    pub spi: Spi<'static, SPI1, Blocking>,
    pub cs: Output<'static>,
    pub dc: Output<'static>,
    pub rst: Output<'static>,
}

/// SPI configuration for the panel
pub fn spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}

/// Initialise the controller and wrap it in the dashboard renderer
pub fn init(pins: PanelPins) -> Option<PanelDashboard> {
    let PanelPins { spi, mut cs, dc, rst } = pins;
    cs.set_level(Level::High);

    let device = ExclusiveDevice::new(spi, cs, Delay).ok()?;
    let buffer = SPI_BUFFER.init([0u8; 512]);
    let interface = SpiInterface::new(device, dc, buffer);

    let panel = Builder::new(ST7789, interface)
        .reset_pin(rst)
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .display_offset(PANEL_COLUMN_OFFSET, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Delay)
        .ok()?;

    Some(Dashboard::new(panel))
}
