//! Network adapters
//!
//! Wi-Fi association plus the firmware implementations of the core's
//! `DataSource` and `ClockSource`.

pub mod sntp;
pub mod weather;
pub mod wifi;

pub use sntp::SntpClock;
pub use weather::HttpWeatherSource;
