//! Configuration type definitions
//!
//! Every field has a default matching the reference device, so a config
//! file only needs to set what differs (typically Wi-Fi credentials and the
//! API key).

use core::fmt;

use heapless::String;

use crate::channel::MESSAGE_CAPACITY;
use crate::time::TimeZone;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current binary config layout version
pub const CONFIG_VERSION: u8 = 2;

/// Maximum location (city) length
pub const MAX_LOCATION_LEN: usize = 32;

/// Maximum API key length
pub const MAX_API_KEY_LEN: usize = 64;

/// Maximum host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Measurement system requested from the weather service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Units {
    /// °C, m/s
    #[default]
    Metric,
    /// °F, mph
    Imperial,
}

impl Units {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature unit letter shown after the degree mark
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    /// Wind speed unit as displayed
    pub fn wind_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }
}

/// What to ask the weather service for
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherQuery {
    /// City name, e.g. "Gatineau"
    pub location: String<MAX_LOCATION_LEN>,
    /// Service API key
    pub api_key: String<MAX_API_KEY_LEN>,
    /// Measurement system
    pub units: Units,
    /// Service host
    pub host: String<MAX_HOST_LEN>,
}

impl Default for WeatherQuery {
    fn default() -> Self {
        Self {
            location: String::try_from("Gatineau").unwrap_or_default(),
            api_key: String::new(),
            units: Units::Metric,
            host: String::try_from("api.openweathermap.org").unwrap_or_default(),
        }
    }
}

impl WeatherQuery {
    /// Request path and query string for current conditions
    pub fn path(&self) -> RequestPath<'_> {
        RequestPath(self)
    }
}

/// Display adapter producing `/data/2.5/weather?q=...&appid=...&units=...`
pub struct RequestPath<'a>(&'a WeatherQuery);

impl fmt::Display for RequestPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/data/2.5/weather?q=")?;
        write_encoded(f, &self.0.location)?;
        f.write_str("&appid=")?;
        write_encoded(f, &self.0.api_key)?;
        write!(f, "&units={}", self.0.units.as_str())
    }
}

/// Percent-encode everything outside the URI unreserved set
fn write_encoded(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                write!(f, "{}", byte as char)?
            }
            _ => write!(f, "%{:02X}", byte)?,
        }
    }
    Ok(())
}

/// Wi-Fi and time server settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkConfig {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
    pub ntp_server: String<MAX_HOST_LEN>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            ntp_server: String::try_from("pool.ntp.org").unwrap_or_default(),
        }
    }
}

/// Refresh and retry timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefreshConfig {
    /// Time between fetch cycles (ms)
    pub interval_ms: u32,
    /// Resync the clock after this many successful cycles
    pub resync_every: u8,
    /// Fetch attempts per cycle
    pub max_attempts: u8,
    /// Wait between failed attempts (ms)
    pub backoff_ms: u32,
    /// Upper bound on one fetch round trip (ms)
    pub fetch_timeout_ms: u32,
    /// Clock resync attempts per resync cycle
    pub resync_attempts: u8,
    /// Upper bound on one clock resync attempt (ms)
    pub sync_timeout_ms: u32,
}

impl RefreshConfig {
    /// Longest a fetch cycle can run, resync included (ms)
    ///
    /// Every attempt times out, every backoff is waited in full and the
    /// resync that may share the cycle's first tick uses all its attempts.
    pub fn worst_case_cycle_ms(&self) -> u64 {
        let attempts = self.max_attempts as u64;
        attempts * self.fetch_timeout_ms as u64
            + attempts.saturating_sub(1) * self.backoff_ms as u64
            + self.resync_attempts as u64 * self.sync_timeout_ms as u64
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 180_000,
            resync_every: 10,
            max_attempts: 3,
            backoff_ms: 5_000,
            fetch_timeout_ms: 10_000,
            resync_attempts: 10,
            sync_timeout_ms: 1_000,
        }
    }
}

/// Ticker animation and message settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickerConfig {
    /// Tick cadence (ms)
    pub tick_ms: u16,
    /// Scroll distance per tick (px)
    pub step: u8,
    /// Width of the scrolling strip (px); text enters at this x
    pub viewport_width: u16,
    /// Gap between the two message copies (px)
    pub spacing: u16,
    /// Message capacity in characters
    pub capacity: u16,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 25,
            step: 2,
            viewport_width: 164,
            spacing: 170,
            capacity: MESSAGE_CAPACITY as u16,
        }
    }
}

/// Backlight settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Level at boot
    pub brightness: u8,
    /// Change per button press
    pub brightness_step: u8,
    pub min_brightness: u8,
    pub max_brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            brightness: 215,
            brightness_step: 25,
            min_brightness: 10,
            max_brightness: 255,
        }
    }
}

/// Configuration rejected by [`DeviceConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidConfig {
    /// Refresh interval, tick cadence or a timeout is zero
    ZeroPeriod,
    /// A failing cycle could run into the next refresh interval
    CycleExceedsInterval,
    /// `max_attempts`, `resync_every` or `resync_attempts` is zero
    ZeroAttempts,
    /// Scroll step is zero
    ZeroStep,
    /// Message capacity is zero or above the hard limit
    Capacity,
    /// Copies would be visible together at a commit
    SpacingTooSmall,
    /// Brightness bounds are out of order
    BrightnessRange,
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Layout version for the binary form
    pub version: u8,
    pub weather: WeatherQuery,
    pub network: NetworkConfig,
    pub time: TimeZone,
    pub refresh: RefreshConfig,
    pub ticker: TickerConfig,
    pub display: DisplayConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            weather: WeatherQuery::default(),
            network: NetworkConfig::default(),
            time: TimeZone::default(),
            refresh: RefreshConfig::default(),
            ticker: TickerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the cross-field constraints the runtime relies on
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let r = &self.refresh;
        if r.interval_ms == 0
            || r.fetch_timeout_ms == 0
            || r.sync_timeout_ms == 0
            || self.ticker.tick_ms == 0
        {
            return Err(InvalidConfig::ZeroPeriod);
        }
        if r.max_attempts == 0 || r.resync_every == 0 || r.resync_attempts == 0 {
            return Err(InvalidConfig::ZeroAttempts);
        }
        // Cycles start only from Idle, so a cycle that outlives the interval
        // pushes every later cycle back.
        if r.worst_case_cycle_ms() >= r.interval_ms as u64 {
            return Err(InvalidConfig::CycleExceedsInterval);
        }

        let t = &self.ticker;
        if t.step == 0 {
            return Err(InvalidConfig::ZeroStep);
        }
        if t.capacity == 0 || t.capacity as usize > MESSAGE_CAPACITY {
            return Err(InvalidConfig::Capacity);
        }
        // The trailing copy must still be off the right edge when the
        // leading copy has fully left on the left.
        if (t.spacing as u32) < t.viewport_width as u32 + t.step as u32 {
            return Err(InvalidConfig::SpacingTooSmall);
        }

        let d = &self.display;
        if d.min_brightness > d.max_brightness
            || !(d.min_brightness..=d.max_brightness).contains(&d.brightness)
        {
            return Err(InvalidConfig::BrightnessRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(DeviceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_values() {
        let config = DeviceConfig::default();
        assert_eq!(config.refresh.interval_ms, 180_000);
        assert_eq!(config.refresh.resync_every, 10);
        assert_eq!(config.refresh.max_attempts, 3);
        assert_eq!(config.refresh.backoff_ms, 5_000);
        assert_eq!(config.refresh.fetch_timeout_ms, 10_000);
        assert_eq!(config.refresh.sync_timeout_ms, 1_000);
        assert_eq!(config.ticker.tick_ms, 25);
        assert_eq!(config.ticker.step, 2);
        assert_eq!(config.ticker.capacity, 511);
        assert_eq!(config.display.brightness, 215);
        assert_eq!(config.weather.location.as_str(), "Gatineau");
    }

    #[test]
    fn test_validate_rejects_tight_spacing() {
        let mut config = DeviceConfig::default();
        config.ticker.spacing = 80;
        assert_eq!(config.validate(), Err(InvalidConfig::SpacingTooSmall));
    }

    #[test]
    fn test_worst_case_cycle() {
        // 3 x 10 s attempts, 2 x 5 s backoff, 10 x 1 s resync
        assert_eq!(RefreshConfig::default().worst_case_cycle_ms(), 50_000);
    }

    #[test]
    fn test_validate_rejects_retries_past_interval() {
        let mut config = DeviceConfig::default();
        config.refresh.interval_ms = 10_000;
        config.refresh.backoff_ms = 6_000;
        assert_eq!(config.validate(), Err(InvalidConfig::CycleExceedsInterval));

        // Exactly filling the interval is still too long
        config.refresh.interval_ms = 50_000;
        config.refresh.backoff_ms = 5_000;
        assert_eq!(config.validate(), Err(InvalidConfig::CycleExceedsInterval));
        config.refresh.interval_ms = 50_001;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_zero_sync_timeout() {
        let mut config = DeviceConfig::default();
        config.refresh.sync_timeout_ms = 0;
        assert_eq!(config.validate(), Err(InvalidConfig::ZeroPeriod));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = DeviceConfig::default();
        config.refresh.max_attempts = 0;
        assert_eq!(config.validate(), Err(InvalidConfig::ZeroAttempts));
    }

    #[test]
    fn test_validate_rejects_capacity_over_limit() {
        let mut config = DeviceConfig::default();
        config.ticker.capacity = 512;
        assert_eq!(config.validate(), Err(InvalidConfig::Capacity));
    }

    #[test]
    fn test_validate_rejects_brightness_out_of_bounds() {
        let mut config = DeviceConfig::default();
        config.display.brightness = 5;
        assert_eq!(config.validate(), Err(InvalidConfig::BrightnessRange));
    }

    #[test]
    fn test_request_path_encodes_location() {
        let mut query = WeatherQuery::default();
        query.location = String::try_from("St. John's").unwrap();
        query.api_key = String::try_from("abc123").unwrap();
        assert_eq!(
            query.path().to_string(),
            "/data/2.5/weather?q=St.%20John%27s&appid=abc123&units=metric"
        );
    }
}
