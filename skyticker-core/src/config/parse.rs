//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the device configuration file. It does NOT support the full TOML grammar
//! and does not allocate.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings and escape sequences
//! - Dotted keys

use heapless::String;

use super::types::{DeviceConfig, Units};
use crate::time::DstRule;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String does not fit its field
    TooLong,
    /// Line is neither a header nor `key = value`
    MalformedLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Weather,
    Network,
    Time,
    Refresh,
    Ticker,
    Display,
}

/// Parse TOML text into a [`DeviceConfig`]
///
/// Keys that are not set keep their defaults. Unknown keys are ignored so
/// older firmware accepts newer files.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = strip_comment(line);
            if !header.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(header[1..header.len() - 1].trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::MalformedLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header {
        "weather" => Ok(Section::Weather),
        "network" => Ok(Section::Network),
        "time" => Ok(Section::Time),
        "refresh" => Ok(Section::Refresh),
        "ticker" => Ok(Section::Ticker),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_str(value: &str) -> Result<&str, ParseError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else if value.starts_with('"') || value.ends_with('"') {
        Err(ParseError::InvalidValue)
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a string into a bounded field
fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_str(value)?).map_err(|_| ParseError::TooLong)
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for ch in value.chars().filter(|c| *c != '_') {
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_units(value: &str) -> Result<Units, ParseError> {
    match parse_str(value)? {
        "metric" => Ok(Units::Metric),
        "imperial" => Ok(Units::Imperial),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_dst(value: &str) -> Result<DstRule, ParseError> {
    match parse_str(value)? {
        "none" => Ok(DstRule::None),
        "north_america" => Ok(DstRule::NorthAmerica),
        "europe" => Ok(DstRule::Europe),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "version" {
                config.version = parse_int(value)?;
            }
        }
        Section::Weather => {
            let w = &mut config.weather;
            match key {
                "location" | "city" => w.location = parse_string(value)?,
                "api_key" => w.api_key = parse_string(value)?,
                "units" => w.units = parse_units(value)?,
                "host" => w.host = parse_string(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Network => {
            let n = &mut config.network;
            match key {
                "ssid" => n.ssid = parse_string(value)?,
                "password" => n.password = parse_string(value)?,
                "ntp_server" => n.ntp_server = parse_string(value)?,
                _ => {}
            }
        }
        Section::Time => match key {
            "utc_offset_s" => config.time.utc_offset_s = parse_int(value)?,
            "dst" => config.time.dst = parse_dst(value)?,
            _ => {}
        },
        Section::Refresh => {
            let r = &mut config.refresh;
            match key {
                "interval_ms" => r.interval_ms = parse_int(value)?,
                "resync_every" => r.resync_every = parse_int(value)?,
                "max_attempts" => r.max_attempts = parse_int(value)?,
                "backoff_ms" => r.backoff_ms = parse_int(value)?,
                "fetch_timeout_ms" => r.fetch_timeout_ms = parse_int(value)?,
                "resync_attempts" => r.resync_attempts = parse_int(value)?,
                "sync_timeout_ms" => r.sync_timeout_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Ticker => {
            let t = &mut config.ticker;
            match key {
                "tick_ms" => t.tick_ms = parse_int(value)?,
                "step" => t.step = parse_int(value)?,
                "viewport_width" => t.viewport_width = parse_int(value)?,
                "spacing" => t.spacing = parse_int(value)?,
                "capacity" => t.capacity = parse_int(value)?,
                _ => {}
            }
        }
        Section::Display => {
            let d = &mut config.display;
            match key {
                "brightness" => d.brightness = parse_int(value)?,
                "brightness_step" => d.brightness_step = parse_int(value)?,
                "min_brightness" => d.min_brightness = parse_int(value)?,
                "max_brightness" => d.max_brightness = parse_int(value)?,
                _ => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherQuery;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("a = 1"), Some(("a", "1")));
        assert_eq!(
            parse_key_value("ssid = \"cafe # 2\" # guest"),
            Some(("ssid", "\"cafe # 2\""))
        );
        assert_eq!(parse_key_value("a ="), None);
        assert_eq!(parse_key_value("no equals"), None);
    }

    #[test]
    fn test_parse_int_separators() {
        assert_eq!(parse_int::<u32>("180_000"), Ok(180_000));
        assert_eq!(parse_int::<i32>("-18000"), Ok(-18_000));
        assert_eq!(parse_int::<u8>("300"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("refresh"), Ok(Section::Refresh));
        assert_eq!(
            parse_section_header("weather station"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_full_config() {
        let input = r#"
version = 1

[weather]
location = "Ottawa"
api_key = "0123abcd"
units = "imperial"

[network]
ssid = "home"        # 2.4 GHz only
password = "hunter22"

[time]
utc_offset_s = 3600
dst = "europe"

[refresh]
interval_ms = 300_000
max_attempts = 5
backoff_ms = 2000
sync_timeout_ms = 1_500

[ticker]
step = 3
spacing = 200

[display]
brightness = 100
"#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.weather.location.as_str(), "Ottawa");
        assert_eq!(config.weather.api_key.as_str(), "0123abcd");
        assert_eq!(config.weather.units, Units::Imperial);
        assert_eq!(config.network.ssid.as_str(), "home");
        assert_eq!(config.network.ntp_server.as_str(), "pool.ntp.org");
        assert_eq!(config.time.utc_offset_s, 3600);
        assert_eq!(config.time.dst, DstRule::Europe);
        assert_eq!(config.refresh.interval_ms, 300_000);
        assert_eq!(config.refresh.max_attempts, 5);
        assert_eq!(config.refresh.backoff_ms, 2000);
        assert_eq!(config.refresh.resync_every, 10);
        assert_eq!(config.refresh.sync_timeout_ms, 1_500);
        assert_eq!(config.ticker.step, 3);
        assert_eq!(config.ticker.spacing, 200);
        assert_eq!(config.display.brightness, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("# nothing here\n"), Ok(DeviceConfig::default()));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let config = parse_config("[weather]\ncountry = \"CA\"\n").unwrap();
        assert_eq!(config.weather, WeatherQuery::default());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("[motors]\n").unwrap_err(),
            ParseError::InvalidSection
        );
        assert_eq!(
            parse_config("[weather]\nunits = \"kelvin\"\n").unwrap_err(),
            ParseError::InvalidValue
        );
        assert_eq!(
            parse_config("[refresh]\nmax_attempts = lots\n").unwrap_err(),
            ParseError::InvalidValue
        );
        assert_eq!(
            parse_config("[weather]\njust some words\n").unwrap_err(),
            ParseError::MalformedLine
        );
        let long_ssid = "[network]\nssid = \"0123456789012345678901234567890123\"\n";
        assert_eq!(parse_config(long_ssid).unwrap_err(), ParseError::TooLong);
    }
}
