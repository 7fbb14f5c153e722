//! Immutable weather snapshot
//!
//! A snapshot is produced by one successful fetch and replaced wholesale by
//! the next one. Fields are private; the only way to get a different
//! snapshot is to build a new one.

use heapless::String;

use crate::config::Units;
use crate::time::ClockTime;

/// Maximum description length in bytes
pub const MAX_DESCRIPTION_LEN: usize = 64;

/// Maximum icon code length in bytes ("01d", "10n", ...)
pub const MAX_ICON_LEN: usize = 8;

/// Icon code used when the report carries none
pub const DEFAULT_ICON: &str = "01d";

/// Reasons a report is rejected before it becomes a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// `main.temp` absent
    MissingTemperature,
    /// `weather[0].description` absent or empty
    MissingDescription,
    /// A numeric field was NaN or infinite
    NotFinite,
}

/// Secondary readings; everything except temperature and description
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    /// Feels-like temperature in the configured unit
    pub feels_like: f32,
    /// Relative humidity, percent
    pub humidity: f32,
    /// Pressure, hPa
    pub pressure: f32,
    /// Wind speed, m/s (metric) or mph (imperial)
    pub wind_speed: f32,
    /// Cloud coverage, percent
    pub cloud_coverage: f32,
    /// Visibility, metres
    pub visibility_m: f32,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            feels_like: 0.0,
            humidity: 0.0,
            pressure: 0.0,
            wind_speed: 0.0,
            cloud_coverage: 0.0,
            visibility_m: 10_000.0,
        }
    }
}

impl Readings {
    fn all_finite(&self) -> bool {
        [
            self.feels_like,
            self.humidity,
            self.pressure,
            self.wind_speed,
            self.cloud_coverage,
            self.visibility_m,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// One complete set of current conditions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    temperature: f32,
    description: String<MAX_DESCRIPTION_LEN>,
    readings: Readings,
    icon: String<MAX_ICON_LEN>,
    sunrise: Option<ClockTime>,
    sunset: Option<ClockTime>,
    updated_at: Option<ClockTime>,
}

impl Snapshot {
    /// Build a snapshot from its required fields
    ///
    /// The description is truncated on a character boundary if it does not
    /// fit.
    pub fn new(
        temperature: f32,
        description: &str,
        readings: Readings,
    ) -> Result<Self, ValidationError> {
        if !temperature.is_finite() || !readings.all_finite() {
            return Err(ValidationError::NotFinite);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let mut desc = String::new();
        for ch in description.chars() {
            if desc.push(ch).is_err() {
                break;
            }
        }

        let mut icon = String::new();
        let _ = icon.push_str(DEFAULT_ICON);

        Ok(Self {
            temperature,
            description: desc,
            readings,
            icon,
            sunrise: None,
            sunset: None,
            updated_at: None,
        })
    }

    /// Replace the icon code; empty or oversized codes keep the default
    pub fn with_icon(mut self, code: &str) -> Self {
        let code = code.trim();
        if !code.is_empty() && code.len() <= MAX_ICON_LEN {
            self.icon.clear();
            let _ = self.icon.push_str(code);
        }
        self
    }

    /// Attach local sunrise and sunset times
    pub fn with_sun(mut self, sunrise: Option<ClockTime>, sunset: Option<ClockTime>) -> Self {
        self.sunrise = sunrise;
        self.sunset = sunset;
        self
    }

    /// Stamp the local time the snapshot was fetched
    pub fn stamped(mut self, at: ClockTime) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn feels_like(&self) -> f32 {
        self.readings.feels_like
    }

    pub fn humidity(&self) -> f32 {
        self.readings.humidity
    }

    pub fn pressure(&self) -> f32 {
        self.readings.pressure
    }

    /// Raw wind speed as reported (m/s or mph)
    pub fn wind_speed(&self) -> f32 {
        self.readings.wind_speed
    }

    pub fn cloud_coverage(&self) -> f32 {
        self.readings.cloud_coverage
    }

    pub fn visibility_m(&self) -> f32 {
        self.readings.visibility_m
    }

    /// Visibility in kilometres
    pub fn visibility_km(&self) -> f32 {
        self.readings.visibility_m / 1000.0
    }

    /// Wind speed in km/h, assuming a metric (m/s) report
    pub fn wind_speed_kmh(&self) -> f32 {
        self.readings.wind_speed * 3.6
    }

    /// Wind speed in the display unit for `units`
    ///
    /// Metric reports arrive in m/s and show as km/h; imperial reports are
    /// already in mph.
    pub fn wind_speed_in(&self, units: Units) -> f32 {
        match units {
            Units::Metric => self.wind_speed_kmh(),
            Units::Imperial => self.readings.wind_speed,
        }
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn sunrise(&self) -> Option<ClockTime> {
        self.sunrise
    }

    pub fn sunset(&self) -> Option<ClockTime> {
        self.sunset
    }

    /// Local time of the fetch, `None` until stamped
    pub fn updated_at(&self) -> Option<ClockTime> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        let readings = Readings {
            wind_speed: 3.0,
            visibility_m: 10_000.0,
            ..Default::default()
        };
        let snap = Snapshot::new(21.5, "clear sky", readings).unwrap();
        assert!((snap.visibility_km() - 10.0).abs() < 1e-4);
        assert!((snap.wind_speed_kmh() - 10.8).abs() < 1e-4);
        assert!((snap.wind_speed_in(Units::Metric) - 10.8).abs() < 1e-4);
        assert_eq!(snap.wind_speed_in(Units::Imperial), 3.0);
    }

    #[test]
    fn test_rejects_empty_description() {
        let err = Snapshot::new(20.0, "   ", Readings::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingDescription);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(
            Snapshot::new(f32::NAN, "rain", Readings::default()).unwrap_err(),
            ValidationError::NotFinite
        );
        let readings = Readings {
            humidity: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            Snapshot::new(1.0, "rain", readings).unwrap_err(),
            ValidationError::NotFinite
        );
    }

    #[test]
    fn test_long_description_truncated() {
        let long = "a".repeat(100);
        let snap = Snapshot::new(1.0, &long, Readings::default()).unwrap();
        assert_eq!(snap.description().len(), MAX_DESCRIPTION_LEN);
    }

    #[test]
    fn test_icon_defaults_and_override() {
        let snap = Snapshot::new(1.0, "mist", Readings::default()).unwrap();
        assert_eq!(snap.icon(), DEFAULT_ICON);
        let snap = snap.with_icon("50n");
        assert_eq!(snap.icon(), "50n");
        let snap = snap.with_icon("");
        assert_eq!(snap.icon(), "50n");
    }

    #[test]
    fn test_stamped() {
        let at = ClockTime::new(9, 30, 0).unwrap();
        let snap = Snapshot::new(1.0, "mist", Readings::default())
            .unwrap()
            .stamped(at);
        assert_eq!(snap.updated_at(), Some(at));
    }
}
