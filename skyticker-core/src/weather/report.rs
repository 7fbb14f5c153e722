//! Wire-shape of a current-conditions report
//!
//! Mirrors the subset of the OpenWeatherMap `/data/2.5/weather` JSON the
//! display uses. Every field is optional at this level; `into_snapshot`
//! decides which ones are required. Decoding the JSON itself is the data
//! source adapter's job.
//!
//! Strings borrow from the response body, so their length on the wire is
//! unbounded here. Only the first `weather[]` entry is kept.

use super::snapshot::{Readings, Snapshot, ValidationError};
use crate::time::{TimeZone, UnixTime};

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Top-level report
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawReport<'a> {
    pub main: Option<RawMain>,
    /// First entry of `weather[]`
    #[cfg_attr(
        feature = "serde",
        serde(borrow, deserialize_with = "first_condition::deserialize")
    )]
    pub weather: Option<RawCondition<'a>>,
    pub wind: Option<RawWind>,
    pub clouds: Option<RawClouds>,
    /// Metres
    pub visibility: Option<f32>,
    pub sys: Option<RawSys>,
}

/// `main` block
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawMain {
    pub temp: Option<f32>,
    pub feels_like: Option<f32>,
    pub humidity: Option<f32>,
    pub pressure: Option<f32>,
}

/// One entry of `weather[]`
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawCondition<'a> {
    #[cfg_attr(feature = "serde", serde(borrow))]
    pub description: Option<&'a str>,
    #[cfg_attr(feature = "serde", serde(borrow))]
    pub icon: Option<&'a str>,
}

/// Keep the first element of `weather[]` and skip the rest
#[cfg(feature = "serde")]
mod first_condition {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{Deserializer, IgnoredAny, SeqAccess, Visitor};

    use super::RawCondition;

    struct First<'a>(PhantomData<RawCondition<'a>>);

    impl<'de: 'a, 'a> Visitor<'de> for First<'a> {
        type Value = Option<RawCondition<'a>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an array of weather conditions")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let first = seq.next_element()?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    pub fn deserialize<'de: 'a, 'a, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RawCondition<'a>>, D::Error> {
        deserializer.deserialize_seq(First(PhantomData))
    }
}

/// `wind` block
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawWind {
    pub speed: Option<f32>,
}

/// `clouds` block
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawClouds {
    pub all: Option<f32>,
}

/// `sys` block, Unix seconds
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawSys {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl RawReport<'_> {
    /// Validate the report and convert it into a snapshot
    ///
    /// Temperature and the first condition's description are required.
    /// Missing secondary readings take neutral defaults. Sunrise and sunset
    /// are converted to local time of day in `zone`.
    pub fn into_snapshot(self, zone: &TimeZone) -> Result<Snapshot, ValidationError> {
        let main = self.main.unwrap_or_default();
        let temperature = main.temp.ok_or(ValidationError::MissingTemperature)?;

        let condition = self.weather.unwrap_or_default();
        let description = condition
            .description
            .ok_or(ValidationError::MissingDescription)?;

        let defaults = Readings::default();
        let readings = Readings {
            feels_like: main.feels_like.unwrap_or(temperature),
            humidity: main.humidity.unwrap_or(defaults.humidity),
            pressure: main.pressure.unwrap_or(defaults.pressure),
            wind_speed: self
                .wind
                .and_then(|w| w.speed)
                .unwrap_or(defaults.wind_speed),
            cloud_coverage: self
                .clouds
                .and_then(|c| c.all)
                .unwrap_or(defaults.cloud_coverage),
            visibility_m: self.visibility.unwrap_or(defaults.visibility_m),
        };

        // Truncated to the snapshot's capacity on a character boundary
        let mut snapshot = Snapshot::new(temperature, description, readings)?;
        if let Some(icon) = condition.icon {
            snapshot = snapshot.with_icon(icon);
        }

        let sys = self.sys.unwrap_or_default();
        let local = |epoch: Option<i64>| epoch.map(|s| zone.local_time(UnixTime(s)));
        Ok(snapshot.with_sun(local(sys.sunrise), local(sys.sunset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ClockTime;
    use crate::weather::snapshot::MAX_DESCRIPTION_LEN;

    fn full_report() -> RawReport<'static> {
        RawReport {
            main: Some(RawMain {
                temp: Some(12.3),
                feels_like: Some(10.9),
                humidity: Some(81.0),
                pressure: Some(1009.0),
            }),
            weather: Some(RawCondition {
                description: Some("light rain"),
                icon: Some("10d"),
            }),
            wind: Some(RawWind { speed: Some(4.1) }),
            clouds: Some(RawClouds { all: Some(75.0) }),
            visibility: Some(8000.0),
            sys: Some(RawSys {
                // 2024-07-01 09:30:00Z and 2024-07-02 00:45:00Z
                sunrise: Some(1_719_826_200),
                sunset: Some(1_719_881_100),
            }),
        }
    }

    #[test]
    fn test_full_report_converts() {
        let snap = full_report().into_snapshot(&TimeZone::default()).unwrap();
        assert_eq!(snap.temperature(), 12.3);
        assert_eq!(snap.description(), "light rain");
        assert_eq!(snap.icon(), "10d");
        assert_eq!(snap.humidity(), 81.0);
        assert_eq!(snap.cloud_coverage(), 75.0);
        assert_eq!(snap.visibility_m(), 8000.0);
        // EDT is UTC-4 in July
        assert_eq!(snap.sunrise(), ClockTime::new(5, 30, 0));
        assert_eq!(snap.sunset(), ClockTime::new(20, 45, 0));
        assert!(snap.updated_at().is_none());
    }

    #[test]
    fn test_missing_temperature_rejected() {
        let mut report = full_report();
        report.main.as_mut().unwrap().temp = None;
        assert_eq!(
            report.into_snapshot(&TimeZone::UTC).unwrap_err(),
            ValidationError::MissingTemperature
        );

        let mut report = full_report();
        report.main = None;
        assert_eq!(
            report.into_snapshot(&TimeZone::UTC).unwrap_err(),
            ValidationError::MissingTemperature
        );
    }

    #[test]
    fn test_missing_description_rejected() {
        let mut report = full_report();
        report.weather = None;
        assert_eq!(
            report.into_snapshot(&TimeZone::UTC).unwrap_err(),
            ValidationError::MissingDescription
        );

        let mut report = full_report();
        report.weather.as_mut().unwrap().description = None;
        assert_eq!(
            report.into_snapshot(&TimeZone::UTC).unwrap_err(),
            ValidationError::MissingDescription
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let report = RawReport {
            main: Some(RawMain {
                temp: Some(-3.0),
                ..Default::default()
            }),
            weather: Some(RawCondition {
                description: Some("haze"),
                icon: None,
            }),
            ..Default::default()
        };

        let snap = report.into_snapshot(&TimeZone::UTC).unwrap();
        assert_eq!(snap.feels_like(), -3.0);
        assert_eq!(snap.wind_speed(), 0.0);
        assert_eq!(snap.visibility_m(), 10_000.0);
        assert_eq!(snap.icon(), "01d");
        assert!(snap.sunrise().is_none());
        assert!(snap.sunset().is_none());
    }

    #[test]
    fn test_long_description_truncated() {
        let long = "thunderstorm with heavy drizzle and scattered showers over the whole region tonight";
        let mut report = full_report();
        report.weather.as_mut().unwrap().description = Some(long);

        let snap = report.into_snapshot(&TimeZone::UTC).unwrap();
        assert_eq!(snap.description().len(), MAX_DESCRIPTION_LEN);
        assert!(long.starts_with(snap.description()));
    }

    #[cfg(feature = "serde")]
    mod json {
        use super::*;

        const PAYLOAD: &str = r#"{"coord":{"lon":-75.7,"lat":45.48},"weather":[{"id":500,"main":"Rain","description":"light rain","icon":"10n"}],"base":"stations","main":{"temp":12.3,"feels_like":10.9,"temp_min":11.1,"temp_max":13.4,"pressure":1009,"humidity":81},"visibility":8000,"wind":{"speed":4.1,"deg":220},"clouds":{"all":75},"dt":1719881000,"sys":{"type":2,"id":2005,"country":"CA","sunrise":1719826200,"sunset":1719881100},"timezone":-14400,"id":5959974,"name":"Gatineau","cod":200}"#;

        fn decode(json: &str) -> RawReport<'_> {
            serde_json_core::from_str::<RawReport<'_>>(json).unwrap().0
        }

        #[test]
        fn test_decode_owm_payload() {
            let snap = decode(PAYLOAD).into_snapshot(&TimeZone::default()).unwrap();
            assert_eq!(snap.temperature(), 12.3);
            assert_eq!(snap.description(), "light rain");
            assert_eq!(snap.icon(), "10n");
            assert_eq!(snap.pressure(), 1009.0);
            assert_eq!(snap.visibility_m(), 8000.0);
            assert_eq!(snap.sunset(), ClockTime::new(20, 45, 0));
        }

        #[test]
        fn test_decode_long_description() {
            let long = "a".repeat(80);
            let json = PAYLOAD.replace("light rain", &long);
            let snap = decode(&json).into_snapshot(&TimeZone::UTC).unwrap();
            assert_eq!(snap.description(), &long[..MAX_DESCRIPTION_LEN]);
        }

        #[test]
        fn test_decode_keeps_first_of_many_conditions() {
            let entry = r#"{"id":701,"main":"Mist","description":"mist","icon":"50n"}"#;
            let extra = [entry; 6].join(",");
            let json = PAYLOAD.replace(
                r#""icon":"10n"}]"#,
                &format!(r#""icon":"10n"}},{}]"#, extra),
            );
            let snap = decode(&json).into_snapshot(&TimeZone::UTC).unwrap();
            assert_eq!(snap.description(), "light rain");
            assert_eq!(snap.icon(), "10n");
        }

        #[test]
        fn test_decode_missing_weather_rejected() {
            let json = PAYLOAD.replace(r#""weather":["#, r#""conditions":["#);
            let report = decode(&json);
            assert_eq!(
                report.into_snapshot(&TimeZone::UTC).unwrap_err(),
                ValidationError::MissingDescription
            );
        }
    }
}
