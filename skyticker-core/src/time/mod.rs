//! Wall-clock time and local time zone handling
//!
//! The device only needs local time of day for display purposes, so a time
//! zone is a fixed UTC offset plus an optional daylight-saving rule. No tz
//! database is involved; calendar math is `chrono` without its clock or
//! allocator features.

pub mod ntp;

use core::fmt;
use core::ops::Range;

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Weekday};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnixTime(pub i64);

impl UnixTime {
    /// Seconds between the NTP era (1900) and the Unix epoch
    pub const NTP_OFFSET: i64 = 2_208_988_800;

    /// Convert an NTP era-0 seconds value
    pub const fn from_ntp_seconds(secs: u32) -> Self {
        Self(secs as i64 - Self::NTP_OFFSET)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

/// Local time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    /// Shown when the clock has never been synchronized
    pub const FALLBACK: ClockTime = ClockTime {
        hour: 12,
        minute: 0,
        second: 0,
    };

    /// Create a time of day, `None` if any field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Time of day of any `chrono` time value
    ///
    /// A leap second reads as `:59`.
    pub fn from_timelike(t: &impl Timelike) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second().min(59) as u8,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Daylight-saving rule applied on top of the standard offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DstRule {
    /// Standard time all year
    None,
    /// US/Canada: second Sunday of March 02:00 to first Sunday of November 02:00 local
    #[default]
    NorthAmerica,
    /// EU: last Sunday of March to last Sunday of October, 01:00 UTC
    Europe,
}

/// Local time zone: standard UTC offset plus a DST rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZone {
    /// Standard-time offset from UTC in seconds (negative west of Greenwich)
    pub utc_offset_s: i32,
    /// Daylight-saving rule
    pub dst: DstRule,
}

impl Default for TimeZone {
    /// Eastern time (EST5EDT)
    fn default() -> Self {
        Self {
            utc_offset_s: -5 * 3600,
            dst: DstRule::NorthAmerica,
        }
    }
}

impl TimeZone {
    /// UTC with no daylight saving
    pub const UTC: TimeZone = TimeZone {
        utc_offset_s: 0,
        dst: DstRule::None,
    };

    /// Whether daylight saving is in effect at `t`
    pub fn is_dst(&self, t: UnixTime) -> bool {
        // North American transitions are defined on the local standard clock
        let instant = match self.dst {
            DstRule::None => return false,
            DstRule::NorthAmerica => t.0 + self.utc_offset_s as i64,
            DstRule::Europe => t.0,
        };
        DateTime::from_timestamp(instant, 0)
            .and_then(|dt| self.dst_window(dt.year()))
            .is_some_and(|window| window.contains(&instant))
    }

    /// DST period of `year` in the time base [`TimeZone::is_dst`] compares in
    fn dst_window(&self, year: i32) -> Option<Range<i64>> {
        match self.dst {
            DstRule::None => None,
            // 02:00 daylight time is 01:00 standard time
            DstRule::NorthAmerica => Some(
                at_hour(nth_sunday(year, 3, 2)?, 2)?..at_hour(nth_sunday(year, 11, 1)?, 1)?,
            ),
            DstRule::Europe => {
                Some(at_hour(last_sunday(year, 3)?, 1)?..at_hour(last_sunday(year, 10)?, 1)?)
            }
        }
    }

    /// Total offset from UTC in seconds at `t`
    pub fn offset_at(&self, t: UnixTime) -> i64 {
        let dst = if self.is_dst(t) { 3600 } else { 0 };
        self.utc_offset_s as i64 + dst
    }

    /// Local time of day at `t`
    ///
    /// Times outside `chrono`'s range read as [`ClockTime::FALLBACK`].
    pub fn local_time(&self, t: UnixTime) -> ClockTime {
        DateTime::from_timestamp(t.0.saturating_add(self.offset_at(t)), 0)
            .map_or(ClockTime::FALLBACK, |dt| ClockTime::from_timelike(&dt))
    }
}

fn nth_sunday(year: i32, month: u32, nth: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, nth)
}

fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    last.checked_sub_days(Days::new(last.weekday().num_days_from_sunday() as u64))
}

/// Seconds value of `hour`:00:00 on `date`, read as UTC
fn at_hour(date: NaiveDate, hour: u32) -> Option<i64> {
    Some(date.and_hms_opt(hour, 0, 0)?.and_utc().timestamp())
}
