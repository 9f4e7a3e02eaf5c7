//! Time-of-day primitives used by event schedules and operating hours.
//!
//! Fixture data writes times as `HH:MM` and windows as `HH:MM-HH:MM`. A
//! window whose end is earlier than its start runs past midnight (a bar
//! open `18:00-02:00` closes at 2 AM the next day).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike as _, NaiveDateTime, NaiveTime, Timelike as _};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when a clock time, window or day schedule string cannot
/// be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClockError {
    /// The rejected input.
    pub input: String,
    /// What was expected.
    pub expected: &'static str,
}

impl fmt::Display for ParseClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time value '{}': expected {}", self.input, self.expected)
    }
}

impl std::error::Error for ParseClockError {}

/// A wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: Self = Self { minutes: 0 };

    /// Creates a clock time, returning `None` when out of range.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour as u16 * 60 + minute as u16,
            })
        } else {
            None
        }
    }

    /// Hour component (0-23).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// Minute component (0-59).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Minutes elapsed since midnight.
    #[must_use]
    pub const fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }

    /// Converts to a `chrono` time.
    #[must_use]
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (time.hour() * 60 + time.minute()) as u16;
        Self {
            minutes: minutes % MINUTES_PER_DAY,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockError {
            input: s.to_string(),
            expected: "HH:MM",
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;
        if minute.len() != 2 {
            return Err(err());
        }
        let hour = hour.parse::<u8>().map_err(|_| err())?;
        let minute = minute.parse::<u8>().map_err(|_| err())?;
        Self::new(hour, minute).ok_or_else(err)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A daily time window such as `22:00-02:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeWindow {
    /// Opening time.
    pub start: ClockTime,
    /// Closing time. Earlier than `start` when the window crosses midnight.
    pub end: ClockTime,
}

impl TimeWindow {
    /// Creates a window from its bounds.
    #[must_use]
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Whether the window continues into the following day.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Whether `time` falls inside the window, start inclusive and end
    /// exclusive.
    #[must_use]
    pub fn contains(&self, time: ClockTime) -> bool {
        if self.crosses_midnight() {
            time >= self.start || time < self.end
        } else {
            time >= self.start && time < self.end
        }
    }

    /// Length of the window in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> u16 {
        let start = self.start.minutes_since_midnight();
        let end = self.end.minutes_since_midnight();
        if end >= start {
            end - start
        } else {
            MINUTES_PER_DAY - start + end
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeWindow {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.trim().split_once('-').ok_or_else(|| ParseClockError {
            input: s.to_string(),
            expected: "HH:MM-HH:MM",
        })?;
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = ParseClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(value: TimeWindow) -> Self {
        value.to_string()
    }
}

/// Day of the week, used as the key of weekly operating hours.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DayOfWeek {
    #[serde(alias = "segunda")]
    #[strum(to_string = "monday", serialize = "segunda")]
    Monday,
    #[serde(alias = "terca")]
    #[strum(to_string = "tuesday", serialize = "terca")]
    Tuesday,
    #[serde(alias = "quarta")]
    #[strum(to_string = "wednesday", serialize = "quarta")]
    Wednesday,
    #[serde(alias = "quinta")]
    #[strum(to_string = "thursday", serialize = "quinta")]
    Thursday,
    #[serde(alias = "sexta")]
    #[strum(to_string = "friday", serialize = "sexta")]
    Friday,
    #[serde(alias = "sabado")]
    #[strum(to_string = "saturday", serialize = "sabado")]
    Saturday,
    #[serde(alias = "domingo")]
    #[strum(to_string = "sunday", serialize = "domingo")]
    Sunday,
}

impl DayOfWeek {
    /// The day before this one.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Monday => Self::Sunday,
            Self::Tuesday => Self::Monday,
            Self::Wednesday => Self::Tuesday,
            Self::Thursday => Self::Wednesday,
            Self::Friday => Self::Thursday,
            Self::Saturday => Self::Friday,
            Self::Sunday => Self::Saturday,
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Opening hours for a single day: either closed or open for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DaySchedule {
    /// Not open on this day.
    Closed,
    /// Open during the window.
    Open(TimeWindow),
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open(window) => window.fmt(f),
        }
    }
}

impl FromStr for DaySchedule {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("closed") || trimmed.eq_ignore_ascii_case("fechado") {
            return Ok(Self::Closed);
        }
        trimmed.parse().map(Self::Open).map_err(|_| ParseClockError {
            input: s.to_string(),
            expected: "HH:MM-HH:MM or 'closed'",
        })
    }
}

impl TryFrom<String> for DaySchedule {
    type Error = ParseClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DaySchedule> for String {
    fn from(value: DaySchedule) -> Self {
        value.to_string()
    }
}

/// Weekly operating hours. Days missing from the map are closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHours(pub BTreeMap<DayOfWeek, DaySchedule>);

impl WeeklyHours {
    /// Schedule for `day`, `Closed` when missing.
    #[must_use]
    pub fn schedule(&self, day: DayOfWeek) -> DaySchedule {
        self.0.get(&day).copied().unwrap_or(DaySchedule::Closed)
    }

    /// Whether the business is open at `at`, including windows that started
    /// the previous day and run past midnight.
    #[must_use]
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        let day = DayOfWeek::from(at.weekday());
        let time = ClockTime::from(at.time());

        let open_today = match self.schedule(day) {
            DaySchedule::Open(window) if window.crosses_midnight() => time >= window.start,
            DaySchedule::Open(window) => window.contains(time),
            DaySchedule::Closed => false,
        };
        let carried_over = match self.schedule(day.previous()) {
            DaySchedule::Open(window) if window.crosses_midnight() => time < window.end,
            _ => false,
        };

        open_today || carried_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_and_displays_clock_time() {
        let time: ClockTime = "09:05".parse().unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "09:05");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("9:5".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
    }

    #[test]
    fn window_across_midnight() {
        let window: TimeWindow = "22:00-02:00".parse().unwrap();
        assert!(window.crosses_midnight());
        assert!(window.contains("23:30".parse().unwrap()));
        assert!(window.contains("01:59".parse().unwrap()));
        assert!(!window.contains("02:00".parse().unwrap()));
        assert!(!window.contains("12:00".parse().unwrap()));
        assert_eq!(window.duration_minutes(), 240);
    }

    #[test]
    fn day_schedule_accepts_closed_keywords() {
        assert_eq!("closed".parse::<DaySchedule>().unwrap(), DaySchedule::Closed);
        assert_eq!("fechado".parse::<DaySchedule>().unwrap(), DaySchedule::Closed);
        assert!("sometimes".parse::<DaySchedule>().is_err());
    }

    #[test]
    fn portuguese_day_names_parse() {
        assert_eq!("segunda".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("Sunday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::Monday.previous(), DayOfWeek::Sunday);
    }

    #[test]
    fn overnight_hours_carry_into_next_day() {
        let mut map = BTreeMap::new();
        // 2025-12-19 is a Friday.
        map.insert(DayOfWeek::Friday, "18:00-02:00".parse().unwrap());
        map.insert(DayOfWeek::Saturday, DaySchedule::Closed);
        let hours = WeeklyHours(map);

        assert!(hours.is_open_at(at((2025, 12, 19), 19, 0)));
        assert!(hours.is_open_at(at((2025, 12, 20), 1, 0)));
        assert!(!hours.is_open_at(at((2025, 12, 20), 3, 0)));
        assert!(!hours.is_open_at(at((2025, 12, 19), 10, 0)));
    }

    #[test]
    fn weekly_hours_deserialize_from_toml() {
        let hours: WeeklyHours = toml::from_str(
            r#"
            segunda = "08:00-18:00"
            sunday = "closed"
            "#,
        )
        .unwrap();
        assert_eq!(
            hours.schedule(DayOfWeek::Monday),
            DaySchedule::Open("08:00-18:00".parse().unwrap())
        );
        assert_eq!(hours.schedule(DayOfWeek::Sunday), DaySchedule::Closed);
        assert_eq!(hours.schedule(DayOfWeek::Tuesday), DaySchedule::Closed);
    }
}
