//! Wall-clock hours and weekday/weekend classification.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Hour of day (0-23) in the venue's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub const MIDNIGHT: HourOfDay = HourOfDay(0);
    pub const NOON: HourOfDay = HourOfDay(12);

    /// # Errors
    ///
    /// Returns a validation error if `hour` is greater than 23.
    pub fn new(hour: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::OutOfRange {
                field: "hour".into(),
                value: f64::from(hour),
                min: 0.0,
                max: 23.0,
            });
        }
        Ok(Self(hour))
    }

    /// Current hour on the local clock.
    pub fn now() -> Self {
        use chrono::Timelike;
        // Timelike::hour is always 0-23
        Self(Local::now().hour() as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Hour `n` hours later, wrapping past midnight.
    pub fn advance(self, n: u32) -> Self {
        Self(((u32::from(self.0) + n) % 24) as u8)
    }

    /// Short 12-hour label, e.g. "12a", "3p".
    pub fn label(self) -> String {
        format_hour_label(self.0)
    }
}

impl TryFrom<u8> for HourOfDay {
    type Error = ValidationError;

    fn try_from(hour: u8) -> Result<Self, Self::Error> {
        Self::new(hour)
    }
}

impl From<HourOfDay> for u8 {
    fn from(hour: HourOfDay) -> u8 {
        hour.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Format a raw hour as a compact 12-hour label.
///
/// 0 is "12a", 12 is "12p". Hours above 23 are taken modulo 24.
pub fn format_hour_label(hour: u8) -> String {
    match hour % 24 {
        0 => "12a".to_string(),
        12 => "12p".to_string(),
        h if h < 12 => format!("{h}a"),
        h => format!("{}p", h - 12),
    }
}

/// Whether a day follows the weekday or weekend demand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    /// Saturday and Sunday are weekend days.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => DayKind::Weekend,
            _ => DayKind::Weekday,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Day kind of today's local date.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn is_weekend(self) -> bool {
        self == DayKind::Weekend
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKind::Weekday => f.write_str("weekday"),
            DayKind::Weekend => f.write_str("weekend"),
        }
    }
}

impl FromStr for DayKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekday" => Ok(DayKind::Weekday),
            "weekend" => Ok(DayKind::Weekend),
            other => Err(ValidationError::invalid(
                "day_kind",
                format!("'{other}' is not weekday or weekend"),
            )),
        }
    }
}
