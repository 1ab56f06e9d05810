//! Weekday ordering and the `M/D - WeekdayName` column labels

use crate::{LedgerError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Column group order: the shop week starts on Tuesday
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
];

static LABEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)/(\d+) - (\w+)").expect("label pattern is valid"));

/// Position of a weekday within [`WEEKDAY_ORDER`]
pub fn weekday_rank(weekday: Weekday) -> usize {
    (weekday.num_days_from_monday() as usize + 6) % 7
}

/// Full English weekday name
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full English weekday name
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEKDAY_ORDER
        .iter()
        .copied()
        .find(|&weekday| weekday_name(weekday) == name)
}

/// Matrix column label: a calendar day without its year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateLabel {
    pub month: u32,
    pub day: u32,
    pub weekday: Weekday,
}

impl DateLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
            weekday: date.weekday(),
        }
    }

    /// The `M/D` part of the label
    pub fn month_day(&self) -> String {
        format!("{}/{}", self.month, self.day)
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} - {}",
            self.month,
            self.day,
            weekday_name(self.weekday)
        )
    }
}

impl FromStr for DateLabel {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = LABEL_PATTERN
            .captures(s)
            .ok_or_else(|| LedgerError::InvalidLabel(s.to_string()))?;

        let month: u32 = caps[1]
            .parse()
            .map_err(|_| LedgerError::InvalidLabel(s.to_string()))?;
        let day: u32 = caps[2]
            .parse()
            .map_err(|_| LedgerError::InvalidLabel(s.to_string()))?;
        let weekday =
            parse_weekday_name(&caps[3]).ok_or_else(|| LedgerError::InvalidLabel(s.to_string()))?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(LedgerError::InvalidLabel(s.to_string()));
        }

        Ok(Self {
            month,
            day,
            weekday,
        })
    }
}
