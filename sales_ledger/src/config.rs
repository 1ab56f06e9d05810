//! Filtering rules for the aggregation stage

use crate::{LedgerError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A calendar day that applies to every year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

/// Which transactions feed the quantity matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Categories kept for forecasting
    pub categories: Vec<String>,
    /// Day the shop is closed; its transactions are dropped
    pub excluded_weekday: Weekday,
    /// Case-insensitive name fragments of seasonal or one-off items
    pub seasonal_markers: Vec<String>,
    /// Known bad-data day removed from the matrix
    pub excluded_date: Option<MonthDay>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            categories: ["Croissant", "Bread", "Pastries", "Drink"]
                .into_iter()
                .map(String::from)
                .collect(),
            excluded_weekday: Weekday::Mon,
            seasonal_markers: vec!["4th of July".to_string(), "Easter Special".to_string()],
            excluded_date: Some(MonthDay::new(1, 14)),
        }
    }
}

impl LedgerConfig {
    /// Reject settings that would silently empty the matrix
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "at least one category is required".to_string(),
            ));
        }

        if self.seasonal_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(LedgerError::InvalidConfig(
                "seasonal markers must not be blank".to_string(),
            ));
        }

        if let Some(excluded) = self.excluded_date {
            if !(1..=12).contains(&excluded.month) || !(1..=31).contains(&excluded.day) {
                return Err(LedgerError::InvalidConfig(format!(
                    "excluded date {}/{} is not a calendar day",
                    excluded.month, excluded.day
                )));
            }
        }

        Ok(())
    }
}
