//! Loading of point-of-sale transaction exports

use crate::{LedgerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One sold line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Calendar day of the sale, as written in the export
    pub date: NaiveDate,
    /// Item name exactly as the register recorded it
    pub item: String,
    /// Menu category, absent for uncategorized items
    pub category: Option<String>,
    /// Units sold
    pub quantity: f64,
    /// Net sales amount
    pub net_sales: f64,
}

#[derive(Debug, Deserialize)]
struct ExportRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Item")]
    item: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Qty")]
    qty: String,
    #[serde(rename = "Net Sales")]
    net_sales: String,
}

/// Load transactions from a CSV export
///
/// Any unparseable date, quantity or amount fails the whole load: a coerced
/// value would corrupt every sum computed downstream.
pub fn load_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (index, record) in csv_reader.deserialize::<ExportRecord>().enumerate() {
        // header is line 1
        let row = index + 2;
        let record = record?;
        transactions.push(record.into_transaction(row)?);
    }

    debug!(count = transactions.len(), "parsed transaction export");
    Ok(transactions)
}

/// Load transactions from a CSV file on disk
pub fn load_transactions_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let transactions = load_transactions(file)?;

    if let (Some(first), Some(last)) = (
        transactions.iter().map(|t| t.date).min(),
        transactions.iter().map(|t| t.date).max(),
    ) {
        info!(
            path = %path.display(),
            transactions = transactions.len(),
            %first,
            %last,
            "loaded transaction data"
        );
    }

    Ok(transactions)
}

impl ExportRecord {
    fn into_transaction(self, row: usize) -> Result<Transaction> {
        let date = parse_date(&self.date).ok_or_else(|| LedgerError::MalformedInput {
            row,
            field: "Date",
            value: self.date.clone(),
            reason: "unrecognized date format".to_string(),
        })?;

        let item = match self.item {
            Some(item) if !item.is_empty() => item,
            _ => {
                return Err(LedgerError::MalformedInput {
                    row,
                    field: "Item",
                    value: String::new(),
                    reason: "item name is empty".to_string(),
                })
            }
        };

        let quantity = parse_quantity(&self.qty).ok_or_else(|| LedgerError::MalformedInput {
            row,
            field: "Qty",
            value: self.qty.clone(),
            reason: "not a number".to_string(),
        })?;

        let net_sales =
            parse_amount(&self.net_sales).ok_or_else(|| LedgerError::MalformedInput {
                row,
                field: "Net Sales",
                value: self.net_sales.clone(),
                reason: "not a currency amount".to_string(),
            })?;

        Ok(Transaction {
            date,
            item,
            category: self.category.filter(|c| !c.is_empty()),
            quantity,
            net_sales,
        })
    }
}

/// Parse a currency field such as `$1,234.50` or `-$3.00`
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    parse_finite(&cleaned)
}

/// Parse a quantity field such as `2` or `1.5`
pub fn parse_quantity(text: &str) -> Option<f64> {
    parse_finite(text.trim())
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the date part of an export timestamp
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY` and `MM/DD/YY`; a trailing time of day is
/// ignored so the weekday always comes from the calendar date as written.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let date_part = text
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;

    if date_part.contains('-') {
        return NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok();
    }

    let year = date_part.rsplit('/').next()?;
    let format = if year.len() == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
    NaiveDate::parse_from_str(date_part, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("$1,234.50", 1234.5)]
    #[case("  $4.00 ", 4.0)]
    #[case("-$3.25", -3.25)]
    #[case("12", 12.0)]
    fn test_parses_currency(#[case] text: &str, #[case] expected: f64) {
        assert_relative_eq!(parse_amount(text).unwrap(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("$")]
    #[case("NaN")]
    fn test_rejects_non_amounts(#[case] text: &str) {
        assert!(parse_amount(text).is_none());
    }

    #[rstest]
    #[case("2025-01-14", 2025, 1, 14)]
    #[case("1/14/2025", 2025, 1, 14)]
    #[case("01/14/25", 2025, 1, 14)]
    #[case("2025-01-14 08:15:00", 2025, 1, 14)]
    #[case("2025-01-14T23:59:59", 2025, 1, 14)]
    fn test_parses_dates(#[case] text: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(parse_date(text), NaiveDate::from_ymd_opt(y, m, d));
    }

    #[test]
    fn test_rejects_garbage_dates() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("").is_none());
    }
}
