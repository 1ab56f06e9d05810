//! Reshaping the daily aggregate into the weekday-grouped matrix

use crate::aggregate::DailyAggregate;
use crate::calendar::{weekday_rank, DateLabel};
use crate::config::MonthDay;
use crate::matrix::{MatrixRow, QuantityMatrix};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use tracing::info;

/// Pivot (date, item, quantity) triples into an item x date matrix
///
/// Columns are grouped by weekday (Tuesday first) and sorted by date inside
/// each group. Rows are alphabetical. Days with no sales for an item get an
/// explicit zero. The `excluded` calendar day is dropped in every year.
pub fn build_matrix(daily: &DailyAggregate, excluded: Option<MonthDay>) -> QuantityMatrix {
    let mut dates: Vec<NaiveDate> = daily
        .dates()
        .into_iter()
        .filter(|date| !excluded.is_some_and(|day| day.matches(*date)))
        .collect();
    dates.sort_by_key(|date| (weekday_rank(date.weekday()), *date));

    let column_of: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, date)| (*date, i)).collect();

    let items = daily.items();
    let row_of: HashMap<&str, usize> = items.iter().enumerate().map(|(i, item)| (*item, i)).collect();

    let mut rows: Vec<MatrixRow> = items
        .iter()
        .map(|item| MatrixRow {
            item: item.to_string(),
            quantities: vec![0.0; dates.len()],
        })
        .collect();

    for (date, item, quantity) in daily.iter() {
        if let Some(&column) = column_of.get(&date) {
            rows[row_of[item]].quantities[column] = quantity;
        }
    }

    let columns: Vec<DateLabel> = dates.into_iter().map(DateLabel::from_date).collect();
    info!(
        items = rows.len(),
        dates = columns.len(),
        "built quantity matrix"
    );

    QuantityMatrix::from_parts(columns, rows)
}
