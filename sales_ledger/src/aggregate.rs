//! Filtering and per-day summation of transactions

use crate::config::LedgerConfig;
use crate::names::NameNormalizer;
use crate::transaction::Transaction;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::info;

/// Total quantity sold per (date, canonical item)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAggregate {
    totals: BTreeMap<(NaiveDate, String), f64>,
}

impl DailyAggregate {
    /// Sum quantities for repeated keys
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S, f64)>,
        S: Into<String>,
    {
        let mut totals = BTreeMap::new();
        for (date, item, quantity) in entries {
            *totals.entry((date, item.into())).or_insert(0.0) += quantity;
        }
        Self { totals }
    }

    pub fn get(&self, date: NaiveDate, item: &str) -> Option<f64> {
        self.totals.get(&(date, item.to_string())).copied()
    }

    /// Entries ordered by date, then item
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &str, f64)> {
        self.totals
            .iter()
            .map(|((date, item), qty)| (*date, item.as_str(), *qty))
    }

    /// Distinct items, alphabetical
    pub fn items(&self) -> BTreeSet<&str> {
        self.totals.keys().map(|(_, item)| item.as_str()).collect()
    }

    /// Distinct dates, ascending
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.totals.keys().map(|(date, _)| *date).collect()
    }

    pub fn total_quantity(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// What each filter stage removed, plus basic statistics for the run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationReport {
    pub loaded: usize,
    pub after_category_filter: usize,
    pub after_weekday_filter: usize,
    pub seasonal_removed: usize,
    pub kept: usize,
    /// Distinct raw names among rows that reached normalization
    pub raw_names: usize,
    /// Distinct names after normalization
    pub canonical_names: usize,
    pub unique_items: usize,
    pub unique_categories: usize,
    pub total_quantity: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl AggregationReport {
    /// Raw spellings merged away by the normalizer
    pub fn merged_names(&self) -> usize {
        self.raw_names.saturating_sub(self.canonical_names)
    }
}

/// Applies the category, weekday and seasonal filters and sums quantities
#[derive(Debug)]
pub struct Aggregator<'a> {
    config: &'a LedgerConfig,
    names: &'a NameNormalizer,
    seasonal_markers: Vec<String>,
}

impl<'a> Aggregator<'a> {
    pub fn new(config: &'a LedgerConfig, names: &'a NameNormalizer) -> Self {
        let seasonal_markers = config
            .seasonal_markers
            .iter()
            .map(|m| m.to_lowercase())
            .collect();
        Self {
            config,
            names,
            seasonal_markers,
        }
    }

    fn category_allowed(&self, transaction: &Transaction) -> bool {
        transaction
            .category
            .as_deref()
            .is_some_and(|c| self.config.categories.iter().any(|allowed| allowed == c))
    }

    fn weekday_allowed(&self, transaction: &Transaction) -> bool {
        transaction.date.weekday() != self.config.excluded_weekday
    }

    fn is_seasonal(&self, canonical: &str) -> bool {
        let lowered = canonical.to_lowercase();
        self.seasonal_markers.iter().any(|m| lowered.contains(m))
    }

    /// Canonical name of a transaction that survives every filter
    pub fn admit<'t>(&'t self, transaction: &'t Transaction) -> Option<&'t str> {
        if !self.category_allowed(transaction) || !self.weekday_allowed(transaction) {
            return None;
        }
        let canonical = self.names.canonical(&transaction.item);
        (!self.is_seasonal(canonical)).then_some(canonical)
    }

    /// Build the daily aggregate
    ///
    /// Filters run in order: category, closed weekday, name normalization,
    /// seasonal items. Remaining rows are summed per (date, canonical item).
    pub fn aggregate(&self, transactions: &[Transaction]) -> (DailyAggregate, AggregationReport) {
        let mut report = AggregationReport {
            loaded: transactions.len(),
            ..AggregationReport::default()
        };

        let by_category: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| self.category_allowed(t))
            .collect();
        report.after_category_filter = by_category.len();

        let open_days: Vec<&Transaction> = by_category
            .into_iter()
            .filter(|t| self.weekday_allowed(t))
            .collect();
        report.after_weekday_filter = open_days.len();
        report.first_date = open_days.iter().map(|t| t.date).min();
        report.last_date = open_days.iter().map(|t| t.date).max();

        let mut raw_names = HashSet::new();
        let mut canonical_names = HashSet::new();
        let mut categories = HashSet::new();
        let mut entries = Vec::with_capacity(open_days.len());

        for transaction in open_days {
            raw_names.insert(transaction.item.as_str());
            if let Some(category) = transaction.category.as_deref() {
                categories.insert(category);
            }

            let canonical = self.names.canonical(&transaction.item);
            canonical_names.insert(canonical);

            if self.is_seasonal(canonical) {
                report.seasonal_removed += 1;
                continue;
            }
            entries.push((transaction.date, canonical, transaction.quantity));
        }

        report.kept = entries.len();
        report.raw_names = raw_names.len();
        report.canonical_names = canonical_names.len();
        report.unique_categories = categories.len();

        let daily = DailyAggregate::from_entries(entries);
        report.unique_items = daily.items().len();
        report.total_quantity = daily.total_quantity();

        info!(
            loaded = report.loaded,
            after_category = report.after_category_filter,
            after_weekday = report.after_weekday_filter,
            excluded_weekday = %self.config.excluded_weekday,
            "filtered transactions"
        );
        info!(
            before = report.raw_names,
            after = report.canonical_names,
            merged = report.merged_names(),
            seasonal_removed = report.seasonal_removed,
            "normalized item names"
        );
        info!(
            cells = daily.len(),
            items = report.unique_items,
            total_quantity = report.total_quantity,
            "aggregated daily quantities"
        );

        (daily, report)
    }
}
