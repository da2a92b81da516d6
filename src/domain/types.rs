//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by any data source (database or fixture)
//! - filtered and aggregated in-memory
//! - exported to CSV/JSON

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which data source backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// MySQL when database configuration is present, otherwise the fixture.
    Auto,
    /// Always query the configured MySQL database.
    Mysql,
    /// Always use the in-memory fixture dataset.
    Fixture,
}

/// A source row before normalization.
///
/// Both the database and the fixture produce this shape, so every record passes
/// through the same date parsing and validation.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RawSalesRow {
    pub supplier: String,
    pub product: String,
    pub expected_margin_pct: f64,
    pub actual_margin_pct: f64,
    pub units_sold: i64,
    pub cost_per_unit: f64,
    /// Textual date as stored at the source (`2024-01-05`, `2024-01-05 00:00:00`, ...).
    pub date_sold: String,
}

/// One normalized row of the supplier sales table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub supplier: String,
    pub product: String,
    pub expected_margin_pct: f64,
    pub actual_margin_pct: f64,
    pub units_sold: u64,
    pub cost_per_unit: f64,
    pub date_sold: NaiveDate,
}

impl SalesRecord {
    /// Sales value of the row: `cost_per_unit × units_sold`.
    pub fn sales(&self) -> f64 {
        self.cost_per_unit * self.units_sold as f64
    }

    /// Profit contribution of the row: `(actual_margin_pct / 100) × sales`.
    pub fn profit(&self) -> f64 {
        (self.actual_margin_pct / 100.0) * self.cost_per_unit * self.units_sold as f64
    }
}

/// Inclusive calendar-date range. Never reordered: `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// User-selected filter parameters, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Empty means "nothing selected", not "no filter".
    pub selected_suppliers: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new<I, S>(suppliers: I, date_range: DateRange) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_suppliers: suppliers.into_iter().map(Into::into).collect(),
            date_range,
        }
    }

    /// Every supplier and the full date span of `records`.
    ///
    /// This is the dashboard's initial state. An empty dataset yields no suppliers
    /// and a single-day range at today's local date.
    pub fn select_all(records: &[SalesRecord]) -> Self {
        let suppliers = distinct_suppliers(records);
        let (start, end) = date_bounds(records).unwrap_or_else(|| {
            let today = Local::now().date_naive();
            (today, today)
        });
        Self::new(suppliers, DateRange::new(start, end))
    }

    pub fn is_selected(&self, supplier: &str) -> bool {
        self.selected_suppliers.contains(supplier)
    }

    /// Add the supplier if absent, remove it otherwise.
    pub fn toggle_supplier(&mut self, supplier: &str) {
        if !self.selected_suppliers.remove(supplier) {
            self.selected_suppliers.insert(supplier.to_string());
        }
    }
}

/// Scalar metrics plus the two grouped aggregations of a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Mean actual margin; `None` when the view has no rows.
    pub avg_margin: Option<f64>,
    pub row_count: usize,
    pub profit_by_supplier: BTreeMap<String, f64>,
    pub sales_by_date: BTreeMap<NaiveDate, f64>,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Daily sales in chronological order, ready for charting.
    pub fn sales_series(&self) -> Vec<(NaiveDate, f64)> {
        // BTreeMap iteration is already key-ordered.
        self.sales_by_date.iter().map(|(d, v)| (*d, *v)).collect()
    }
}

/// Distinct suppliers in first-seen order.
pub fn distinct_suppliers(records: &[SalesRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for r in records {
        if seen.insert(r.supplier.as_str()) {
            out.push(r.supplier.clone());
        }
    }
    out
}

/// Earliest and latest `date_sold`, or `None` for an empty dataset.
pub fn date_bounds(records: &[SalesRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let first = records.first()?.date_sold;
    Some(records.iter().fold((first, first), |(lo, hi), r| {
        (lo.min(r.date_sold), hi.max(r.date_sold))
    }))
}
