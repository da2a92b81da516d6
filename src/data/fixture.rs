//! In-memory fixture datasets.
//!
//! Two flavors share the same `SalesSource` contract as the database:
//!
//! - `demo()`: a fixed twelve-row table (used when no database is configured)
//! - `synthetic(n, seed)`: a seeded random table for larger demos and load tests
//!
//! Rows are written as `RawSalesRow`s and go through the normalizer, exactly like
//! database rows.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::SalesSource;
use crate::domain::{RawSalesRow, SalesRecord};
use crate::error::LoadError;
use crate::normalize::normalize_all;

/// Std dev (percentage points) of actual margin around the expected margin.
const MARGIN_NOISE_PCT: f64 = 3.0;
const UNITS_RANGE: std::ops::RangeInclusive<i64> = 10..=250;
const COST_RANGE: std::ops::RangeInclusive<f64> = 5.0..=50.0;
const WINDOW_DAYS: i64 = 90;
/// Upper bound on `synthetic(n, _)`.
pub const MAX_SYNTHETIC_ROWS: usize = 1_000_000;

/// (supplier, product catalog, expected margin %)
const ROSTER: [(&str, [&str; 3], f64); 4] = [
    ("Supplier A", ["Widget", "Gizmo", "Sprocket"], 25.0),
    ("Supplier B", ["Gadget", "Bracket", "Hinge"], 20.0),
    ("Supplier C", ["Valve", "Gasket", "Coupling"], 30.0),
    ("Supplier D", ["Bearing", "Spindle", "Bushing"], 18.0),
];

/// (supplier, product, expected %, actual %, units, cost, date)
const DEMO_ROWS: [(&str, &str, f64, f64, i64, f64, &str); 12] = [
    ("Supplier A", "Widget", 25.0, 28.0, 120, 10.0, "2024-01-05"),
    ("Supplier B", "Gadget", 20.0, 22.0, 90, 20.0, "2024-01-12"),
    ("Supplier C", "Valve", 30.0, 27.5, 60, 35.0, "2024-01-03"),
    ("Supplier A", "Gizmo", 25.0, 24.0, 200, 8.5, "2024-01-08"),
    ("Supplier B", "Bracket", 20.0, 19.0, 150, 12.0, "2024-01-08"),
    ("Supplier C", "Gasket", 30.0, 33.0, 75, 18.0, "2024-01-15"),
    ("Supplier A", "Sprocket", 25.0, 26.5, 95, 14.0, "2024-01-19"),
    ("Supplier B", "Hinge", 20.0, 17.5, 180, 6.0, "2024-01-22"),
    ("Supplier C", "Coupling", 30.0, 31.0, 40, 42.0, "2024-01-22"),
    ("Supplier A", "Widget", 25.0, 29.0, 130, 10.0, "2024-01-26"),
    ("Supplier B", "Gadget", 20.0, 21.0, 110, 20.0, "2024-01-29"),
    ("Supplier C", "Valve", 30.0, 28.0, 55, 35.0, "2024-01-31"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixtureKind {
    Demo,
    Synthetic { count: usize, seed: u64 },
}

#[derive(Debug, Clone)]
pub struct FixtureSource {
    kind: FixtureKind,
}

impl FixtureSource {
    pub fn demo() -> Self {
        Self {
            kind: FixtureKind::Demo,
        }
    }

    pub fn synthetic(count: usize, seed: u64) -> Self {
        Self {
            kind: FixtureKind::Synthetic { count, seed },
        }
    }
}

impl SalesSource for FixtureSource {
    fn load(&self) -> Result<Vec<SalesRecord>, LoadError> {
        let rows = match self.kind {
            FixtureKind::Demo => demo_rows(),
            FixtureKind::Synthetic { count, seed } => synthetic_rows(count, seed)?,
        };
        normalize_all(rows)
    }

    fn describe(&self) -> String {
        match self.kind {
            FixtureKind::Demo => "demo fixture".to_string(),
            FixtureKind::Synthetic { count, seed } => {
                format!("synthetic fixture (n={count}, seed={seed})")
            }
        }
    }
}

fn demo_rows() -> Vec<RawSalesRow> {
    DEMO_ROWS
        .iter()
        .map(|&(supplier, product, expected, actual, units, cost, date)| RawSalesRow {
            supplier: supplier.to_string(),
            product: product.to_string(),
            expected_margin_pct: expected,
            actual_margin_pct: actual,
            units_sold: units,
            cost_per_unit: cost,
            date_sold: date.to_string(),
        })
        .collect()
}

fn synthetic_rows(count: usize, seed: u64) -> Result<Vec<RawSalesRow>, LoadError> {
    if count > MAX_SYNTHETIC_ROWS {
        return Err(LoadError::SourceUnavailable(format!(
            "synthetic fixture limited to {MAX_SYNTHETIC_ROWS} rows (asked for {count})"
        )));
    }
    let mut rng = StdRng::seed_from_u64(sample_seed(count, seed));
    let noise = Normal::new(0.0, MARGIN_NOISE_PCT)
        .map_err(|e| LoadError::SourceUnavailable(format!("noise distribution error: {e}")))?;
    let window_start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .ok_or_else(|| LoadError::SourceUnavailable("invalid fixture window".to_string()))?;

    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let (supplier, catalog, expected) = ROSTER[rng.gen_range(0..ROSTER.len())];
        let product = catalog[rng.gen_range(0..catalog.len())];
        let actual = round_to(expected + noise.sample(&mut rng), 2);
        let units = rng.gen_range(UNITS_RANGE);
        let cost = round_to(rng.gen_range(COST_RANGE), 2);
        let date = window_start + Duration::days(rng.gen_range(0..WINDOW_DAYS));

        rows.push(RawSalesRow {
            supplier: supplier.to_string(),
            product: product.to_string(),
            expected_margin_pct: expected,
            actual_margin_pct: actual,
            units_sold: units,
            cost_per_unit: cost,
            date_sold: date.format("%Y-%m-%d").to_string(),
        });
    }
    Ok(rows)
}

fn sample_seed(count: usize, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    count.hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::distinct_suppliers;

    #[test]
    fn demo_starts_with_reference_rows() {
        let records = FixtureSource::demo().load().unwrap();
        assert_eq!(records.len(), DEMO_ROWS.len());

        let a = &records[0];
        assert_eq!(a.supplier, "Supplier A");
        assert_eq!((a.cost_per_unit, a.units_sold, a.actual_margin_pct), (10.0, 120, 28.0));
        assert_eq!(a.date_sold, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let b = &records[1];
        assert_eq!(b.supplier, "Supplier B");
        assert_eq!((b.cost_per_unit, b.units_sold, b.actual_margin_pct), (20.0, 90, 22.0));
    }

    #[test]
    fn demo_has_three_suppliers() {
        let records = FixtureSource::demo().load().unwrap();
        assert_eq!(
            distinct_suppliers(&records),
            vec!["Supplier A", "Supplier B", "Supplier C"]
        );
    }

    #[test]
    fn synthetic_is_deterministic_per_seed() {
        let a = FixtureSource::synthetic(200, 7).load().unwrap();
        let b = FixtureSource::synthetic(200, 7).load().unwrap();
        let c = FixtureSource::synthetic(200, 8).load().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn synthetic_rows_respect_invariants() {
        let records = FixtureSource::synthetic(500, 42).load().unwrap();
        assert_eq!(records.len(), 500);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = start + Duration::days(WINDOW_DAYS - 1);
        for r in &records {
            assert!(UNITS_RANGE.contains(&(r.units_sold as i64)));
            assert!(r.cost_per_unit >= 5.0 && r.cost_per_unit <= 50.0);
            assert!(r.date_sold >= start && r.date_sold <= end);
            assert!(ROSTER.iter().any(|(s, _, _)| *s == r.supplier));
        }
    }

    #[test]
    fn synthetic_zero_rows_is_empty() {
        assert!(FixtureSource::synthetic(0, 1).load().unwrap().is_empty());
    }

    #[test]
    fn oversized_synthetic_table_is_an_error() {
        let err = FixtureSource::synthetic(usize::MAX, 1).load().unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable(_)), "got {err:?}");
        assert!(FixtureSource::synthetic(MAX_SYNTHETIC_ROWS + 1, 1).load().is_err());
    }

    #[test]
    fn describe_names_the_variant() {
        assert_eq!(FixtureSource::demo().describe(), "demo fixture");
        assert!(FixtureSource::synthetic(5, 3).describe().contains("n=5"));
    }
}
