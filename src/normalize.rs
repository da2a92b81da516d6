//! Row normalization.
//!
//! Turns `RawSalesRow`s (as returned by any source) into validated `SalesRecord`s:
//! the textual `date_sold` becomes a calendar date and the numeric invariants are
//! checked. A single bad row rejects the whole load; there is no partial dataset.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::{RawSalesRow, SalesRecord};
use crate::error::LoadError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Normalize one row. `row` is 1-based and only used for error messages.
pub fn normalize(row: usize, raw: RawSalesRow) -> Result<SalesRecord, LoadError> {
    let date_sold = parse_date(&raw.date_sold).ok_or_else(|| LoadError::MalformedDate {
        row,
        value: raw.date_sold.clone(),
    })?;

    let units_sold = u64::try_from(raw.units_sold).map_err(|_| LoadError::InvalidRecord {
        row,
        reason: format!("units sold must be >= 0 (got {})", raw.units_sold),
    })?;

    if !(raw.cost_per_unit.is_finite() && raw.cost_per_unit >= 0.0) {
        return Err(LoadError::InvalidRecord {
            row,
            reason: format!("cost per unit must be a finite value >= 0 (got {})", raw.cost_per_unit),
        });
    }

    Ok(SalesRecord {
        supplier: raw.supplier,
        product: raw.product,
        expected_margin_pct: raw.expected_margin_pct,
        actual_margin_pct: raw.actual_margin_pct,
        units_sold,
        cost_per_unit: raw.cost_per_unit,
        date_sold,
    })
}

/// Normalize a whole load, failing on the first bad row.
pub fn normalize_all(rows: Vec<RawSalesRow>) -> Result<Vec<SalesRecord>, LoadError> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, raw)| normalize(idx + 1, raw))
        .collect()
}

/// Parse a date-like string into a calendar date, dropping any time-of-day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    // Timestamps with an offset keep the calendar date of their own offset.
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str) -> RawSalesRow {
        RawSalesRow {
            supplier: "Supplier A".to_string(),
            product: "Widget".to_string(),
            expected_margin_pct: 25.0,
            actual_margin_pct: 28.0,
            units_sold: 120,
            cost_per_unit: 10.0,
            date_sold: date.to_string(),
        }
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_date("2024-01-05"), Some(jan(5)));
        assert_eq!(parse_date("  2024/01/05 "), Some(jan(5)));
        assert_eq!(parse_date("2024-01-05 13:45:00"), Some(jan(5)));
        assert_eq!(parse_date("2024-01-05 13:45:00.250"), Some(jan(5)));
        assert_eq!(parse_date("2024-01-05T08:00:00"), Some(jan(5)));
        assert_eq!(parse_date("2024-01-05T23:30:00-05:00"), Some(jan(5)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn normalize_keeps_fields() {
        let record = normalize(1, raw("2024-01-05")).unwrap();
        assert_eq!(record.supplier, "Supplier A");
        assert_eq!(record.units_sold, 120);
        assert_eq!(record.date_sold, jan(5));
    }

    #[test]
    fn malformed_date_reports_row() {
        let err = normalize(7, raw("05.01.2024")).unwrap_err();
        assert_eq!(
            err,
            LoadError::MalformedDate {
                row: 7,
                value: "05.01.2024".to_string()
            }
        );
    }

    #[test]
    fn negative_units_and_costs_are_rejected() {
        let mut bad_units = raw("2024-01-05");
        bad_units.units_sold = -1;
        assert!(matches!(
            normalize(1, bad_units),
            Err(LoadError::InvalidRecord { row: 1, .. })
        ));

        let mut bad_cost = raw("2024-01-05");
        bad_cost.cost_per_unit = -0.5;
        assert!(matches!(
            normalize(2, bad_cost),
            Err(LoadError::InvalidRecord { row: 2, .. })
        ));

        let mut nan_cost = raw("2024-01-05");
        nan_cost.cost_per_unit = f64::NAN;
        assert!(normalize(3, nan_cost).is_err());
    }

    #[test]
    fn one_bad_row_rejects_the_load() {
        let rows = vec![raw("2024-01-05"), raw("2024-01-06"), raw("not a date")];
        let err = normalize_all(rows).unwrap_err();
        assert!(matches!(err, LoadError::MalformedDate { row: 3, .. }));
    }

    #[test]
    fn normalize_all_preserves_order() {
        let rows = vec![raw("2024-01-09"), raw("2024-01-02")];
        let records = normalize_all(rows).unwrap();
        assert_eq!(records[0].date_sold, jan(9));
        assert_eq!(records[1].date_sold, jan(2));
    }
}
