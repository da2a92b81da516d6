//! Export the filtered view (CSV) and its aggregates (JSON).
//!
//! The CSV uses the source table's column headings so it can be loaded back into a
//! spreadsheet next to the original data.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{AggregateResult, FilterCriteria, SalesRecord};
use crate::error::AppError;

const CSV_HEADER: [&str; 7] = [
    "Supplier",
    "Product",
    "Expected Margin (%)",
    "Actual Margin (%)",
    "Units Sold",
    "Cost per Unit",
    "Date Sold",
];

/// JSON export document.
#[derive(Debug, Serialize)]
struct AggregateExport<'a> {
    tool: &'static str,
    source: &'a str,
    suppliers: Vec<&'a str>,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(flatten)]
    aggregates: &'a AggregateResult,
}

/// Write the filtered rows to a CSV file.
pub fn write_view_csv(path: &Path, rows: &[SalesRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = csv::Writer::from_writer(BufWriter::new(file));

    out.write_record(CSV_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        out.write_record([
            r.supplier.clone(),
            r.product.clone(),
            r.expected_margin_pct.to_string(),
            r.actual_margin_pct.to_string(),
            r.units_sold.to_string(),
            r.cost_per_unit.to_string(),
            r.date_sold.to_string(),
        ])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))
}

/// Write the aggregate result (plus the filter that produced it) as pretty JSON.
pub fn write_aggregates_json(
    path: &Path,
    source_label: &str,
    criteria: &FilterCriteria,
    aggregates: &AggregateResult,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    let doc = AggregateExport {
        tool: "sdash",
        source: source_label,
        suppliers: criteria.selected_suppliers.iter().map(String::as_str).collect(),
        start: criteria.date_range.start,
        end: criteria.date_range.end,
        aggregates,
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))
}
