//! Formatted terminal output: metrics, grouped tables, and the detail table.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized (important for snapshot tests)

use crate::domain::{AggregateResult, FilterCriteria, SalesRecord};

/// Placeholder for the average margin of an empty view.
pub const NO_DATA: &str = "n/a";

/// `$1,234.56`; negatives as `-$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

/// `25.00%`, or `n/a` when there were no rows to average.
pub fn format_margin(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{v:.2}%"),
        None => NO_DATA.to_string(),
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Title block: source and active filters.
pub fn format_header(source_label: &str, criteria: &FilterCriteria) -> String {
    let mut out = String::new();
    out.push_str("=== Supplier Performance Dashboard ===\n");
    out.push_str(&format!("Source: {source_label}\n"));

    let suppliers: Vec<&str> = criteria.selected_suppliers.iter().map(String::as_str).collect();
    if suppliers.is_empty() {
        out.push_str("Suppliers: (none selected)\n");
    } else {
        out.push_str(&format!("Suppliers: {}\n", suppliers.join(", ")));
    }
    out.push_str(&format!(
        "Date range: {} .. {}\n",
        criteria.date_range.start, criteria.date_range.end
    ));
    out
}

/// The three headline metrics.
pub fn format_metrics(agg: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:<16} {:<12}\n",
            "Total Sales", "Total Profit", "Avg. Margin"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:<16} {:<16} {:<12}\n",
            format_currency(agg.total_sales),
            format_currency(agg.total_profit),
            format_margin(agg.avg_margin),
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("Rows: {}\n", agg.row_count));
    out
}

/// Profit per supplier (sorted by supplier), with optional ASCII bars.
pub fn format_profit_by_supplier(agg: &AggregateResult, bar_width: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str("Profit by Supplier:\n");
    if agg.profit_by_supplier.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    out.push_str(&format!("{:<24} {:>16}\n", "supplier", "total_profit"));
    out.push_str(&format!("{:-<24} {:-<16}\n", "", ""));
    for (supplier, profit) in &agg.profit_by_supplier {
        out.push_str(&format!(
            "{:<24} {:>16}\n",
            truncate(supplier, 24),
            format_currency(*profit)
        ));
    }

    if let Some(width) = bar_width {
        let items: Vec<(String, f64)> = agg
            .profit_by_supplier
            .iter()
            .map(|(s, v)| (truncate(s, 24), *v))
            .collect();
        out.push('\n');
        out.push_str(&crate::plot::render_bar_chart(&items, width));
    }
    out
}

/// Daily sales in chronological order.
pub fn format_sales_by_date(agg: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str("Sales Over Time:\n");
    if agg.sales_by_date.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    out.push_str(&format!("{:<12} {:>16}\n", "date_sold", "daily_sales"));
    out.push_str(&format!("{:-<12} {:-<16}\n", "", ""));
    for (date, sales) in agg.sales_series() {
        out.push_str(&format!("{:<12} {:>16}\n", date.to_string(), format_currency(sales)));
    }
    out
}

/// The detail table: every filtered row, all seven columns.
pub fn format_detail_table(rows: &[SalesRecord]) -> String {
    let mut out = String::new();
    out.push_str("Detailed Performance Table:\n");
    out.push_str(
        format!(
            "{:<18} {:<16} {:>10} {:>10} {:>8} {:>12} {:<10}\n",
            "Supplier", "Product", "Exp. Mgn %", "Act. Mgn %", "Units", "Cost/Unit", "Date Sold"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<18} {:-<16} {:-<10} {:-<10} {:-<8} {:-<12} {:-<10}\n",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<18} {:<16} {:>10.2} {:>10.2} {:>8} {:>12} {:<10}\n",
                truncate(&r.supplier, 18),
                truncate(&r.product, 16),
                r.expected_margin_pct,
                r.actual_margin_pct,
                r.units_sold,
                format_currency(r.cost_per_unit),
                r.date_sold,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
