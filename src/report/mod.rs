//! Reporting utilities: the text rendition of the dashboard.

pub mod format;

pub use format::*;

use crate::app::pipeline::QueryOutput;
use crate::domain::FilterCriteria;

/// Layout knobs for `format_report`.
#[derive(Debug, Clone, Copy)]
pub struct ReportLayout {
    pub plot: bool,
    pub width: usize,
    pub height: usize,
    pub detail: bool,
}

/// Full report in dashboard order: header, metrics, both charts, detail table.
pub fn format_report(
    source_label: &str,
    criteria: &FilterCriteria,
    output: &QueryOutput,
    layout: ReportLayout,
) -> String {
    let agg = &output.aggregates;
    let mut out = String::new();

    out.push_str(&format_header(source_label, criteria));
    out.push('\n');
    out.push_str(&format_metrics(agg));
    out.push('\n');

    let bar_width = layout.plot.then_some(layout.width.saturating_sub(28).max(10));
    out.push_str(&format_profit_by_supplier(agg, bar_width));
    out.push('\n');

    out.push_str(&format_sales_by_date(agg));
    if layout.plot && !agg.is_empty() {
        out.push('\n');
        out.push_str(&crate::plot::render_sales_plot(
            &agg.sales_series(),
            layout.width,
            layout.height,
        ));
    }

    if layout.detail {
        out.push('\n');
        out.push_str(&format_detail_table(&output.rows));
    }

    out
}
