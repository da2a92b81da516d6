//! Terminal plots for the non-interactive report.

pub mod ascii;

pub use ascii::{render_bar_chart, render_sales_plot};
