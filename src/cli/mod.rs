//! Command-line parsing for the supplier sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data and engine code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::data::SourceOptions;
use crate::data::fixture::MAX_SYNTHETIC_ROWS;
use crate::domain::SourceKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sdash", version, about = "Supplier Performance Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive terminal dashboard (default).
    Tui(TuiArgs),
    /// Print the dashboard as a plain-text report and optionally export it.
    Report(ReportArgs),
}

/// Where the sales table comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Data source: `auto` uses MySQL when configured, otherwise the demo fixture.
    #[arg(long, value_enum, default_value_t = SourceKind::Auto)]
    pub source: SourceKind,

    /// Serve fixture data when the database cannot be reached.
    #[arg(long)]
    pub fallback: bool,

    /// Use a synthetic fixture with this many rows instead of the demo rows.
    #[arg(
        long,
        value_name = "N",
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_SYNTHETIC_ROWS as u64)
    )]
    pub synthetic: Option<usize>,

    /// Random seed for the synthetic fixture.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// TOML secrets file with a `[mysql]` table (overrides SUPPLIER_DB_* env vars).
    #[arg(long, value_name = "PATH")]
    pub secrets: Option<PathBuf>,
}

impl SourceArgs {
    pub fn to_options(&self) -> SourceOptions {
        SourceOptions {
            kind: self.source,
            secrets: self.secrets.clone(),
            synthetic: self.synthetic,
            seed: self.seed,
            fallback: self.fallback,
        }
    }
}

/// Options for the terminal dashboard.
#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Log file (the terminal is owned by the dashboard while it runs).
    #[arg(long, value_name = "PATH", default_value = "sdash.log")]
    pub log_file: PathBuf,
}

/// Options for the text report.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Supplier to include (repeatable). Defaults to every supplier.
    #[arg(short = 's', long = "supplier", value_name = "NAME")]
    pub suppliers: Vec<String>,

    /// First day of the range (YYYY-MM-DD). Defaults to the earliest sale.
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD). Defaults to the latest sale.
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Omit the detail table.
    #[arg(long)]
    pub no_detail: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,

    /// Export the filtered rows to CSV.
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export the aggregates to JSON.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{s}' ({e})"))
}
