//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - opens the configured sales source
//! - runs the report or the terminal dashboard

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Command, ReportArgs, TuiArgs};
use crate::data::{SessionCache, open_source};
use crate::domain::{DateRange, FilterCriteria};
use crate::error::AppError;
use crate::logging::{self, LogTarget};
use crate::report::ReportLayout;

pub mod pipeline;

use pipeline::Dashboard;

/// Entry point for the `sdash` binary.
pub fn run() -> Result<(), AppError> {
    // `sdash` and `sdash --source fixture` behave like `sdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    logging::init("info", &LogTarget::Stderr)?;

    let source = open_source(&args.source.to_options())?;
    let mut dashboard = Dashboard::new(SessionCache::new(source));
    let criteria = report_criteria(&mut dashboard, &args)?;
    let output = dashboard.query(&criteria)?;

    let layout = ReportLayout {
        plot: !args.no_plot,
        width: args.width,
        height: args.height,
        detail: !args.no_detail,
    };
    let label = dashboard.source_label();
    println!(
        "{}",
        crate::report::format_report(&label, &criteria, &output, layout)
    );

    // Optional exports.
    if let Some(path) = &args.export_csv {
        crate::io::write_view_csv(path, &output.rows)?;
        info!(path = %path.display(), rows = output.rows.len(), "exported view CSV");
    }
    if let Some(path) = &args.export_json {
        crate::io::write_aggregates_json(path, &label, &criteria, &output.aggregates)?;
        info!(path = %path.display(), "exported aggregates JSON");
    }

    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    logging::init("warn", &LogTarget::File(args.log_file.clone()))?;

    let source = open_source(&args.source.to_options())?;
    crate::tui::run(Dashboard::new(SessionCache::new(source)))
}

/// Filters for the report: explicit flags win, dataset defaults fill the rest.
fn report_criteria(dashboard: &mut Dashboard, args: &ReportArgs) -> Result<FilterCriteria, AppError> {
    let defaults = dashboard.default_criteria()?;

    let mut criteria = if args.suppliers.is_empty() {
        defaults.clone()
    } else {
        let known = dashboard.suppliers()?;
        for name in &args.suppliers {
            if !known.contains(name) {
                warn!(supplier = %name, "unknown supplier; it will match no rows");
            }
        }
        FilterCriteria::new(args.suppliers.iter().cloned(), defaults.date_range)
    };

    criteria.date_range = DateRange::new(
        args.start.unwrap_or(defaults.date_range.start),
        args.end.unwrap_or(defaults.date_range.end),
    );
    if criteria.date_range.is_inverted() {
        warn!(
            start = %criteria.date_range.start,
            end = %criteria.date_range.end,
            "start is after end; the view will be empty"
        );
    }
    Ok(criteria)
}

/// Rewrite argv so `sdash` defaults to `sdash tui`.
///
/// Rules:
/// - `sdash`                        -> `sdash tui`
/// - `sdash --source fixture ...`   -> `sdash tui --source fixture ...`
/// - `sdash --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
