//! `supplier-dash` library crate.
//!
//! The binary (`sdash`) is a thin wrapper around this library so that:
//!
//! - the filter/aggregate engine is testable without a terminal or a database
//! - the report command and the TUI share one query pipeline
//! - data sources stay swappable behind `data::SalesSource`

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod normalize;
pub mod plot;
pub mod report;
pub mod tui;
