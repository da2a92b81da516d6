//! Output files written on request (`--export-csv`, `--export-json`, the TUI `e` key).

pub mod export;

pub use export::*;
