//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - source rows before and after normalization (`RawSalesRow`, `SalesRecord`)
//! - filter inputs (`FilterCriteria`, `DateRange`)
//! - aggregation outputs (`AggregateResult`)

pub mod types;

pub use types::*;
