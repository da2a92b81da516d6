//! Filter and aggregation engine.
//!
//! Both stages are total functions over in-memory records: no I/O, no error paths.

pub mod aggregate;
pub mod filter;

pub use aggregate::aggregate;
pub use filter::{FilteredView, apply};
