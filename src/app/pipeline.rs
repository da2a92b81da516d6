//! Shared "query pipeline" logic used by both the report command and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! cached dataset -> filter -> aggregate
//!
//! The report command and the TUI can then focus on presentation (printing vs widgets).

use std::time::Instant;

use chrono::NaiveDate;
use tracing::debug;

use crate::data::SessionCache;
use crate::domain::{AggregateResult, FilterCriteria, SalesRecord, date_bounds, distinct_suppliers};
use crate::engine;
use crate::error::LoadError;

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    /// Filtered rows in source order (detail table, CSV export).
    pub rows: Vec<SalesRecord>,
    pub aggregates: AggregateResult,
}

/// The dashboard's data side: a session cache plus the filter/aggregate pipeline.
pub struct Dashboard {
    cache: SessionCache,
}

impl Dashboard {
    pub fn new(cache: SessionCache) -> Self {
        Self { cache }
    }

    /// Run the full pipeline for `criteria`. Re-runs everything on each call.
    pub fn query(&mut self, criteria: &FilterCriteria) -> Result<QueryOutput, LoadError> {
        let cache_hit = self.cache.is_loaded();
        let dataset = self.cache.dataset()?;
        let started = Instant::now();

        let view = engine::apply(&dataset, criteria);
        let aggregates = engine::aggregate(&view);
        let rows = view.to_records();

        debug!(
            suppliers = criteria.selected_suppliers.len(),
            start = %criteria.date_range.start,
            end = %criteria.date_range.end,
            rows = rows.len(),
            cache_hit,
            elapsed_us = started.elapsed().as_micros() as u64,
            "query"
        );

        Ok(QueryOutput { rows, aggregates })
    }

    /// All suppliers and the full date span (the initial filter state).
    pub fn default_criteria(&mut self) -> Result<FilterCriteria, LoadError> {
        let dataset = self.cache.dataset()?;
        Ok(FilterCriteria::select_all(&dataset))
    }

    /// Supplier options for the multi-select, in first-seen order.
    pub fn suppliers(&mut self) -> Result<Vec<String>, LoadError> {
        let dataset = self.cache.dataset()?;
        Ok(distinct_suppliers(&dataset))
    }

    pub fn date_bounds(&mut self) -> Result<Option<(NaiveDate, NaiveDate)>, LoadError> {
        let dataset = self.cache.dataset()?;
        Ok(date_bounds(&dataset))
    }

    /// Manual refresh: drop the memo and reload from the source.
    pub fn refresh(&mut self) -> Result<usize, LoadError> {
        Ok(self.cache.refresh()?.len())
    }

    pub fn source_label(&self) -> String {
        self.cache.source_label()
    }
}
