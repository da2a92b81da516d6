//! Session-scoped memo of the loaded dataset.
//!
//! The dataset is loaded at most once per session. `invalidate()` is the only way
//! to force a reload; a reload replaces the whole dataset.

use std::sync::Arc;

use tracing::info;

use crate::data::SalesSource;
use crate::domain::SalesRecord;
use crate::error::LoadError;

pub struct SessionCache {
    source: Box<dyn SalesSource>,
    dataset: Option<Arc<[SalesRecord]>>,
}

impl SessionCache {
    pub fn new(source: Box<dyn SalesSource>) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    /// The memoized dataset, loading it on first use.
    pub fn dataset(&mut self) -> Result<Arc<[SalesRecord]>, LoadError> {
        if let Some(dataset) = &self.dataset {
            return Ok(Arc::clone(dataset));
        }

        let records: Arc<[SalesRecord]> = self.source.load()?.into();
        info!(
            rows = records.len(),
            source = %self.source.describe(),
            "loaded sales dataset"
        );
        self.dataset = Some(Arc::clone(&records));
        Ok(records)
    }

    /// Drop the memo; the next `dataset()` call hits the source again.
    pub fn invalidate(&mut self) {
        self.dataset = None;
    }

    /// Reload from the source. On failure the cache is left empty.
    pub fn refresh(&mut self) -> Result<Arc<[SalesRecord]>, LoadError> {
        self.invalidate();
        self.dataset()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }
}
