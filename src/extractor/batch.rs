//! Parallel extraction over many files
//!
//! Files are independent, so a batch fans out across a rayon pool. Outcomes
//! come back in input order and a failing file never stops the others.

use super::MethodExtractor;
use crate::core::error::Result;
use crate::core::models::{BatchSummary, ExtractionOutcome, MethodRecord, SourceUnit};
use crate::core::source::ContentSource;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Message carried by outcomes of files skipped after cancellation
pub const CANCELLED_MESSAGE: &str = "Extraction cancelled";

/// Runs one extractor over a batch of files
#[derive(Debug, Clone)]
pub struct BatchExtractor {
    extractor: MethodExtractor,
    workers: usize,
}

impl BatchExtractor {
    pub fn new(extractor: MethodExtractor) -> Self {
        Self {
            extractor,
            workers: 0,
        }
    }

    /// Worker thread count; 0 lets rayon pick one per core
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn extractor(&self) -> &MethodExtractor {
        &self.extractor
    }

    /// Extract every unit, returning outcomes in input order
    pub fn run(
        &self,
        units: &[Arc<SourceUnit>],
        source: &dyn ContentSource,
    ) -> Result<Vec<ExtractionOutcome>> {
        self.run_until(units, source, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but files not yet started once `cancel` is
    /// set are reported as failed with [`CANCELLED_MESSAGE`].
    pub fn run_until(
        &self,
        units: &[Arc<SourceUnit>],
        source: &dyn ContentSource,
        cancel: &AtomicBool,
    ) -> Result<Vec<ExtractionOutcome>> {
        let pool = ThreadPoolBuilder::new().num_threads(self.workers).build()?;

        let outcomes: Vec<ExtractionOutcome> = pool.install(|| {
            units
                .par_iter()
                .map(|unit| {
                    if cancel.load(Ordering::Relaxed) {
                        ExtractionOutcome::failed(unit.clone(), CANCELLED_MESSAGE)
                    } else {
                        self.extractor.extract(unit, source)
                    }
                })
                .collect()
        });

        let summary = summarize(&outcomes);
        info!(
            profile = self.extractor.profile().name(),
            files = summary.total_files,
            succeeded = summary.successful_files,
            failed = summary.failed_files,
            methods = summary.total_methods,
            "batch complete"
        );
        Ok(outcomes)
    }
}

/// Tally a batch
pub fn summarize(outcomes: &[ExtractionOutcome]) -> BatchSummary {
    BatchSummary::from_outcomes(outcomes)
}

/// Records of successful outcomes, in outcome order
pub fn successful_records(outcomes: &[ExtractionOutcome]) -> Vec<MethodRecord> {
    outcomes
        .iter()
        .filter(|o| o.is_successful())
        .flat_map(|o| o.records().iter().cloned())
        .collect()
}
