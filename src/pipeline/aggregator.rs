//! Single serialization point for outcomes: workers send records, one thread folds them.

use crossbeam_channel::Receiver;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;

use crate::engine::progress::{ProgressBar, finish_progress_bar, update_progress_bar};
use crate::error::error_chain;
use crate::{Outcome, OutcomeRecord};

/// One failed path and its rendered error chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    /// `traversal`, `template` or `execution`.
    pub kind: &'static str,
    pub message: String,
}

/// Counts per outcome plus failures in completion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub converted: usize,
    pub relocated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    /// Fold one outcome in.
    pub fn record(&mut self, path: PathBuf, outcome: Outcome) {
        match outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Relocated => self.relocated += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(err) => {
                self.failed += 1;
                let message = error_chain(&err);
                warn!("failed: {}: {}", path.display(), message);
                self.failures.push(FailureRecord {
                    path,
                    kind: err.kind(),
                    message,
                });
            }
        }
    }

    /// Number of outcomes recorded; equals the number of entries visited once the run is over.
    pub fn total(&self) -> usize {
        self.converted + self.relocated + self.skipped + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Drain `outcome_rx` until every sender is gone and return the final summary.
pub fn aggregate_outcomes(
    outcome_rx: Receiver<OutcomeRecord>,
    progress: Option<ProgressBar>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    while let Ok(OutcomeRecord { path, outcome }) = outcome_rx.recv() {
        summary.record(path, outcome);
        if let Some(bar) = progress.as_ref() {
            update_progress_bar(bar, 1);
        }
    }
    if let Some(bar) = progress.as_ref() {
        finish_progress_bar(bar);
    }
    summary
}
