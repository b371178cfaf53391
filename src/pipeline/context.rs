//! Pipeline context and tuning: shared data handed to the walk loop and worker count derivation.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::path::PathBuf;

use crate::pipeline::pool::WorkerPool;
use crate::utils::config::{OUTCOME_CHANNEL_CAP, WorkerThreadLimits};
use crate::utils::fd_limit::determine_threads_given_fd_limit;
use crate::{JobConfig, Outcome, OutcomeRecord};

/// Tuning for one run: how many actions may be in flight at once.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
}

impl PipelineTuning {
    /// `num_threads` from the config when set, else available threads; capped by the FD limit.
    pub fn for_config(config: &JobConfig) -> Self {
        let limits = WorkerThreadLimits::current();
        let wanted = config
            .num_threads
            .filter(|&n| n > 0)
            .unwrap_or(limits.all_threads)
            .max(limits.floor);
        let num_threads = determine_threads_given_fd_limit(wanted);
        debug!("Using {} workers (wanted {})", num_threads, wanted);
        Self { num_threads }
    }
}

/// Shared context for the walk loop. The config and pool outlive every worker;
/// `outcome_tx` is cloned into each worker and dropped with the context when the walk ends.
pub struct PipelineContext<'env> {
    pub config: &'env JobConfig,
    pub pool: &'env WorkerPool,
    pub outcome_tx: Sender<OutcomeRecord>,
}

impl PipelineContext<'_> {
    /// Record an outcome produced on the walking thread (skips and traversal errors).
    pub fn record(&self, path: PathBuf, outcome: Outcome) {
        // The aggregator only stops once every sender is gone, and we hold one.
        let _ = self.outcome_tx.send(OutcomeRecord { path, outcome });
    }
}

/// Channel between workers and the aggregator.
pub fn create_outcome_channel() -> (Sender<OutcomeRecord>, Receiver<OutcomeRecord>) {
    bounded::<OutcomeRecord>(OUTCOME_CHANNEL_CAP)
}
