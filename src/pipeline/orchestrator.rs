use log::debug;
use std::thread;

use crate::JobConfig;
use crate::engine::progress::setup_progress;
use crate::error::JobError;
use crate::pipeline::{self, PipelineContext, PipelineTuning, RunSummary, WorkerPool};

/// What a finished pipeline hands back to the driver.
#[derive(Debug)]
pub struct PipelineReport {
    pub summary: RunSummary,
    /// Entries visited by the walk (and explicit files), errors included.
    pub visited: usize,
    /// Pool capacity used for the run.
    pub num_threads: usize,
    /// Most actions that were in flight at the same time.
    pub peak_in_flight: usize,
}

/// Main orchestrator: walk -> classify -> pool-gated workers -> outcome channel -> aggregator.
///
/// Everything runs inside one `thread::scope`, so leaving it is the barrier: the walk is done,
/// every dispatched worker has finished, and the aggregator has seen the last record.
pub fn run_pipeline(config: &JobConfig) -> Result<PipelineReport, JobError> {
    let tuning = PipelineTuning::for_config(config);
    let pool = WorkerPool::new(tuning.num_threads);
    let (outcome_tx, outcome_rx) = pipeline::create_outcome_channel();

    let known_total = config.source_dir.is_none().then_some(config.files.len());
    let progress = setup_progress(config.progress, known_total);

    let (visited, summary) = thread::scope(|scope| {
        let aggregator = scope.spawn(move || pipeline::aggregate_outcomes(outcome_rx, progress));

        let ctx = PipelineContext {
            config,
            pool: &pool,
            outcome_tx,
        };
        let walked = config
            .source_dir
            .as_deref()
            .map(|root| pipeline::walkdir_iter(root, config.follow_links))
            .into_iter()
            .flatten();
        let listed = pipeline::files_iter(&config.files);
        let visited = pipeline::run_walk_loop(scope, &ctx, walked.chain(listed));
        debug!("walk finished: {} entries visited, waiting for workers", visited);

        // Dropping the walk's sender lets the aggregator finish once the last worker's clone is gone.
        drop(ctx);

        let summary = aggregator
            .join()
            .map_err(|_| JobError::Panicked("aggregator"));
        (visited, summary)
    });
    let summary = summary?;

    Ok(PipelineReport {
        summary,
        visited,
        num_threads: pool.capacity(),
        peak_in_flight: pool.peak(),
    })
}
