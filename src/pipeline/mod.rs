//! Pipeline components: walk loop, worker pool, aggregation and orchestration.

pub mod aggregator;
pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod pool;
pub mod walk;

pub use aggregator::{FailureRecord, RunSummary, aggregate_outcomes};
pub use context::{PipelineContext, PipelineTuning, create_outcome_channel};
pub use error_handler::check_run_result;
pub use orchestrator::{PipelineReport, run_pipeline};
pub use pool::{PoolSlot, WorkerPool};
pub use walk::{WalkOutcome, files_iter, run_walk_loop, to_outcome_walkdir, walkdir_iter};
