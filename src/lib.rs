//! cac: batch-convert a directory tree with an external tool (ffmpeg by default).
//!
//! Each file is classified as convert, relocate or skip; work runs on a bounded pool and
//! every outcome lands in one [`RunSummary`].

pub mod engine;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{ConfigError, ExecutionError, FileError, JobError, TemplateError};
pub use job::{run_job, run_job_report};
pub use pipeline::{FailureRecord, PipelineReport, RunSummary};
