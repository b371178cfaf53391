//! Walk loop: consumes an iterator of entries / errors, classifies each entry and dispatches
//! the ones that need work onto the pool.

use log::debug;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::Scope;

use crate::engine::classify::classify;
use crate::engine::executor::execute;
use crate::error::{ExecutionError, FileError};
use crate::pipeline::pool::WorkerPool;
use crate::{Decision, FileCandidate, JobConfig, Outcome, OutcomeRecord};

use super::context::PipelineContext;

/// One result from a directory walk: a directory, a non-directory entry, or an error with optional path.
pub enum WalkOutcome {
    Dir(PathBuf),
    Ok(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_dir() => WalkOutcome::Dir(entry.into_path()),
        Ok(entry) => WalkOutcome::Ok(entry.into_path()),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Depth-first walk of `root`.
pub fn walkdir_iter(root: &Path, follow_links: bool) -> impl Iterator<Item = WalkOutcome> + use<> {
    walkdir::WalkDir::new(root)
        .follow_links(follow_links)
        .into_iter()
        .map(to_outcome_walkdir)
}

/// Explicitly listed files. A missing path or a directory is an error for that path.
pub fn files_iter(files: &[PathBuf]) -> impl Iterator<Item = WalkOutcome> + '_ {
    files.iter().map(|path| match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => WalkOutcome::Err {
            msg: "is a directory, not a file".to_string(),
            path: Some(path.clone()),
        },
        Ok(_) => WalkOutcome::Ok(path.clone()),
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: Some(path.clone()),
        },
    })
}

/// Run the walk loop: classify every entry from `iter`, record skips and traversal errors
/// directly, dispatch the rest onto `scope` gated by the pool. Does not wait for dispatched
/// work; the scope does. Returns the number of entries visited (directories excluded).
pub fn run_walk_loop<'scope, 'env, I>(
    scope: &'scope Scope<'scope, 'env>,
    ctx: &PipelineContext<'env>,
    iter: I,
) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut visited = 0_usize;
    let mut last_path: Option<PathBuf> = None;
    for outcome in iter {
        match outcome {
            WalkOutcome::Dir(path) => {
                debug!("entering directory: {}", path.display());
                last_path = Some(path);
            }
            WalkOutcome::Ok(path) => {
                visited += 1;
                last_path = Some(path.clone());
                dispatch(scope, ctx, FileCandidate::new(path));
            }
            WalkOutcome::Err { msg, path } => {
                visited += 1;
                // Errors without a path still count; tie them to the last path we saw.
                let path = path.unwrap_or_else(|| {
                    PathBuf::from(format!(
                        "<no-path, last was {}>",
                        last_path
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "<none>".to_string())
                    ))
                });
                ctx.record(path, Outcome::Failed(FileError::Traversal(msg)));
            }
        }
    }
    visited
}

/// Classify one candidate; skips are recorded here, everything else waits for a pool slot
/// (blocking the walk while the pool is full) and runs on its own scoped thread.
fn dispatch<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    ctx: &PipelineContext<'env>,
    candidate: FileCandidate,
) {
    let config: &'env JobConfig = ctx.config;
    let decision = classify(&candidate, config);
    debug!(
        "found file: {} (extension: {:?}) - {:?}",
        candidate.path.display(),
        candidate.ext,
        decision
    );
    if decision == Decision::Skip {
        ctx.record(candidate.path, Outcome::Skipped);
        return;
    }

    let pool: &'env WorkerPool = ctx.pool;
    let slot = pool.acquire();
    let outcome_tx = ctx.outcome_tx.clone();
    scope.spawn(move || {
        let _slot = slot;
        let outcome = run_guarded(|| execute(&candidate, decision, config));
        let _ = outcome_tx.send(OutcomeRecord {
            path: candidate.path,
            outcome,
        });
    });
}

/// Run `action`, turning a panic into a failed outcome so every dispatched file still reports once.
fn run_guarded<F>(action: F) -> Outcome
where
    F: FnOnce() -> Outcome,
{
    panic::catch_unwind(AssertUnwindSafe(action)).unwrap_or_else(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Outcome::Failed(FileError::Execution(ExecutionError::Panicked(msg)))
    })
}
