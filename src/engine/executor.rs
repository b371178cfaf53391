//! Perform the action chosen for one file and report its outcome.
//!
//! Every function here touches at most the candidate and its output path. Errors are
//! returned as [`FileError`] and turned into [`Outcome::Failed`] by [`execute`].

use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::engine::template;
use crate::engine::tools::{output_path_for, same_file};
use crate::error::{ExecutionError, FileError};
use crate::utils::config::STDERR_TAIL_LINES;
use crate::{Decision, FileCandidate, JobConfig, Outcome};

/// Run `decision` for `candidate`. Never panics on I/O failure; failures become [`Outcome::Failed`].
pub fn execute(candidate: &FileCandidate, decision: Decision, config: &JobConfig) -> Outcome {
    let result = match decision {
        Decision::Convert => convert(candidate, config),
        Decision::Relocate => relocate(candidate, config),
        Decision::Skip => Ok(Outcome::Skipped),
    };
    result.unwrap_or_else(Outcome::Failed)
}

fn convert(candidate: &FileCandidate, config: &JobConfig) -> Result<Outcome, FileError> {
    let output = output_path_for(candidate, &config.out_dir, &config.target_ext);
    info!(
        "converting: {} -> {}",
        candidate.path.display(),
        output.display()
    );

    let argv = template::render(&config.command, &candidate.path, &output)?;
    run_command(&argv, config.quiet)?;

    if config.delete_original {
        debug!("deleting original file: {}", candidate.path.display());
        fs::remove_file(&candidate.path)
            .map_err(|source| ExecutionError::DeleteOriginal { source })?;
    }

    info!(
        "converted: {} -> {}",
        candidate.path.display(),
        output.display()
    );
    Ok(Outcome::Converted)
}

fn relocate(candidate: &FileCandidate, config: &JobConfig) -> Result<Outcome, FileError> {
    let output = output_path_for(candidate, &config.out_dir, &config.target_ext);

    // Moving or copying a file onto itself would truncate or delete it.
    if same_file(&candidate.path, &output) {
        info!(
            "already in output directory - skipping: {}",
            candidate.path.display()
        );
        return Ok(Outcome::Skipped);
    }

    if config.delete_original {
        info!("moving: {} -> {}", candidate.path.display(), output.display());
        fs::rename(&candidate.path, &output).map_err(|source| ExecutionError::Rename {
            dst: output.clone(),
            source,
        })?;
    } else {
        info!(
            "copying: {} -> {}",
            candidate.path.display(),
            output.display()
        );
        copy_file(&candidate.path, &output)?;
    }
    Ok(Outcome::Relocated)
}

/// Copy a regular file, preserving permissions. Directories, sockets and other special files are rejected.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, ExecutionError> {
    let copy_err = |source: io::Error| ExecutionError::Copy {
        dst: dst.to_path_buf(),
        source,
    };
    let meta = fs::metadata(src).map_err(copy_err)?;
    if !meta.is_file() {
        return Err(ExecutionError::NotRegularFile {
            path: src.to_path_buf(),
        });
    }
    fs::copy(src, dst).map_err(copy_err)
}

/// Run `argv` to completion. Output is inherited unless `quiet`, in which case stderr is
/// captured and its tail attached to a failure.
pub fn run_command(argv: &[OsString], quiet: bool) -> Result<(), ExecutionError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(ExecutionError::Spawn {
            program: String::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
        });
    };
    let program_name = program.to_string_lossy().into_owned();
    let spawn_err = |source: io::Error| ExecutionError::Spawn {
        program: program_name.clone(),
        source,
    };

    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    debug!("running: {:?}", cmd);

    let (status, stderr) = if quiet {
        let output = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(spawn_err)?;
        (output.status, stderr_tail(&output.stderr))
    } else {
        (cmd.status().map_err(spawn_err)?, None)
    };

    if status.success() {
        Ok(())
    } else {
        Err(ExecutionError::ExitStatus {
            program: program_name,
            status,
            stderr,
        })
    }
}

/// Last non-empty lines of captured stderr, joined with ` | `.
fn stderr_tail(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    Some(lines[start..].join(" | "))
}
