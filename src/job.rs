//! Job driver: check preconditions, run the pipeline, hand back the summary.

use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

use crate::engine::template::CommandTemplate;
use crate::engine::tools::find_program;
use crate::error::{ConfigError, JobError};
use crate::pipeline::{PipelineReport, RunSummary, run_pipeline};
use crate::JobConfig;

/// Run one job and return its summary.
///
/// Only precondition failures are errors here. Per-file failures are in
/// [`RunSummary::failures`]; check [`RunSummary::is_success`] for the overall result.
pub fn run_job(config: &JobConfig) -> Result<RunSummary, JobError> {
    run_job_report(config).map(|report| report.summary)
}

/// Same as [`run_job`] but also returns walk and pool statistics.
pub fn run_job_report(config: &JobConfig) -> Result<PipelineReport, JobError> {
    let config = config.normalized()?;
    check_preconditions(&config)?;

    if let Some(dir) = config.source_dir.as_deref() {
        info!("source directory: {}", dir.display());
    }
    if !config.files.is_empty() {
        info!("input files: {}", config.files.len());
    }
    info!("target extension: {}", config.target_ext);
    info!("output directory: {}", config.out_dir.display());
    if !config.sources.is_empty() {
        info!("source extensions filter: {:?}", config.sources);
    } else if !config.except.is_empty() {
        info!("exempted extensions: {:?}", config.except);
    }

    let report = run_pipeline(&config)?;
    debug!(
        "visited {} entries with {} workers (peak {} in flight)",
        report.visited, report.num_threads, report.peak_in_flight
    );
    Ok(report)
}

/// Everything that must hold before the first file is touched.
pub fn check_preconditions(config: &JobConfig) -> Result<(), ConfigError> {
    if config.source_dir.is_none() && config.files.is_empty() {
        return Err(ConfigError::NoInput);
    }
    if let Some(dir) = config.source_dir.as_deref() {
        check_source_dir(dir)?;
    }
    if config.check_tool {
        check_tool(&config.command)?;
    }
    prepare_out_dir(&config.out_dir, config.create_out_dir)
}

fn check_source_dir(dir: &Path) -> Result<(), ConfigError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        }),
        Err(source) => Err(ConfigError::Access {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Output directory must exist, unless `create` is set, in which case it is created.
fn prepare_out_dir(dir: &Path, create: bool) -> Result<(), ConfigError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound && create => {
            info!("creating output directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateOutputDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        }),
        Err(source) => Err(ConfigError::Access {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// The command's program must be runnable. A template that does not parse is left to fail per file.
fn check_tool(command: &str) -> Result<(), ConfigError> {
    let template = match CommandTemplate::parse(command) {
        Ok(t) => t,
        Err(e) => {
            debug!("command template does not parse ({}); each conversion will report it", e);
            return Ok(());
        }
    };
    match template.program() {
        Some(program) if find_program(&program).is_none() => {
            Err(ConfigError::ToolNotFound { program })
        }
        _ => Ok(()),
    }
}
