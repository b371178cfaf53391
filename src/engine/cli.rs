//! CLI command handler: layer config file and flags, run the job, print the summary.

use anyhow::{Result, bail};
use log::warn;
use std::path::Path;

use crate::JobConfig;
use crate::engine::arg_parser::Cli;
use crate::engine::report::{print_summary, print_summary_json};
use crate::engine::running_as_root;
use crate::job::run_job;
use crate::pipeline::check_run_result;
use crate::utils::cac_toml::{CacToml, apply_file_to_config, load_cac_toml};
use crate::utils::config::PackagePaths;
use crate::utils::setup_logging;

/// Overwrite config field from a CLI flag when it was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $config:expr, $cli_field:ident => $config_field:ident) => {
        if let Some(v) = $cli.$cli_field {
            $config.$config_field = v;
        }
    };
}

fn load_config_file(cli: &Cli) -> Result<Option<CacToml>> {
    match cli.config.as_deref() {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            load_cac_toml(path)
        }
        None => load_cac_toml(Path::new(PackagePaths::get().config_filename())),
    }
}

/// Defaults, then the config file, then CLI flags. Also sets up logging.
pub fn setup_config(cli: &Cli) -> Result<JobConfig> {
    let file = load_config_file(cli)?;
    let mut config = JobConfig::default();
    if let Some(file) = file.as_ref() {
        apply_file_to_config(file, &mut config);
    }

    if let Some(dir) = cli.dir.as_ref() {
        config.source_dir = Some(dir.clone());
    }
    if !cli.files.is_empty() {
        config.files = cli.files.clone();
    }
    if let Some(target) = cli.target.as_ref() {
        config.target_ext = target.clone();
    }
    if !cli.sources.is_empty() {
        config.sources = cli.sources.clone();
    }
    if !cli.except.is_empty() {
        config.except = cli.except.clone();
    }
    if let Some(out_dir) = cli.out_dir.as_ref() {
        config.out_dir = out_dir.clone();
    }
    if let Some(command) = cli.command.as_ref() {
        config.command = command.clone();
    }
    if let Some(jobs) = cli.jobs {
        config.num_threads = Some(jobs);
    }
    apply_cli_opt!(cli, config, create_out_dir => create_out_dir);
    apply_cli_opt!(cli, config, delete => delete_original);
    apply_cli_opt!(cli, config, quiet => quiet);
    apply_cli_opt!(cli, config, follow_links => follow_links);
    apply_cli_opt!(cli, config, progress => progress);
    if cli.no_tool_check {
        config.check_tool = false;
    }

    let verbose = cli
        .verbose
        .or_else(|| file.as_ref().and_then(CacToml::verbose))
        .unwrap_or(false);
    setup_logging(verbose, config.quiet);
    Ok(config)
}

/// Run the job, always print the summary, then fail if any file failed.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let config = setup_config(cli)?;
    if running_as_root() && config.delete_original {
        warn!("Running as root with --delete: originals are removed regardless of ownership.");
    }
    let summary = run_job(&config)?;
    if cli.json {
        print_summary_json(&summary)?;
    } else {
        print_summary(&summary);
    }
    check_run_result(&summary)
}
