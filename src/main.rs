//! cac CLI: convert or relocate every file under a directory into the output directory.

use anyhow::Result;
use cac::engine::arg_parser::Cli;
use cac::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let result = handle_run(&cli);
    log::debug!("Total time: {:?}", start_time.elapsed());
    result
}
