//! Engine module: CLI surface and the per-file building blocks (classify, template, execute)

pub mod arg_parser;
pub mod classify;
pub mod cli;
pub mod executor;
pub mod progress;
pub mod report;
pub mod template;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use classify::{classify, is_eligible};
pub use cli::{handle_run, setup_config};
pub use executor::{copy_file, execute, run_command};
pub use template::{CommandTemplate, render};
pub use tools::{
    find_program, normalize_extension, output_path_for, parse_extension_list, running_as_root,
    same_file,
};
