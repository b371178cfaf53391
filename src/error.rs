//! Error taxonomy for a conversion run.
//!
//! Only [`ConfigError`] aborts a run. Everything that goes wrong for a single file
//! ([`FileError`]) is tagged with the path and handed to the aggregator instead.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Preconditions checked before traversal starts. Fatal to the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("input directory (--dir) or file(s) (--files) are required")]
    NoInput,

    #[error("target extension cannot be empty")]
    EmptyTarget,

    #[error("directory {} does not exist", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to access {}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory {}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{program} binary not found in PATH")]
    ToolNotFound { program: String },
}

/// Malformed command template. Evaluated per invocation, so it is reported per file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("command template is empty")]
    Empty,

    #[error("unclosed placeholder starting at offset {0}")]
    UnclosedPlaceholder(usize),

    #[error("unknown placeholder {{{{ {0} }}}} (expected .InputFile or .OutputFile)")]
    UnknownPlaceholder(String),

    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),

    #[error("trailing backslash")]
    TrailingEscape,
}

/// Failure while performing the action for one file.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} failed with {status}{}", stderr_suffix(.stderr))]
    ExitStatus {
        program: String,
        status: ExitStatus,
        stderr: Option<String>,
    },

    #[error("{} is not a regular file", .path.display())]
    NotRegularFile { path: PathBuf },

    #[error("failed to copy file to {}", .dst.display())]
    Copy {
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move file to {}", .dst.display())]
    Rename {
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("converted, but failed to delete original file")]
    DeleteOriginal {
        #[source]
        source: io::Error,
    },

    #[error("worker panicked: {0}")]
    Panicked(String),
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr {
        Some(line) => format!(": {line}"),
        None => String::new(),
    }
}

/// Per-file error. Never aborts the run; recorded in the summary next to its path.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("error accessing path: {0}")]
    Traversal(String),

    #[error("invalid command template")]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl FileError {
    /// Short category name used in reports and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Traversal(_) => "traversal",
            FileError::Template(_) => "template",
            FileError::Execution(_) => "execution",
        }
    }
}

/// Top-level failure of [`run_job`](crate::run_job).
#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0} thread panicked")]
    Panicked(&'static str),
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
