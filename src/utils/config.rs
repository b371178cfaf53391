//! Application configuration constants.
//! Defaults and tuning in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!("{pkg}.toml"),
            }
        })
    }

    /// Config file looked up in the current directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Job defaults ----

/// Default transcode command. Placeholders are replaced per file after the template is split into words.
pub const DEFAULT_COMMAND: &str = r#"ffmpeg -y -i "{{ .InputFile }}" "{{ .OutputFile }}""#;

/// Default target extension.
pub const DEFAULT_TARGET_EXT: &str = ".mp3";

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = ".";

// ---- Worker threads ----

/// Worker count limits for the pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Minimum pool capacity.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Channels ----

/// Capacity of the outcome channel between workers and the aggregator.
/// The aggregator drains continuously, so this only absorbs bursts of skips from the walk.
pub const OUTCOME_CHANNEL_CAP: usize = 10_000;

// ---- Reporting ----

/// Lines of captured transcoder stderr kept in a failure message (quiet mode).
pub const STDERR_TAIL_LINES: usize = 1;
