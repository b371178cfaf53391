//! Public types for the job configuration and the per-file pipeline.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::engine::tools::{normalize_extension, parse_extension_list};
use crate::error::{ConfigError, FileError};
use crate::utils::config::{DEFAULT_COMMAND, DEFAULT_OUT_DIR, DEFAULT_TARGET_EXT};

/// Options for one run. Built once (CLI, config file or library caller) and read-only afterwards.
#[derive(Clone, Debug)]
pub struct JobConfig {
    /// Directory to walk. May be `None` when only [`Self::files`] are given.
    pub source_dir: Option<PathBuf>,
    /// Explicit files to process in addition to (or instead of) the walk.
    pub files: Vec<PathBuf>,
    /// Where converted and relocated files are written.
    pub out_dir: PathBuf,
    /// Extension every output gets, with leading dot (e.g. `.mp3`).
    pub target_ext: String,
    /// Allow-list of source extensions. Takes precedence over [`Self::except`] when non-empty.
    pub sources: Vec<String>,
    /// Deny-list of source extensions. Ignored when [`Self::sources`] is non-empty.
    pub except: Vec<String>,
    /// Remove the source after a successful conversion; relocate by rename instead of copy.
    pub delete_original: bool,
    /// Create [`Self::out_dir`] when missing instead of failing.
    pub create_out_dir: bool,
    /// Suppress the transcoder's stdout/stderr.
    pub quiet: bool,
    /// Transcode command with `{{ .InputFile }}` and `{{ .OutputFile }}` placeholders.
    pub command: String,
    /// Override worker count. When None, derived from available threads and the FD limit.
    pub num_threads: Option<usize>,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Show a progress counter while outcomes arrive.
    pub progress: bool,
    /// Check that the command's program exists in PATH before starting.
    pub check_tool: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            files: Vec::new(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            target_ext: DEFAULT_TARGET_EXT.to_string(),
            sources: Vec::new(),
            except: Vec::new(),
            delete_original: false,
            create_out_dir: false,
            quiet: false,
            command: DEFAULT_COMMAND.to_string(),
            num_threads: None,
            follow_links: false,
            progress: false,
            check_tool: true,
        }
    }
}

impl JobConfig {
    /// Copy with every extension trimmed and dotted (`mp3` -> `.mp3`) and comma-joined lists split.
    pub fn normalized(&self) -> Result<Self, ConfigError> {
        let target_ext = normalize_extension(&self.target_ext).ok_or(ConfigError::EmptyTarget)?;
        Ok(Self {
            target_ext,
            sources: parse_extension_list(&self.sources),
            except: parse_extension_list(&self.except),
            ..self.clone()
        })
    }
}

/// One non-directory entry found by the walk (or listed explicitly).
///
/// Names are kept as `OsString` so non-UTF-8 file names survive byte for byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    /// Base name, e.g. `song.wav`.
    pub name: OsString,
    /// Extension with leading dot, or empty when the name has none.
    pub ext: OsString,
}

impl FileCandidate {
    pub fn new(path: PathBuf) -> Self {
        let name = path.file_name().map(OsStr::to_os_string).unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| {
                let mut dotted = OsString::from(".");
                dotted.push(e);
                dotted
            })
            .unwrap_or_default();
        Self { path, name, ext }
    }

    /// Base name without the extension.
    pub fn stem(&self) -> &OsStr {
        self.path.file_stem().unwrap_or_default()
    }

    /// True when the extension is one of `exts` (normalized, dotted).
    pub fn has_ext_in(&self, exts: &[String]) -> bool {
        exts.iter().any(|e| self.ext.as_os_str() == OsStr::new(e))
    }
}

/// What to do with a candidate. Derived purely from the candidate and the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Convert,
    Relocate,
    Skip,
}

/// Result of handling one candidate (or one traversal error).
#[derive(Debug)]
pub enum Outcome {
    Converted,
    Relocated,
    Skipped,
    Failed(FileError),
}

/// A finished outcome tagged with the path it belongs to; what workers send to the aggregator.
#[derive(Debug)]
pub struct OutcomeRecord {
    pub path: PathBuf,
    pub outcome: Outcome,
}
