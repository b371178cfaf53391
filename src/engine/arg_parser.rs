use clap::Parser;
use std::path::PathBuf;

/// Conveniently convert audio files using ffmpeg.
///
/// Every file under DIRECTORY (or listed with --files) is converted to the target
/// extension, copied/moved when it already has it, or skipped by the extension filters.
#[derive(Clone, Parser)]
#[command(name = "cac", version)]
#[command(about = "Conveniently convert audio files using ffmpeg.")]
pub struct Cli {
    /// Convert files in DIRECTORY (walked recursively).
    #[arg(long, short = 'd', value_name = "DIRECTORY")]
    pub dir: Option<PathBuf>,

    /// Convert these files. Can specify multiple: -f a.wav b.flac
    #[arg(long, short = 'f', num_args = 1.., value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Convert files to this extension. Default: .mp3
    #[arg(long, short = 't', value_name = "EXT")]
    pub target: Option<String>,

    /// Only convert files with these extensions (comma separated or repeated). Wins over --except.
    #[arg(long, short = 's', num_args = 1.., value_delimiter = ',', value_name = "EXTS")]
    pub sources: Vec<String>,

    /// Do not convert files with these extensions (comma separated or repeated).
    #[arg(long, short = 'e', num_args = 1.., value_delimiter = ',', value_name = "EXTS")]
    pub except: Vec<String>,

    /// Output directory of processed files. Default: current directory.
    #[arg(long, short = 'o', value_name = "DIRECTORY")]
    pub out_dir: Option<PathBuf>,

    /// Create the output directory if it does not exist.
    #[arg(long, short = 'c', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub create_out_dir: Option<bool>,

    /// Delete original files after converting; move (rename) instead of copying.
    #[arg(long, short = 'D', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub delete: Option<bool>,

    /// Only show error logs; hide the converter's output.
    #[arg(long, short = 'q', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub quiet: Option<bool>,

    /// Verbose output (debug logs).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Convert command with {{ .InputFile }} and {{ .OutputFile }} placeholders.
    #[arg(long, value_name = "TEMPLATE")]
    pub command: Option<String>,

    /// Max conversions in flight. Default: available threads (capped by the open-file limit).
    #[arg(long, short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Follow symbolic links while walking DIRECTORY.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Show a progress counter.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Do not check that the command's program is in PATH before starting.
    #[arg(long)]
    pub no_tool_check: bool,

    /// Config file. Default: cac.toml in the current directory, when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
