//! Path, extension and PATH-lookup utilities

use std::path::{Path, PathBuf};

use crate::FileCandidate;

/// Trim and dot an extension (`mp3` -> `.mp3`). Returns None for an empty entry.
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{ext}"))
    }
}

/// Split comma-joined entries (`".wav, flac"`) and normalize each; empty entries are dropped.
pub fn parse_extension_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.split(','))
        .filter_map(normalize_extension)
        .collect()
}

/// `out_dir / (stem + target_ext)`. Same rule for conversions and relocations.
pub fn output_path_for(candidate: &FileCandidate, out_dir: &Path, target_ext: &str) -> PathBuf {
    let mut file_name = candidate.stem().to_os_string();
    file_name.push(target_ext);
    out_dir.join(file_name)
}

/// True when both paths name the same file. Falls back to lexical equality when either does not resolve.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Locate `program` the way the OS would when spawning it: paths are checked directly, bare names in PATH.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> {
    let owned = program.to_string();
    [String::new(), ".exe".to_string(), ".cmd".to_string(), ".bat".to_string()]
        .into_iter()
        .map(move |suffix| format!("{owned}{suffix}"))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> {
    std::iter::once(program.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// True if the process is running with effective uid 0 (e.g. via sudo).
#[cfg(unix)]
pub fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn running_as_root() -> bool {
    false
}
