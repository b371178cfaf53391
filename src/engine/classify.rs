//! Decide what happens to a file: convert, relocate or skip.

use std::ffi::OsStr;

use crate::{Decision, FileCandidate, JobConfig};

/// True when the candidate passes the source filters.
/// A non-empty allow-list (`sources`) wins; otherwise the deny-list (`except`) applies.
pub fn is_eligible(candidate: &FileCandidate, config: &JobConfig) -> bool {
    if !config.sources.is_empty() {
        candidate.has_ext_in(&config.sources)
    } else {
        !candidate.has_ext_in(&config.except)
    }
}

/// Pure and total: the same candidate and config always give the same decision.
pub fn classify(candidate: &FileCandidate, config: &JobConfig) -> Decision {
    if !is_eligible(candidate, config) {
        Decision::Skip
    } else if candidate.ext.as_os_str() == OsStr::new(&config.target_ext) {
        Decision::Relocate
    } else {
        Decision::Convert
    }
}
