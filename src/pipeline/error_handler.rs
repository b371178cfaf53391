use anyhow::Result;

use crate::pipeline::RunSummary;

/// Check the finished run: list every failure (completion order) on stderr and return an
/// error when there was at least one. Call after the summary has been printed.
pub fn check_run_result(summary: &RunSummary) -> Result<()> {
    if summary.is_success() {
        return Ok(());
    }
    eprintln!("\n=== errors encountered ===");
    for (i, failure) in summary.failures.iter().enumerate() {
        eprintln!(
            "error {} [{}]: {}: {}",
            i + 1,
            failure.kind,
            failure.path.display(),
            failure.message
        );
    }
    Err(anyhow::anyhow!("completed with {} errors", summary.failed))
}
