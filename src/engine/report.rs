//! Run summary output

use anyhow::Result;

use crate::RunSummary;
use crate::utils::Colors;

/// Print the summary counts. Always printed, failures or not.
pub fn print_summary(summary: &RunSummary) {
    println!("\n=== conversion summary ===");
    println!(
        "{}",
        Colors::colorize(Colors::CONVERTED, &format!("files converted: {}", summary.converted))
    );
    println!(
        "{}",
        Colors::colorize(
            Colors::RELOCATED,
            &format!("files moved/copied: {}", summary.relocated)
        )
    );
    println!(
        "{}",
        Colors::colorize(Colors::SKIPPED, &format!("files skipped: {}", summary.skipped))
    );
    println!(
        "{}",
        Colors::colorize(Colors::FAILED, &format!("files failed: {}", summary.failed))
    );
    println!("total files processed: {}", summary.total());
}

/// Print the summary (counts and failures) as pretty JSON on stdout.
pub fn print_summary_json(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
