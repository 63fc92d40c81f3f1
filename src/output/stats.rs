//! Run summary reporting
//!
//! A sweep tolerates partial failure, so the closing summary is the place
//! where skipped genres and failed pages become visible to the operator.

use std::time::Duration;

/// Counters describing one completed sweep
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Genres discovered from the search form
    pub genres_discovered: usize,

    /// Genres skipped (zero results or count not found)
    pub genres_skipped: usize,

    /// Page tasks submitted to the worker pool
    pub pages_scheduled: usize,

    /// Page tasks that failed permanently
    pub pages_failed: usize,

    /// Records collected from successful pages
    pub records_collected: usize,

    /// Rows appended to the spreadsheet by this run
    pub rows_appended: usize,

    /// Rows in the spreadsheet after persisting
    pub total_rows: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Prints the run summary to stdout in a formatted manner
pub fn print_run_summary(summary: &RunSummary) {
    println!("=== Sweep Summary ===\n");

    println!("Genres:");
    println!("  Discovered: {}", summary.genres_discovered);
    println!("  Skipped (no results): {}", summary.genres_skipped);
    println!();

    println!("Pages:");
    println!("  Scheduled: {}", summary.pages_scheduled);
    println!("  Failed: {}", summary.pages_failed);

    let completed = summary.pages_scheduled.saturating_sub(summary.pages_failed);
    let success_rate = if summary.pages_scheduled > 0 {
        (completed as f64 / summary.pages_scheduled as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Success rate: {:.1}% ({} / {})",
        success_rate, completed, summary.pages_scheduled
    );
    println!();

    println!("Records:");
    println!("  Collected this run: {}", summary.records_collected);
    println!("  Appended to spreadsheet: {}", summary.rows_appended);
    println!("  Total rows now: {}", summary.total_rows);
    println!();

    println!("Completed in {:.1?}", summary.elapsed);
}
