// Human-readable and JSON summaries of scan and clean runs

use super::log::Logger;
use super::types::{CleanOutcome, ScanOutcome};
use humansize::{format_size, BINARY};
use std::time::Duration;

/// Elapsed time rounded to milliseconds, e.g. `1.234s` or `87ms`
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}

pub fn scan_summary(outcome: &ScanOutcome) -> String {
    format!(
        "Found {} unique directories containing '.lastUpdated' files, total {} to be deleted.",
        outcome.entries.len(),
        format_size(outcome.total_size, BINARY)
    )
}

pub fn dry_run_summary(outcome: &ScanOutcome) -> String {
    format!(
        "Dry run mode: would delete {} directories, freeing {}.",
        outcome.entries.len(),
        format_size(outcome.total_size, BINARY)
    )
}

pub fn clean_summary(outcome: &CleanOutcome) -> String {
    format!(
        "Cleanup complete! Deleted {} directories, freed {}.",
        outcome.deleted_count,
        format_size(outcome.deleted_size, BINARY)
    )
}

/// Log the timing and totals of a finished scan
pub fn log_scan(logger: &Logger, outcome: &ScanOutcome) {
    logger.time(format!(
        "Scan completed, took {}.",
        format_duration(outcome.duration)
    ));
    if !outcome.is_empty() {
        logger.info(scan_summary(outcome));
    }
}

/// Log each candidate with its size; used by dry runs
pub fn log_candidates(logger: &Logger, outcome: &ScanOutcome) {
    for candidate in &outcome.entries {
        logger.info_with(
            candidate.path.display().to_string(),
            &[("size", format_size(candidate.size, BINARY))],
        );
    }
}

/// Machine-readable report printed by `--json`
#[derive(Debug, serde::Serialize)]
pub struct JsonReport<'a> {
    pub scan: &'a ScanOutcome,
    pub clean: Option<CleanOutcome>,
    pub dry_run: bool,
}

impl JsonReport<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
