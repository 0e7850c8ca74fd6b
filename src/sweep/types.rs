// Data model shared by the scanner and the cleaner

use super::error::SweepError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Suffix of the files Maven leaves behind after an interrupted download
pub const MARKER_SUFFIX: &str = ".lastUpdated";

/// A directory selected for removal because it holds a marker file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub size: u64,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Input for a single scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    root: PathBuf,
    max_parallelism: usize,
}

impl ScanConfig {
    /// Build a scan configuration. The caller resolves the worker default; zero is rejected.
    pub fn new(root: impl Into<PathBuf>, max_parallelism: usize) -> Result<Self, SweepError> {
        if max_parallelism == 0 {
            return Err(SweepError::InvalidParallelism {
                value: max_parallelism,
            });
        }
        Ok(Self {
            root: root.into(),
            max_parallelism,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }
}

/// Result of a scan. `entries` stay usable even when `error` is set.
#[derive(Debug, serde::Serialize)]
pub struct ScanOutcome {
    pub entries: Vec<Candidate>,
    pub total_size: u64,
    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<SweepError>,
}

impl ScanOutcome {
    /// Build an outcome from deduplicated entries; the total is always derived from them
    pub fn from_entries(
        entries: Vec<Candidate>,
        duration: Duration,
        error: Option<SweepError>,
    ) -> Self {
        let total_size = entries.iter().map(|c| c.size).sum();
        Self {
            entries,
            total_size,
            duration,
            error,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tally of a clean run; only successful removals are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanOutcome {
    pub deleted_count: usize,
    pub deleted_size: u64,
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

fn serialize_error<S>(error: &Option<SweepError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
