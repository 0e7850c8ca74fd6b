// Deletion executor
// Removes confirmed candidates one at a time and tallies what was actually freed

use super::error::SweepError;
use super::log::Logger;
use super::progress::ProgressMode;
use super::types::{Candidate, CleanOutcome};
use std::fs;
use std::io;
use std::path::Path;

/// What happened to a path handed to a [`DirRemover`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The tree was removed
    Removed,
    /// Nothing was there to remove
    Missing,
}

/// Filesystem seam used by the cleaner
pub trait DirRemover: Send + Sync {
    /// Recursively remove `path`. A path that does not exist is `Ok(Removal::Missing)`.
    fn remove(&self, path: &Path) -> Result<Removal, SweepError>;
}

/// Removes trees from the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl DirRemover for FsRemover {
    fn remove(&self, path: &Path) -> Result<Removal, SweepError> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removal::Missing),
            Err(e) => {
                return Err(SweepError::from_io_error(e, "inspecting", Some(path.to_path_buf())))
            }
        };

        let result = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match result {
            Ok(()) => Ok(Removal::Removed),
            // Gone between the check and the removal
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removal::Missing),
            Err(e) => Err(SweepError::from_io_error(e, "deleting", Some(path.to_path_buf()))),
        }
    }
}

/// Deletes candidate directories and reports how much was freed
pub struct Cleaner {
    logger: Logger,
    progress: ProgressMode,
    remover: Box<dyn DirRemover>,
}

impl Cleaner {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            progress: ProgressMode::Terminal,
            remover: Box::new(FsRemover),
        }
    }

    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_remover(mut self, remover: Box<dyn DirRemover>) -> Self {
        self.remover = remover;
        self
    }

    /// Remove every entry, in order. A failed entry is logged and left out of
    /// the tally; it never stops the rest of the batch.
    pub fn clean(&self, entries: &[Candidate]) -> CleanOutcome {
        let mut outcome = CleanOutcome::default();
        if entries.is_empty() {
            return outcome;
        }

        self.logger.info("Starting file deletion...");
        let bar = self.progress.delete_bar(entries.len() as u64);

        for entry in entries {
            match self.remover.remove(&entry.path) {
                Ok(Removal::Removed) => {
                    outcome.deleted_count += 1;
                    outcome.deleted_size += entry.size;
                }
                Ok(Removal::Missing) => {
                    self.logger
                        .info(format!("Directory '{}' is already gone", entry.path.display()));
                }
                Err(e) => {
                    self.logger.error_with(
                        format!("Failed to delete directory '{}'", entry.path.display()),
                        &[("error", e.summary())],
                    );
                }
            }
            bar.inc(1);
        }

        bar.finish();
        outcome
    }
}
