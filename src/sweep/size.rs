// Directory sizing
// A second, independent walk over each candidate that sums regular file lengths

use super::error::SweepError;
use jwalk::{Parallelism, WalkDir};
use std::path::Path;

/// Filesystem seam used by the scanner to size a candidate directory
pub trait DirSizer: Send + Sync {
    /// Total byte length of every regular file below `path`
    fn dir_size(&self, path: &Path) -> Result<u64, SweepError>;
}

/// Sizes directories by walking the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSizer;

impl DirSizer for FsSizer {
    fn dir_size(&self, path: &Path) -> Result<u64, SweepError> {
        let mut total = 0u64;

        // Serial walk: the scanner's worker pool already provides the parallelism
        for entry_result in WalkDir::new(path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
        {
            let entry = entry_result.map_err(|e| SweepError::SizeComputation {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            // Directories and symlinks contribute nothing, only file content does
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| SweepError::SizeComputation {
                path: entry.path(),
                reason: e.to_string(),
            })?;
            total += metadata.len();
        }

        Ok(total)
    }
}
