// Centralized error handling for the sweep engine
// Every failure carries the path and operation it happened on

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for scanning, sizing and cleaning
#[derive(Debug)]
pub enum SweepError {
    /// File system errors with context
    PathNotFound { path: PathBuf },
    NotADirectory { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    Io { path: Option<PathBuf>, operation: String, source: io::Error },

    /// A candidate directory could not be sized
    SizeComputation { path: PathBuf, reason: String },

    /// Scan setup errors
    InvalidParallelism { value: usize },
    WorkerPool { reason: String },

    /// Config file errors
    Config { path: PathBuf, reason: String },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SweepError::PathNotFound { path } => {
                writeln!(f, "Path not found: {}", path.display())?;
                write!(f, "Suggestion: Check that the repository path is correct and still exists")
            }
            SweepError::NotADirectory { path } => {
                writeln!(f, "Not a directory: {}", path.display())?;
                write!(f, "Suggestion: Point --path at the repository root directory, not a file")
            }
            SweepError::PermissionDenied { path, operation } => {
                writeln!(f, "Permission denied while {} {}", operation, path.display())?;
                write!(f, "Suggestion: Check directory permissions or run with appropriate privileges")
            }
            SweepError::Io { path, operation, source } => {
                if let Some(p) = path {
                    writeln!(f, "I/O error while {} {}: {}", operation, p.display(), source)?;
                } else {
                    writeln!(f, "I/O error while {}: {}", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk health")
            }
            SweepError::SizeComputation { path, reason } => {
                writeln!(f, "Failed to compute size of {}: {}", path.display(), reason)?;
                write!(f, "Suggestion: The directory may have changed during the scan; run it again")
            }
            SweepError::InvalidParallelism { value } => {
                writeln!(f, "Invalid worker count: {}", value)?;
                write!(f, "Suggestion: Use --workers with a value of at least 1")
            }
            SweepError::WorkerPool { reason } => {
                writeln!(f, "Failed to start worker pool: {}", reason)?;
                write!(f, "Suggestion: Try again with a smaller --workers value")
            }
            SweepError::Config { path, reason } => {
                writeln!(f, "Invalid config file {}: {}", path.display(), reason)?;
                write!(f, "Suggestion: Check the TOML syntax; supported keys are repository, workers and log_file")
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SweepError {
    /// Create the most specific error for an io::Error, keeping operation and path as context
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(path)) => SweepError::PathNotFound { path },
            (io::ErrorKind::PermissionDenied, Some(path)) => SweepError::PermissionDenied {
                path,
                operation: operation.to_string(),
            },
            (_, path) => SweepError::Io {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// First line of the message, without the suggestion. Used for one-line log records.
    pub fn summary(&self) -> String {
        self.to_string().lines().next().unwrap_or_default().to_string()
    }

    /// True when the error means the path is simply gone
    pub fn is_not_found(&self) -> bool {
        match self {
            SweepError::PathNotFound { .. } => true,
            SweepError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl From<io::Error> for SweepError {
    fn from(err: io::Error) -> Self {
        SweepError::from_io_error(err, "unknown operation", None)
    }
}
