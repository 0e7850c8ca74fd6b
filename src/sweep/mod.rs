// Sweep engine
// Finds Maven directories left behind by interrupted downloads and removes them

pub mod clean;
pub mod config;
pub mod error;
pub mod list;
pub mod log;
pub mod progress;
pub mod report;
pub mod scan;
pub mod size;
pub mod types;

// Re-export commonly used types for convenience
pub use clean::{Cleaner, DirRemover, FsRemover, Removal};
pub use config::FileConfig;
pub use error::SweepError;
pub use list::{DirLister, EntryKind, FsLister, ListedEntry};
pub use log::{Level, LogSink, Logger, Record};
pub use progress::{ProgressMode, ScanCounters, ScanTicker};
pub use scan::Scanner;
pub use size::{DirSizer, FsSizer};
pub use types::{Candidate, CleanOutcome, ScanConfig, ScanOutcome, MARKER_SUFFIX};
