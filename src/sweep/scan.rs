// Repository scanning module
// Sequential walk for marker discovery, bounded worker pool for sizing

use super::error::SweepError;
use super::list::{DirLister, EntryKind, FsLister, Listing};
use super::log::Logger;
use super::progress::{ProgressMode, ScanCounters, ScanTicker};
use super::size::{DirSizer, FsSizer};
use super::types::{Candidate, ScanConfig, ScanOutcome, MARKER_SUFFIX};
use crossbeam_channel::{bounded, Sender};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

/// True if a file name marks an interrupted download
pub fn is_marker(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(MARKER_SUFFIX.as_bytes())
}

/// Fold possibly repeated discoveries into one candidate per directory, ordered by path
pub fn dedup_candidates(collected: Vec<Candidate>) -> Vec<Candidate> {
    let mut unique: BTreeMap<PathBuf, Candidate> = BTreeMap::new();
    for candidate in collected {
        unique.insert(candidate.path.clone(), candidate);
    }
    unique.into_values().collect()
}

/// Finds directories holding `.lastUpdated` markers and sizes them
pub struct Scanner {
    logger: Logger,
    progress: ProgressMode,
    sizer: Arc<dyn DirSizer>,
    lister: Arc<dyn DirLister>,
}

impl Scanner {
    /// Create a scanner that lists and sizes directories on the real filesystem
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            progress: ProgressMode::Terminal,
            sizer: Arc::new(FsSizer),
            lister: Arc::new(FsLister),
        }
    }

    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the sizing backend
    pub fn with_sizer(mut self, sizer: Arc<dyn DirSizer>) -> Self {
        self.sizer = sizer;
        self
    }

    /// Replace the directory listing backend
    pub fn with_lister(mut self, lister: Arc<dyn DirLister>) -> Self {
        self.lister = lister;
        self
    }

    /// Scan a repository root.
    ///
    /// Never fails as a whole: per-path problems are logged and skipped, and a
    /// fatal walk error is returned in `ScanOutcome::error` next to whatever was
    /// collected before it happened.
    pub fn scan(&self, config: &ScanConfig) -> ScanOutcome {
        let start_time = Instant::now();

        let ticker = ScanTicker::start(self.progress);
        let counters = Arc::clone(ticker.counters());

        let (collected, error) = self.collect(config, &counters);

        // Every worker has joined; stop the bar before finalizing so nothing is drawn after return
        ticker.finish();

        let entries = dedup_candidates(collected);
        ScanOutcome::from_entries(entries, start_time.elapsed(), error)
    }

    /// Run the walker and the sizing pool side by side and wait for both
    fn collect(
        &self,
        config: &ScanConfig,
        counters: &ScanCounters,
    ) -> (Vec<Candidate>, Option<SweepError>) {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_parallelism())
            .thread_name(|i| format!("mvn-sweep-size-{}", i))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                return (
                    Vec::new(),
                    Some(SweepError::WorkerPool {
                        reason: e.to_string(),
                    }),
                )
            }
        };

        let results: Mutex<Vec<Candidate>> = Mutex::new(Vec::new());

        // Bounded queue: the walker blocks once every worker is busy and the queue is full
        let (sender, receiver) = bounded::<PathBuf>(config.max_parallelism());

        let walk_result = thread::scope(|scope| {
            let logger = &self.logger;
            let lister: &dyn DirLister = self.lister.as_ref();
            let walker = scope.spawn(move || {
                let walk = Walk {
                    root: config.root(),
                    lister,
                    logger,
                    counters,
                    sender,
                };
                walk.run()
            });

            pool.install(|| {
                receiver
                    .into_iter()
                    .par_bridge()
                    .for_each(|dir| self.size_candidate(dir, &results, counters));
            });

            walker.join()
        });

        let error = match walk_result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(_) => Some(SweepError::Io {
                path: Some(config.root().to_path_buf()),
                operation: "walking".to_string(),
                source: io::Error::other("walker thread panicked"),
            }),
        };

        let collected = match results.into_inner() {
            Ok(collected) => collected,
            Err(poisoned) => poisoned.into_inner(),
        };
        (collected, error)
    }

    fn size_candidate(&self, dir: PathBuf, results: &Mutex<Vec<Candidate>>, counters: &ScanCounters) {
        match self.sizer.dir_size(&dir) {
            Ok(size) => {
                counters.record_candidate(size);
                let candidate = Candidate::new(dir, size);
                match results.lock() {
                    Ok(mut collected) => collected.push(candidate),
                    Err(poisoned) => poisoned.into_inner().push(candidate),
                }
            }
            Err(e) => {
                self.logger.warning_with(
                    format!("Error calculating size of {} (skipped)", dir.display()),
                    &[("error", e.summary())],
                );
            }
        }
    }
}

/// Depth-first walk state, owned by the walker thread
struct Walk<'a> {
    root: &'a Path,
    lister: &'a dyn DirLister,
    logger: &'a Logger,
    counters: &'a ScanCounters,
    sender: Sender<PathBuf>,
}

impl Walk<'_> {
    fn run(&self) -> Result<(), SweepError> {
        let metadata = fs::metadata(self.root).map_err(|e| {
            SweepError::from_io_error(e, "scanning", Some(self.root.to_path_buf()))
        })?;
        if !metadata.is_dir() {
            return Err(SweepError::NotADirectory {
                path: self.root.to_path_buf(),
            });
        }
        self.counters.visit();

        let listing = self.lister.list(self.root).map_err(|e| {
            SweepError::from_io_error(e, "reading directory", Some(self.root.to_path_buf()))
        })?;

        let mut pending = self.visit_listing(self.root, listing)?;
        while let Some(dir) = pending.pop() {
            let listing = match self.lister.list(&dir) {
                Ok(listing) => listing,
                Err(e) => {
                    if !self.root.exists() {
                        return Err(SweepError::PathNotFound {
                            path: self.root.to_path_buf(),
                        });
                    }
                    self.logger.warning_with(
                        format!("Error accessing path {} (skipped)", dir.display()),
                        &[("error", e.to_string())],
                    );
                    continue;
                }
            };
            let subdirs = self.visit_listing(&dir, listing)?;
            pending.extend(subdirs);
        }

        Ok(())
    }

    /// Visit one directory listing. Returns the subdirectories still to walk,
    /// which is none at all once a marker shows the directory is a candidate.
    fn visit_listing(&self, dir: &Path, listing: Listing) -> Result<Vec<PathBuf>, SweepError> {
        let mut subdirs = Vec::new();
        let mut has_marker = false;

        for entry_result in listing {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let at = e.path.as_deref().unwrap_or(dir);
                    self.logger.warning_with(
                        format!("Error accessing path {} (skipped)", at.display()),
                        &[("error", e.source.to_string())],
                    );
                    continue;
                }
            };
            self.counters.visit();

            match entry.kind {
                EntryKind::Dir => subdirs.push(entry.path),
                EntryKind::File if is_marker(&entry.name) => has_marker = true,
                _ => {}
            }
        }

        if has_marker {
            self.sender.send(dir.to_path_buf()).map_err(|_| SweepError::WorkerPool {
                reason: "size workers stopped before the walk finished".to_string(),
            })?;
            return Ok(Vec::new());
        }

        // Popped from the back, so reverse to walk siblings in listing order
        subdirs.reverse();
        Ok(subdirs)
    }
}
