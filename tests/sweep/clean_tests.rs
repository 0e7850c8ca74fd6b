// Tests for the clean module

use crate::common::{memory_logger, write_file};
use mvn_sweep::sweep::log::Level;
use mvn_sweep::sweep::{
    Candidate, CleanOutcome, Cleaner, DirRemover, FsRemover, ProgressMode, Removal, SweepError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn make_candidates(root: &Path, sizes: &[usize]) -> Vec<Candidate> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            let dir = root.join(format!("artifact{}", i));
            write_file(&dir.join("x.jar.lastUpdated"), size);
            Candidate::new(dir, size as u64)
        })
        .collect()
}

#[test]
fn test_clean_removes_all_entries() {
    let dir = TempDir::new().unwrap();
    let entries = make_candidates(dir.path(), &[10, 20, 30]);

    let (logger, _sink) = memory_logger();
    let outcome = Cleaner::new(logger)
        .with_progress(ProgressMode::Hidden)
        .clean(&entries);

    assert_eq!(outcome, CleanOutcome { deleted_count: 3, deleted_size: 60 });
    for entry in &entries {
        assert!(!entry.path.exists());
    }
}

#[test]
fn test_clean_empty_input() {
    let (logger, sink) = memory_logger();
    let outcome = Cleaner::new(logger)
        .with_progress(ProgressMode::Hidden)
        .clean(&[]);

    assert_eq!(outcome, CleanOutcome { deleted_count: 0, deleted_size: 0 });
    assert!(sink.records().is_empty());
}

#[test]
fn test_clean_twice_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let entries = make_candidates(dir.path(), &[5, 6]);

    let (logger, sink) = memory_logger();
    let cleaner = Cleaner::new(logger).with_progress(ProgressMode::Hidden);
    let first = cleaner.clean(&entries);
    let second = cleaner.clean(&entries);

    assert_eq!(first.deleted_count, 2);
    assert_eq!(second, CleanOutcome { deleted_count: 0, deleted_size: 0 });
    assert_eq!(sink.count(Level::Error), 0);
}

/// Remover that refuses one path and records every call
struct RefusingRemover {
    refuse: PathBuf,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl DirRemover for RefusingRemover {
    fn remove(&self, path: &Path) -> Result<Removal, SweepError> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        if path == self.refuse {
            return Err(SweepError::PermissionDenied {
                path: path.to_path_buf(),
                operation: "deleting".to_string(),
            });
        }
        FsRemover.remove(path)
    }
}

#[test]
fn test_clean_continues_after_a_failure() {
    let dir = TempDir::new().unwrap();
    let entries = make_candidates(dir.path(), &[100, 200, 300]);
    let calls = Arc::new(Mutex::new(Vec::new()));

    let (logger, sink) = memory_logger();
    let outcome = Cleaner::new(logger)
        .with_progress(ProgressMode::Hidden)
        .with_remover(Box::new(RefusingRemover {
            refuse: entries[0].path.clone(),
            calls: calls.clone(),
        }))
        .clean(&entries);

    assert_eq!(outcome, CleanOutcome { deleted_count: 2, deleted_size: 500 });
    assert!(entries[0].path.exists());
    assert!(!entries[1].path.exists());
    assert!(!entries[2].path.exists());
    assert_eq!(sink.count(Level::Error), 1);

    // Entries are attempted in the order given
    let expected: Vec<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
    assert_eq!(*calls.lock().unwrap(), expected);
}

#[test]
fn test_fs_remover_reports_missing_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert_eq!(FsRemover.remove(&missing).unwrap(), Removal::Missing);
}

#[test]
fn test_fs_remover_removes_nested_tree() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("a");
    write_file(&target.join("b/c/d.bin"), 10);
    write_file(&target.join("e.bin"), 10);

    assert_eq!(FsRemover.remove(&target).unwrap(), Removal::Removed);
    assert!(!target.exists());
    assert!(dir.path().exists());
}

#[cfg(unix)]
#[test]
fn test_fs_remover_removes_symlink_not_target() {
    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    write_file(&outside.path().join("keep.bin"), 4);
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(outside.path(), &link).unwrap();

    assert_eq!(FsRemover.remove(&link).unwrap(), Removal::Removed);
    assert!(fs::symlink_metadata(&link).is_err());
    assert!(outside.path().join("keep.bin").exists());
}

#[test]
fn test_fs_remover_fails_below_a_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.jar");
    write_file(&file, 3);

    let error = FsRemover.remove(&file.join("child")).unwrap_err();

    assert!(!error.is_not_found());
    assert!(file.exists());
}

#[test]
fn test_clean_with_fs_remover_logs_real_failure() {
    let dir = TempDir::new().unwrap();
    let mut entries = make_candidates(dir.path(), &[10, 20]);
    let file = dir.path().join("plain.jar");
    write_file(&file, 3);
    entries.insert(1, Candidate::new(file.join("child"), 99));

    let (logger, sink) = memory_logger();
    let outcome = Cleaner::new(logger)
        .with_progress(ProgressMode::Hidden)
        .clean(&entries);

    assert_eq!(outcome, CleanOutcome { deleted_count: 2, deleted_size: 30 });
    assert_eq!(sink.count(Level::Error), 1);
    assert!(file.exists());
}
