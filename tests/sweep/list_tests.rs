// Tests for the list module

use crate::common::write_file;
use mvn_sweep::sweep::{DirLister, EntryKind, FsLister};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_listing_is_sorted_with_kinds() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("c.jar"), 1);
    fs::create_dir(dir.path().join("b")).unwrap();
    write_file(&dir.path().join("a.lastUpdated"), 1);

    let listing: Vec<_> = FsLister
        .list(dir.path())
        .unwrap()
        .into_iter()
        .map(|entry| entry.unwrap())
        .collect();

    let names: Vec<String> = listing
        .iter()
        .map(|e| e.name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.lastUpdated", "b", "c.jar"]);
    assert_eq!(listing[0].kind, EntryKind::File);
    assert_eq!(listing[1].kind, EntryKind::Dir);
    assert_eq!(listing[1].path, dir.path().join("b"));
}

#[cfg(unix)]
#[test]
fn test_symlink_is_other() {
    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

    let listing = FsLister.list(dir.path()).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].as_ref().unwrap().kind, EntryKind::Other);
}

#[test]
fn test_listing_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let error = FsLister.list(&dir.path().join("missing")).unwrap_err();
    assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
}
