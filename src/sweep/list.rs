// Directory listing
// The walker reads every directory through this seam, one level at a time

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a listed entry, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub path: PathBuf,
    pub name: OsString,
    pub kind: EntryKind,
}

/// A failure on a single entry; the rest of the listing is still usable
#[derive(Debug)]
pub struct EntryError {
    pub path: Option<PathBuf>,
    pub source: io::Error,
}

pub type Listing = Vec<Result<ListedEntry, EntryError>>;

/// Filesystem seam used by the scanner to read one directory
pub trait DirLister: Send + Sync {
    /// List the direct children of `dir`. An `Err` means the directory itself could not be read.
    fn list(&self, dir: &Path) -> io::Result<Listing>;
}

/// Lists directories on the real filesystem, sorted by name
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Listing> {
        let mut listing = Vec::new();

        for entry_result in fs::read_dir(dir)? {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(source) => {
                    listing.push(Err(EntryError { path: None, source }));
                    continue;
                }
            };

            let path = entry.path();
            // file_type does not follow symlinks
            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Dir,
                Ok(t) if t.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(source) => {
                    listing.push(Err(EntryError {
                        path: Some(path),
                        source,
                    }));
                    continue;
                }
            };

            listing.push(Ok(ListedEntry {
                path,
                name: entry.file_name(),
                kind,
            }));
        }

        // Deterministic walk order
        listing.sort_by(|a, b| match (a, b) {
            (Ok(a), Ok(b)) => a.name.cmp(&b.name),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });
        Ok(listing)
    }
}
