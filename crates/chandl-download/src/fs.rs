//! Local filesystem adapter.
//!
//! Implements [`FileSystemPort`] on top of `std::fs` and `walkdir`.

use std::io;
use std::path::Path;

use chandl_core::{FileEntry, FileSystemPort};
use chrono::{DateTime, Utc};
use walkdir::WalkDir;

/// [`FileSystemPort`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystemPort for LocalFileSystem {
    fn walk_files<'a>(
        &'a self,
        root: &'a Path,
    ) -> Box<dyn Iterator<Item = FileEntry> + Send + 'a> {
        if !root.is_dir() {
            return Box::new(std::iter::empty());
        }

        let entries = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "Error walking download directory");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let metadata = match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        tracing::warn!(
                            path = %entry.path().display(),
                            error = %err,
                            "Cannot read file metadata"
                        );
                        return None;
                    }
                };
                let modified = match metadata.modified() {
                    Ok(modified) => DateTime::<Utc>::from(modified),
                    Err(err) => {
                        tracing::warn!(
                            path = %entry.path().display(),
                            error = %err,
                            "Cannot read modification time"
                        );
                        return None;
                    }
                };

                Some(FileEntry {
                    len: metadata.len(),
                    modified,
                    path: entry.into_path(),
                })
            });

        Box::new(entries)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}
