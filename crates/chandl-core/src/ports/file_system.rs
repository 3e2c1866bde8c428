//! Filesystem port definition.

use std::io;
use std::path::Path;

use crate::domain::FileEntry;

/// Port for the filesystem operations the engine needs.
///
/// Listing is lazy so callers can stop early (the size-limit scan does).
pub trait FileSystemPort: Send + Sync {
    /// Every file under `root`, recursively.
    ///
    /// A missing `root` yields nothing. Entries that cannot be read are
    /// skipped by the implementation.
    fn walk_files<'a>(
        &'a self,
        root: &'a Path,
    ) -> Box<dyn Iterator<Item = FileEntry> + Send + 'a>;

    /// Delete a single file.
    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// Create the parent directories of `path` if missing.
    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()>;
}
