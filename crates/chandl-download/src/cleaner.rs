//! Cache age cleanup.
//!
//! Deletes downloaded files whose last-modified time is before a cutoff.
//! Runs before any downloads, so a cancellation here ends the run early.

use std::path::Path;

use chandl_core::{FileEntry, FileSystemPort, ProgressSink, TaskError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// What a cleanup pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Files older than the cutoff.
    pub candidates: usize,
    pub deleted: usize,
    /// Deletions that failed (locked files etc.). Logged, not fatal.
    pub failed: usize,
}

/// Delete every file under `path` last modified strictly before `cutoff`.
///
/// Progress is `index / candidates * 100` before each deletion and 100 at
/// the end, also when there is nothing to delete. The token is checked before
/// every deletion.
#[allow(clippy::cast_precision_loss)]
pub fn clean_expired_files(
    fs: &dyn FileSystemPort,
    path: &Path,
    cutoff: DateTime<Utc>,
    cancel: &CancellationToken,
    progress: &dyn ProgressSink,
) -> Result<CleanReport, TaskError> {
    let expired: Vec<FileEntry> = fs
        .walk_files(path)
        .filter(|file| file.modified < cutoff)
        .collect();

    let mut report = CleanReport {
        candidates: expired.len(),
        ..CleanReport::default()
    };

    for (index, file) in expired.iter().enumerate() {
        progress.report(index as f64 / expired.len() as f64 * 100.0);

        if cancel.is_cancelled() {
            return Err(TaskError::Cancelled);
        }

        match fs.delete_file(&file.path) {
            Ok(()) => report.deleted += 1,
            Err(err) => {
                tracing::error!(
                    path = %file.path.display(),
                    error = %err,
                    "Error deleting expired channel download"
                );
                report.failed += 1;
            }
        }
    }

    progress.report(100.0);

    if report.candidates > 0 {
        tracing::info!(
            path = %path.display(),
            cutoff = %cutoff,
            deleted = report.deleted,
            failed = report.failed,
            "Expired cached channel downloads"
        );
    }

    Ok(report)
}
