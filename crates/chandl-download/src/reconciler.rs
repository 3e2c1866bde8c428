//! Library reconciliation.
//!
//! Makes a downloaded file visible to the media library: resolve the path to
//! a library item, prefer the stored record when the library already knows
//! it, and force a save when it does not.

use std::path::Path;
use std::sync::Arc;

use chandl_core::{ChannelDownloadResult, LibraryItemId, LibraryPort, RefreshOptions};
use tokio_util::sync::CancellationToken;

/// Result of reconciling one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The library does not handle this file. Nothing was done.
    Unresolved,
    /// Existing library record refreshed.
    Refreshed(LibraryItemId),
    /// New item registered with a forced save.
    Registered(LibraryItemId),
}

/// Registers and refreshes downloaded files in the media library.
#[derive(Clone)]
pub struct LibraryReconciler {
    library: Arc<dyn LibraryPort>,
}

impl LibraryReconciler {
    pub fn new(library: Arc<dyn LibraryPort>) -> Self {
        Self { library }
    }

    pub async fn reconcile(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<ReconcileOutcome> {
        let Some(resolved) = self.library.resolve_path(path).await? else {
            tracing::debug!(path = %path.display(), "Library ignores downloaded file");
            return Ok(ReconcileOutcome::Unresolved);
        };

        let (item, force_save) = match self.library.find_by_id(&resolved.id).await? {
            Some(stored) => (stored, false),
            None => (resolved, true),
        };

        self.library
            .refresh_metadata(&item, RefreshOptions { force_save }, cancel)
            .await?;

        tracing::debug!(
            path = %path.display(),
            id = %item.id,
            registered = force_save,
            "Refreshed channel download in library"
        );

        Ok(if force_save {
            ReconcileOutcome::Registered(item.id)
        } else {
            ReconcileOutcome::Refreshed(item.id)
        })
    }
}
