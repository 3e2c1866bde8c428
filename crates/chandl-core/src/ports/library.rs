//! Media library port definition.
//!
//! The library owns path resolution (deciding what kind of item a file is)
//! and the metadata store. Downloaded files become visible to the rest of the
//! media system only after they are refreshed through this port.

use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{LibraryItem, LibraryItemId, RefreshOptions};
use crate::error::ChannelDownloadResult;

/// Port for the host's media library.
#[async_trait]
pub trait LibraryPort: Send + Sync {
    /// Resolve a file into a library item.
    ///
    /// Returns `None` for unsupported or ignored files.
    async fn resolve_path(&self, path: &Path) -> ChannelDownloadResult<Option<LibraryItem>>;

    /// Look up a stored item by identity.
    async fn find_by_id(&self, id: &LibraryItemId) -> ChannelDownloadResult<Option<LibraryItem>>;

    /// Refresh an item's metadata, persisting it when `options.force_save`.
    async fn refresh_metadata(
        &self,
        item: &LibraryItem,
        options: RefreshOptions,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<()>;
}
