//! Channel manager port definition.
//!
//! The channel manager fronts every channel plugin: it answers catalog
//! queries per user, reports channel capabilities, lists known media sources
//! for an item and knows how to fetch an item's bytes to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ProgressSink;
use crate::domain::{CatalogItem, ChannelFeatures, ChannelId, ChannelItem, MediaSource, UserId};
use crate::error::ChannelDownloadResult;

/// Port for the host's channel manager.
///
/// # Usage
///
/// ```ignore
/// let manager: Arc<dyn ChannelManagerPort> = /* ... */;
/// let items = manager.list_all_items(&user, &cancel).await?;
/// ```
#[async_trait]
pub trait ChannelManagerPort: Send + Sync {
    /// Every media item reachable by `user` across all channels.
    ///
    /// Returns the full result set; there is no paging.
    async fn list_all_items(
        &self,
        user: &UserId,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<CatalogItem>>;

    /// The latest media items reachable by `user`.
    ///
    /// May overlap with [`list_all_items`](Self::list_all_items).
    async fn list_latest_items(
        &self,
        user: &UserId,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<CatalogItem>>;

    /// Capabilities reported by a channel.
    fn channel_features(&self, channel_id: &ChannelId) -> ChannelFeatures;

    /// Known playable sources for an item, cached local files included.
    async fn media_sources(
        &self,
        item: &ChannelItem,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<MediaSource>>;

    /// Fetch an item's bytes to `destination`.
    ///
    /// Implementations log their own failures and return
    /// [`ChannelDownloadError::ChannelFetch`](crate::error::ChannelDownloadError::ChannelFetch)
    /// so the caller does not report them twice.
    async fn download_item(
        &self,
        item: &ChannelItem,
        destination: &Path,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<()>;

    /// Root directory for downloaded channel content.
    fn download_root(&self) -> PathBuf;
}
