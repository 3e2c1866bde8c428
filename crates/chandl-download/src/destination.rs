//! Destination path planning for channel downloads.

use std::path::{Path, PathBuf};

use chandl_core::ChannelItem;

/// Where a channel item is downloaded to: `root/channel_id/item_id`.
///
/// Deterministic and unversioned; downloading the same item again reuses
/// the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDestination {
    path: PathBuf,
}

impl DownloadDestination {
    /// Plan the destination of `item` under `download_root`.
    pub fn plan(download_root: &Path, item: &ChannelItem) -> Self {
        let path = download_root
            .join(path_segment(item.channel_id.as_str()))
            .join(path_segment(item.id.as_str()));

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Turn an identifier into a single path component that stays inside the
/// parent directory.
fn path_segment(id: &str) -> String {
    let segment = id.replace(['/', '\\'], "_");
    match segment.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => segment,
    }
}
