//! Media source resolution.
//!
//! Asks the channel manager which renditions of an item it knows about and
//! splits them into cached local files and remote-only sources.

use std::path::PathBuf;
use std::sync::Arc;

use chandl_core::{ChannelDownloadResult, ChannelItem, ChannelManagerPort, MediaSource};
use tokio_util::sync::CancellationToken;

/// Media sources of one item, classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceResolution {
    /// Paths of sources already downloaded to local disk.
    pub cached: Vec<PathBuf>,
    /// Number of sources only reachable remotely.
    pub remote: usize,
}

impl SourceResolution {
    /// Classify a list of sources.
    pub fn classify(sources: Vec<MediaSource>) -> Self {
        let mut resolution = Self::default();
        for source in sources {
            if source.is_local_file() {
                resolution.cached.push(PathBuf::from(source.path));
            } else {
                resolution.remote += 1;
            }
        }
        resolution
    }

    /// Whether the item is already downloaded.
    pub fn is_cached(&self) -> bool {
        !self.cached.is_empty()
    }
}

/// Resolves channel items to their known media sources.
#[derive(Clone)]
pub struct MediaSourceResolver {
    channels: Arc<dyn ChannelManagerPort>,
}

impl MediaSourceResolver {
    pub fn new(channels: Arc<dyn ChannelManagerPort>) -> Self {
        Self { channels }
    }

    pub async fn resolve(
        &self,
        item: &ChannelItem,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<SourceResolution> {
        let sources = self.channels.media_sources(item, cancel).await?;
        Ok(SourceResolution::classify(sources))
    }
}
