//! Per-item processing.

use std::sync::Arc;

use chandl_core::{
    CatalogItem, ChannelDownloadError, ChannelDownloadResult, ChannelDownloadSettings,
    ChannelItem, ProgressSink,
};
use tokio_util::sync::CancellationToken;

use super::{ChannelDownloader, ItemOutcome, RunContext, blocking_task_failed};
use crate::destination::DownloadDestination;
use crate::size_limit::is_limit_reached;

impl ChannelDownloader {
    /// Decide what one catalog entry needs and do it.
    ///
    /// A cached local source always wins over a new fetch. The size ceiling
    /// is re-checked for every candidate, so it reflects downloads made
    /// earlier in the same run.
    pub(super) async fn process_item(
        &self,
        entry: &CatalogItem,
        run: &RunContext<'_>,
        progress: &dyn ProgressSink,
    ) -> ChannelDownloadResult<ItemOutcome> {
        let Some(item) = entry.as_channel_item() else {
            return Ok(ItemOutcome::Ineligible);
        };

        if !self.is_eligible(item, &run.settings) {
            tracing::debug!(
                item = %item.name,
                channel = %item.channel_id,
                "Channel not enabled for downloading"
            );
            return Ok(ItemOutcome::Ineligible);
        }

        let sources = self.resolver.resolve(item, run.cancel).await?;
        if sources.is_cached() {
            for path in &sources.cached {
                self.reconciler.reconcile(path, run.cancel).await?;
            }
            return Ok(ItemOutcome::Refreshed {
                cached: sources.cached.len(),
            });
        }

        if let Some(limit_gb) = run.settings.download_size_limit_gb {
            if self.size_limit_reached(run, limit_gb).await? {
                tracing::debug!(
                    item = %item.name,
                    limit_gb,
                    "Skipping download, size limit reached"
                );
                return Ok(ItemOutcome::SizeLimitReached);
            }
        }

        let destination = DownloadDestination::plan(&run.download_root, item);
        self.file_system.ensure_parent_dir(destination.path())?;

        self.fetch(item, &destination, progress, run.cancel).await?;
        tracing::info!(
            item = %item.name,
            channel = %item.channel_id,
            destination = %destination.path().display(),
            "Downloaded channel item"
        );

        self.reconciler
            .reconcile(destination.path(), run.cancel)
            .await?;

        Ok(ItemOutcome::Downloaded {
            destination: destination.into_path(),
        })
    }

    /// The channel must support downloading and be enabled in settings.
    fn is_eligible(&self, item: &ChannelItem, settings: &ChannelDownloadSettings) -> bool {
        self.channels
            .channel_features(&item.channel_id)
            .supports_content_downloading
            && settings.is_channel_enabled(&item.channel_id)
    }

    /// Size scan of the download root, on the blocking pool.
    async fn size_limit_reached(
        &self,
        run: &RunContext<'_>,
        limit_gb: f64,
    ) -> ChannelDownloadResult<bool> {
        let file_system = Arc::clone(&self.file_system);
        let root = run.download_root.clone();

        tokio::task::spawn_blocking(move || {
            is_limit_reached(file_system.as_ref(), &root, limit_gb)
        })
        .await
        .map_err(blocking_task_failed)
    }

    /// Fetch with cancellation support.
    async fn fetch(
        &self,
        item: &ChannelItem,
        destination: &DownloadDestination,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<()> {
        tokio::select! {
            biased;

            () = cancel.cancelled() => Err(ChannelDownloadError::Cancelled),

            result = self.channels.download_item(item, destination.path(), progress, cancel) => {
                result
            }
        }
    }
}
