//! Channel download orchestrator.
//!
//! One run is a strictly sequential pipeline:
//!
//! 1. Take a settings snapshot and expire old cached files
//! 2. For every user, run the "all content" pass then the "latest content"
//!    pass
//! 3. For every catalog entry in a pass, skip / refresh the cached copy /
//!    check the size ceiling / fetch and reconcile
//!
//! # Progress
//!
//! Each user gets an equal share of the run. Within a user, the "all
//! content" pass covers 0-80% and the "latest content" pass 80-100%. A pass
//! reports 5% once its catalog query returns and spreads the items over the
//! rest. Every fetch reports into its own item's slice.
//!
//! # Failure isolation
//!
//! A failure while processing one item never stops the pass. Cancellation
//! does: it ends the pass and the run. Items processed before that stay
//! downloaded.

mod item;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use chandl_core::{
    CatalogItem, ChannelDownloadError, ChannelDownloadSettings, ChannelManagerPort,
    DownloadSettingsSource, FailureKind, FileSystemPort, LibraryPort, ProgressSink, TaskError,
    UserId, UserStorePort, validate_settings,
};
use chrono::Utc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::cleaner::clean_expired_files;
use crate::progress::{MonotonicProgress, ProgressScope};
use crate::reconciler::LibraryReconciler;
use crate::resolver::MediaSourceResolver;

pub use summary::{ItemOutcome, RunSummary};

/// Progress reported once a pass's catalog query has returned.
const QUERY_DONE_PERCENT: f64 = 5.0;

/// The two catalog queries run for every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPass {
    AllContent,
    LatestContent,
}

impl CatalogPass {
    /// Passes in execution order.
    pub const ALL: [Self; 2] = [Self::AllContent, Self::LatestContent];

    /// Slice of the user's progress range this pass covers.
    pub const fn progress_range(self) -> (f64, f64) {
        match self {
            Self::AllContent => (0.0, 80.0),
            Self::LatestContent => (80.0, 100.0),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllContent => "all",
            Self::LatestContent => "latest",
        }
    }
}

/// Dependencies for creating a channel downloader.
///
/// This struct bundles all the ports needed to construct a
/// `ChannelDownloader`.
pub struct ChannelDownloaderDeps {
    /// Channel catalogs, sources and fetch.
    pub channels: Arc<dyn ChannelManagerPort>,
    /// User enumeration.
    pub users: Arc<dyn UserStorePort>,
    /// Media library for reconciling downloads.
    pub library: Arc<dyn LibraryPort>,
    /// Filesystem for the size scan, cleanup and destination directories.
    pub file_system: Arc<dyn FileSystemPort>,
    /// Settings, read once per run.
    pub settings: Arc<dyn DownloadSettingsSource>,
}

/// Build a channel downloader from its dependencies.
pub fn build_channel_downloader(deps: ChannelDownloaderDeps) -> ChannelDownloader {
    ChannelDownloader::new(deps)
}

/// A blocking filesystem task panicked or was aborted.
fn blocking_task_failed(err: JoinError) -> ChannelDownloadError {
    ChannelDownloadError::Other(anyhow::Error::new(err).context("filesystem task failed"))
}

/// State shared by every step of one run.
struct RunContext<'a> {
    settings: ChannelDownloadSettings,
    download_root: PathBuf,
    cancel: &'a CancellationToken,
}

/// Downloads channel content for every user and keeps the cache bounded.
pub struct ChannelDownloader {
    channels: Arc<dyn ChannelManagerPort>,
    users: Arc<dyn UserStorePort>,
    file_system: Arc<dyn FileSystemPort>,
    settings: Arc<dyn DownloadSettingsSource>,
    resolver: MediaSourceResolver,
    reconciler: LibraryReconciler,
}

impl ChannelDownloader {
    pub fn new(deps: ChannelDownloaderDeps) -> Self {
        Self {
            resolver: MediaSourceResolver::new(Arc::clone(&deps.channels)),
            reconciler: LibraryReconciler::new(deps.library),
            channels: deps.channels,
            users: deps.users,
            file_system: deps.file_system,
            settings: deps.settings,
        }
    }

    /// Run once: expire old files, then download for every user.
    ///
    /// Returns the run totals. `progress` receives non-decreasing values
    /// ending at 100 unless the run fails.
    #[allow(clippy::cast_precision_loss)]
    pub async fn run(
        &self,
        cancel: &CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<RunSummary, TaskError> {
        let progress = MonotonicProgress::new(progress);

        let settings = self.settings.snapshot();
        validate_settings(&settings)?;

        let run = RunContext {
            settings,
            download_root: self.channels.download_root(),
            cancel,
        };
        let mut summary = RunSummary::default();

        tracing::info!(
            root = %run.download_root.display(),
            channels = run.settings.downloading_channels.len(),
            size_limit_gb = ?run.settings.download_size_limit_gb,
            max_age_days = ?run.settings.max_download_age_days,
            "Channel download run started"
        );

        summary.files_expired = self.expire_cache(&run).await?;

        let users = self.users.list_users().await?;
        summary.users = users.len();

        let count = users.len() as f64;
        for (index, user) in users.iter().enumerate() {
            let scope = ProgressScope::range(
                &progress,
                index as f64 * 100.0 / count,
                (index + 1) as f64 * 100.0 / count,
            );
            self.download_for_user(user, &run, &scope, &mut summary)
                .await?;
        }

        progress.report(100.0);

        tracing::info!(
            users = summary.users,
            items = summary.items_seen,
            downloaded = summary.downloaded,
            refreshed = summary.refreshed,
            ineligible = summary.ineligible,
            size_limited = summary.size_limited,
            failed = summary.failed,
            expired = summary.files_expired,
            "Channel download run finished"
        );

        Ok(summary)
    }

    /// Delete cached files older than the configured max age.
    ///
    /// The directory walk and deletions run on the blocking pool.
    async fn expire_cache(&self, run: &RunContext<'_>) -> Result<usize, TaskError> {
        let Some(cutoff) = run.settings.age_cutoff(Utc::now()) else {
            return Ok(0);
        };

        let file_system = Arc::clone(&self.file_system);
        let root = run.download_root.clone();
        let cancel = run.cancel.clone();

        let report = tokio::task::spawn_blocking(move || {
            let trace_progress =
                |percent: f64| tracing::trace!(percent, "Expiring cached channel downloads");
            clean_expired_files(file_system.as_ref(), &root, cutoff, &cancel, &trace_progress)
        })
        .await
        .map_err(blocking_task_failed)??;

        Ok(report.deleted)
    }

    async fn download_for_user(
        &self,
        user: &UserId,
        run: &RunContext<'_>,
        progress: &dyn ProgressSink,
        summary: &mut RunSummary,
    ) -> Result<(), TaskError> {
        for pass in CatalogPass::ALL {
            let (from, to) = pass.progress_range();
            let scope = ProgressScope::range(progress, from, to);
            self.run_pass(user, pass, run, &scope, summary).await?;
        }

        progress.report(100.0);
        Ok(())
    }

    async fn run_pass(
        &self,
        user: &UserId,
        pass: CatalogPass,
        run: &RunContext<'_>,
        progress: &dyn ProgressSink,
        summary: &mut RunSummary,
    ) -> Result<(), TaskError> {
        let items = match pass {
            CatalogPass::AllContent => self.channels.list_all_items(user, run.cancel).await?,
            CatalogPass::LatestContent => {
                self.channels.list_latest_items(user, run.cancel).await?
            }
        };

        tracing::debug!(
            user = %user,
            pass = pass.as_str(),
            items = items.len(),
            "Catalog query returned"
        );
        progress.report(QUERY_DONE_PERCENT);

        let scope = ProgressScope::range(progress, QUERY_DONE_PERCENT, 100.0);
        self.process_items(&items, pass, run, &scope, summary).await
    }

    #[allow(clippy::cast_precision_loss)]
    async fn process_items(
        &self,
        items: &[CatalogItem],
        pass: CatalogPass,
        run: &RunContext<'_>,
        progress: &dyn ProgressSink,
        summary: &mut RunSummary,
    ) -> Result<(), TaskError> {
        let total = items.len() as f64;

        for (index, item) in items.iter().enumerate() {
            if run.cancel.is_cancelled() {
                tracing::info!(
                    pass = pass.as_str(),
                    processed = index,
                    "Channel download pass cancelled"
                );
                return Err(TaskError::Cancelled);
            }

            summary.items_seen += 1;

            let item_progress = ProgressScope::range(
                progress,
                index as f64 * 100.0 / total,
                (index + 1) as f64 * 100.0 / total,
            );

            match self.process_item(item, run, &item_progress).await {
                Ok(outcome) => summary.record(&outcome),
                Err(err) => match err.failure_kind() {
                    FailureKind::Cancelled => {
                        tracing::info!(
                            pass = pass.as_str(),
                            processed = index,
                            "Channel download pass cancelled"
                        );
                        return Err(TaskError::Cancelled);
                    }
                    FailureKind::AlreadyLogged => {
                        tracing::debug!(item = %item.name(), error = %err, "Channel fetch failed");
                        summary.failed += 1;
                    }
                    FailureKind::Unexpected => {
                        tracing::error!(
                            item = %item.name(),
                            error = %err,
                            "Error downloading channel content"
                        );
                        summary.failed += 1;
                    }
                },
            }

            progress.report((index + 1) as f64 * 100.0 / total);
        }

        progress.report(100.0);
        Ok(())
    }
}
