#![doc = include_str!("../README.md")]

// Re-export core types for convenience
pub use chandl_core::{
    CatalogItem, ChannelDownloadError, ChannelDownloadSettings, ChannelItem, FailureKind,
    NoopProgress, ProgressSink, ScheduledTask, TaskError, TaskTrigger,
};

mod cleaner;
mod destination;
mod fs;
mod orchestrator;
mod progress;
mod reconciler;
mod resolver;
mod size_limit;
mod task;

pub use cleaner::{CleanReport, clean_expired_files};
pub use destination::DownloadDestination;
pub use fs::LocalFileSystem;
pub use orchestrator::{
    CatalogPass, ChannelDownloader, ChannelDownloaderDeps, ItemOutcome, RunSummary,
    build_channel_downloader,
};
pub use progress::{MonotonicProgress, ProgressScope};
pub use reconciler::{LibraryReconciler, ReconcileOutcome};
pub use resolver::{MediaSourceResolver, SourceResolution};
pub use size_limit::is_limit_reached;
pub use task::{
    DEFAULT_RUN_INTERVAL, TASK_CATEGORY, TASK_DESCRIPTION, TASK_NAME,
};
