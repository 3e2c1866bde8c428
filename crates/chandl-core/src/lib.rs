#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CatalogItem, ChannelFeatures, ChannelId, ChannelItem, FileEntry, ItemId, LibraryItem,
    LibraryItemId, MediaKind, MediaProtocol, MediaSource, RefreshOptions, UserId,
};
pub use error::{ChannelDownloadError, ChannelDownloadResult, FailureKind, TaskError};
pub use ports::{
    ChannelManagerPort, DownloadSettingsSource, FileSystemPort, LibraryPort, NoopProgress,
    ProgressSink, ScheduledTask, StaticSettings, TaskTrigger, UserStorePort,
};
pub use settings::{BYTES_PER_GB, ChannelDownloadSettings, SettingsError, validate_settings};
