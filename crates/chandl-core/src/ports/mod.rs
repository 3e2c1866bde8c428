//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the download engine expects from the host.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - Every call that can suspend for a meaningful time takes the run's
//!   `CancellationToken`
//! - Progress is fire-and-forget through [`ProgressSink`]
//! - No filesystem walking outside [`FileSystemPort`]

pub mod channel_manager;
pub mod file_system;
pub mod library;
pub mod progress;
pub mod scheduled_task;
pub mod settings_source;
pub mod user_store;

pub use channel_manager::ChannelManagerPort;
pub use file_system::FileSystemPort;
pub use library::LibraryPort;
pub use progress::{NoopProgress, ProgressSink};
pub use scheduled_task::{ScheduledTask, TaskTrigger};
pub use settings_source::{DownloadSettingsSource, StaticSettings};
pub use user_store::UserStorePort;
