//! Error types for channel downloads.
//!
//! Two layers:
//!
//! - [`ChannelDownloadError`] is what collaborators (channel manager, library,
//!   user store) return. The per-item handler classifies it with
//!   [`ChannelDownloadError::failure_kind`] instead of inspecting messages.
//! - [`TaskError`] is what a whole run returns.

use thiserror::Error;

use crate::settings::SettingsError;

/// Closed classification of a per-item failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operator asked to stop. Ends the pass and the run.
    Cancelled,
    /// Fetch failure that the channel layer has already logged.
    AlreadyLogged,
    /// Anything else. Logged with item context, the loop continues.
    Unexpected,
}

/// Error returned by collaborator ports.
#[derive(Debug, Error)]
pub enum ChannelDownloadError {
    /// The operation observed the cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// The channel failed to fetch an item. The channel layer logs these
    /// itself.
    #[error("Channel download failed for {item}: {message}")]
    ChannelFetch {
        /// Item the fetch was for.
        item: String,
        /// Detailed error message.
        message: String,
    },

    /// I/O error during file operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "NotFound", "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Library or user store failure.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Uncategorized failure from an adapter.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChannelDownloadError {
    /// Create a channel fetch error.
    pub fn channel_fetch(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChannelFetch {
            item: item.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }

    /// Create a repository error.
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository(message.into())
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Classify for per-item failure handling.
    #[must_use]
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Cancelled => FailureKind::Cancelled,
            Self::ChannelFetch { .. } => FailureKind::AlreadyLogged,
            Self::Io { .. } | Self::Repository(_) | Self::Other(_) => FailureKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for ChannelDownloadError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io_error(&err)
    }
}

/// Error returned by a run of the download task.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The run was cancelled. Items processed before cancellation stay.
    #[error("Task cancelled")]
    Cancelled,

    /// The configuration snapshot failed validation.
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// A run-level collaborator call (user or catalog enumeration) failed.
    #[error(transparent)]
    Collaborator(ChannelDownloadError),
}

impl TaskError {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<ChannelDownloadError> for TaskError {
    fn from(err: ChannelDownloadError) -> Self {
        match err {
            ChannelDownloadError::Cancelled => Self::Cancelled,
            other => Self::Collaborator(other),
        }
    }
}

/// Convenience result type for collaborator calls.
pub type ChannelDownloadResult<T> = Result<T, ChannelDownloadError>;
