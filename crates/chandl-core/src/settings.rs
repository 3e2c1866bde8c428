//! Channel download settings and validation.
//!
//! The orchestrator takes one snapshot of these settings at the start of a
//! run and never re-reads them mid-run.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ChannelId;

/// Bytes per configured gigabyte (decimal gigabytes).
pub const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Settings for the channel download task.
///
/// All fields are optional to support partial configuration files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelDownloadSettings {
    /// Channels whose content is downloaded.
    pub downloading_channels: BTreeSet<ChannelId>,

    /// Ceiling on the total size of the download directory, in GB.
    pub download_size_limit_gb: Option<f64>,

    /// Cached files older than this many days are deleted before a run.
    pub max_download_age_days: Option<u32>,
}

impl ChannelDownloadSettings {
    /// Whether downloads are enabled for `channel_id`.
    pub fn is_channel_enabled(&self, channel_id: &ChannelId) -> bool {
        self.downloading_channels.contains(channel_id)
    }

    /// Files last modified before this instant are expired.
    ///
    /// `None` when no max age is set, or when the age reaches back past the
    /// earliest representable date (nothing can be that old).
    #[must_use]
    pub fn age_cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = self.max_download_age_days?;
        TimeDelta::try_days(i64::from(days)).and_then(|age| now.checked_sub_signed(age))
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Download size limit must be a positive number of GB, got {0}")]
    InvalidSizeLimit(f64),

    #[error("Max download age must be at least one day")]
    ZeroMaxAge,
}

/// Validate settings values.
pub fn validate_settings(settings: &ChannelDownloadSettings) -> Result<(), SettingsError> {
    if let Some(limit) = settings.download_size_limit_gb {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(SettingsError::InvalidSizeLimit(limit));
        }
    }

    if settings.max_download_age_days == Some(0) {
        return Err(SettingsError::ZeroMaxAge);
    }

    Ok(())
}
