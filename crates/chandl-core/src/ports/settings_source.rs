//! Settings source port definition.

use crate::settings::ChannelDownloadSettings;

/// Source of the download settings.
///
/// Called once per run; the returned snapshot is used for the whole run even
/// if the underlying configuration changes meanwhile.
pub trait DownloadSettingsSource: Send + Sync {
    fn snapshot(&self) -> ChannelDownloadSettings;
}

/// Fixed settings, for hosts without live configuration and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub ChannelDownloadSettings);

impl DownloadSettingsSource for StaticSettings {
    fn snapshot(&self) -> ChannelDownloadSettings {
        self.0.clone()
    }
}
