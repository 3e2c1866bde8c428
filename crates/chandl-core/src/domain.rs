//! Domain types shared by the ports and the download engine.
//!
//! These are plain value types: identifiers, catalog entries returned by the
//! channel manager, media sources and library records. They carry no
//! behaviour beyond small classification helpers.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque, stable user identifier from the user store.
    UserId
);

string_id!(
    /// Identifier of a channel (content provider plugin).
    ChannelId
);

string_id!(
    /// Identifier of a single channel item.
    ItemId
);

string_id!(
    /// Identifier of a record in the media library.
    LibraryItemId
);

/// Declared media kind of a channel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Clip,
    Episode,
    Movie,
    Audio,
    #[default]
    Other,
}

/// A remote media entry belonging to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelItem {
    pub id: ItemId,
    pub channel_id: ChannelId,
    /// Display name, used in log output.
    pub name: String,
    pub media_kind: MediaKind,
}

impl ChannelItem {
    pub fn new(
        id: impl Into<ItemId>,
        channel_id: impl Into<ChannelId>,
        name: impl Into<String>,
        media_kind: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            name: name.into(),
            media_kind,
        }
    }
}

/// An entry returned by a catalog query.
///
/// Catalog queries can return entries that are not channel-sourced (folders,
/// library items surfaced alongside channel content). The variant is decided
/// once by the channel manager adapter so the pipeline never has to probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogItem {
    Channel(ChannelItem),
    Other { id: String, name: String },
}

impl CatalogItem {
    /// Display name for logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Channel(item) => &item.name,
            Self::Other { name, .. } => name,
        }
    }

    /// The channel item, if this entry is channel-sourced.
    pub const fn as_channel_item(&self) -> Option<&ChannelItem> {
        match self {
            Self::Channel(item) => Some(item),
            Self::Other { .. } => None,
        }
    }
}

impl From<ChannelItem> for CatalogItem {
    fn from(item: ChannelItem) -> Self {
        Self::Channel(item)
    }
}

/// Capabilities a channel reports about itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFeatures {
    /// Whether the channel can hand its content to the downloader.
    pub supports_content_downloading: bool,
}

/// How a media source is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaProtocol {
    /// A file on local disk (a cached download).
    File,
    Http,
    Rtmp,
    Rtsp,
    Udp,
    Other,
}

/// A concrete playable rendition of a channel item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub protocol: MediaProtocol,
    /// Filesystem path for `File` sources, URL or opaque locator otherwise.
    pub path: String,
}

impl MediaSource {
    pub fn new(protocol: MediaProtocol, path: impl Into<String>) -> Self {
        Self {
            protocol,
            path: path.into(),
        }
    }

    /// A source that is already cached on local disk.
    pub fn local_file(path: impl Into<String>) -> Self {
        Self::new(MediaProtocol::File, path)
    }

    pub fn is_local_file(&self) -> bool {
        self.protocol == MediaProtocol::File
    }
}

/// A record in the media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: LibraryItemId,
    pub path: PathBuf,
    pub name: String,
}

impl LibraryItem {
    pub fn new(
        id: impl Into<LibraryItemId>,
        path: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Options for a metadata refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Persist the item even if nothing changed. Set when the item is new to
    /// the library store.
    pub force_save: bool,
}

/// A file found while walking a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Size in bytes.
    pub len: u64,
    /// Last-modified time.
    pub modified: DateTime<Utc>,
}
