//! In-memory fakes for the chandl ports.
//!
//! Every fake records the calls it receives behind a `Mutex` so tests can
//! assert on them after a run.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use async_trait::async_trait;
use chandl_core::{
    CatalogItem, ChannelDownloadError, ChannelDownloadResult, ChannelDownloadSettings,
    ChannelFeatures, ChannelId, ChannelItem, ChannelManagerPort, FileEntry, FileSystemPort,
    ItemId, LibraryItem, LibraryItemId, LibraryPort, MediaKind, MediaSource, ProgressSink,
    RefreshOptions, StaticSettings, UserId, UserStorePort,
};
use chandl_download::{ChannelDownloader, ChannelDownloaderDeps, build_channel_downloader};
use chrono::{Duration, Utc};
use tokio_util::sync::CancellationToken;

pub const ROOT: &str = "/cache/channels";

/// Route test logs through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn clip(id: &str, channel: &str) -> CatalogItem {
    ChannelItem::new(id, channel, format!("Clip {id}"), MediaKind::Clip).into()
}

pub fn enabled(channels: &[&str]) -> ChannelDownloadSettings {
    ChannelDownloadSettings {
        downloading_channels: channels.iter().map(|c| ChannelId::new(*c)).collect(),
        ..Default::default()
    }
}

// =============================================================================
// Progress
// =============================================================================

#[derive(Default)]
pub struct RecordingProgress {
    values: Mutex<Vec<f64>>,
}

impl RecordingProgress {
    pub fn values(&self) -> Vec<f64> {
        self.values.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.lock().unwrap().last().copied()
    }

    pub fn assert_non_decreasing(&self) {
        let values = self.values();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "progress went backwards: {values:?}");
        }
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, percent: f64) {
        self.values.lock().unwrap().push(percent);
    }
}

// =============================================================================
// Filesystem
// =============================================================================

/// Filesystem holding file entries in memory.
///
/// Records the thread each directory walk ran on.
#[derive(Default)]
pub struct MemoryFs {
    files: Mutex<Vec<FileEntry>>,
    walk_threads: Mutex<Vec<ThreadId>>,
}

impl MemoryFs {
    pub fn add(&self, path: impl Into<PathBuf>, len: u64, age_days: i64) {
        self.files.lock().unwrap().push(FileEntry {
            path: path.into(),
            len,
            modified: Utc::now() - Duration::days(age_days),
        });
    }

    pub fn walk_threads(&self) -> Vec<ThreadId> {
        self.walk_threads.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.path.clone())
            .collect()
    }
}

impl FileSystemPort for MemoryFs {
    fn walk_files<'a>(
        &'a self,
        root: &'a Path,
    ) -> Box<dyn Iterator<Item = FileEntry> + Send + 'a> {
        self.walk_threads.lock().unwrap().push(thread::current().id());
        let files: Vec<FileEntry> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.path.starts_with(root))
            .cloned()
            .collect();
        Box::new(files.into_iter())
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.path != path);
        if files.len() == before {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        Ok(())
    }

    fn ensure_parent_dir(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Channel manager
// =============================================================================

/// How a fake fetch misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum FetchFailure {
    /// Channel-layer failure (already logged).
    Channel,
    /// Anything else.
    Unexpected,
    /// Cancels the run's token, as an operator would mid-download.
    CancelRun,
    /// Never completes.
    Hang,
}

pub struct FakeChannelManager {
    root: PathBuf,
    all_items: Vec<CatalogItem>,
    latest_items: Vec<CatalogItem>,
    no_download: HashSet<ChannelId>,
    sources: HashMap<ItemId, Vec<MediaSource>>,
    failures: HashMap<ItemId, FetchFailure>,
    /// Fetched files land here with this size.
    sink: Option<(Arc<MemoryFs>, u64)>,
    fetch_progress: Vec<f64>,
    pub fetches: Mutex<Vec<(ItemId, PathBuf)>>,
    pub source_lookups: Mutex<Vec<ItemId>>,
}

impl FakeChannelManager {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(ROOT),
            all_items: Vec::new(),
            latest_items: Vec::new(),
            no_download: HashSet::new(),
            sources: HashMap::new(),
            failures: HashMap::new(),
            sink: None,
            fetch_progress: Vec::new(),
            fetches: Mutex::new(Vec::new()),
            source_lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn with_all(mut self, items: Vec<CatalogItem>) -> Self {
        self.all_items = items;
        self
    }

    pub fn with_latest(mut self, items: Vec<CatalogItem>) -> Self {
        self.latest_items = items;
        self
    }

    pub fn without_download_support(mut self, channel: &str) -> Self {
        self.no_download.insert(ChannelId::new(channel));
        self
    }

    pub fn with_sources(mut self, item: &str, sources: Vec<MediaSource>) -> Self {
        self.sources.insert(ItemId::new(item), sources);
        self
    }

    pub fn failing(mut self, item: &str, failure: FetchFailure) -> Self {
        self.failures.insert(ItemId::new(item), failure);
        self
    }

    pub fn writing_into(mut self, fs: Arc<MemoryFs>, bytes_per_item: u64) -> Self {
        self.sink = Some((fs, bytes_per_item));
        self
    }

    pub fn reporting_fetch_progress(mut self, values: Vec<f64>) -> Self {
        self.fetch_progress = values;
        self
    }

    pub fn fetched(&self) -> Vec<(ItemId, PathBuf)> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn fetched_ids(&self) -> Vec<String> {
        self.fetched()
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

#[async_trait]
impl ChannelManagerPort for FakeChannelManager {
    async fn list_all_items(
        &self,
        _user: &UserId,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<CatalogItem>> {
        if cancel.is_cancelled() {
            return Err(ChannelDownloadError::Cancelled);
        }
        Ok(self.all_items.clone())
    }

    async fn list_latest_items(
        &self,
        _user: &UserId,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<CatalogItem>> {
        if cancel.is_cancelled() {
            return Err(ChannelDownloadError::Cancelled);
        }
        Ok(self.latest_items.clone())
    }

    fn channel_features(&self, channel_id: &ChannelId) -> ChannelFeatures {
        ChannelFeatures {
            supports_content_downloading: !self.no_download.contains(channel_id),
        }
    }

    async fn media_sources(
        &self,
        item: &ChannelItem,
        _cancel: &CancellationToken,
    ) -> ChannelDownloadResult<Vec<MediaSource>> {
        self.source_lookups.lock().unwrap().push(item.id.clone());
        Ok(self.sources.get(&item.id).cloned().unwrap_or_default())
    }

    async fn download_item(
        &self,
        item: &ChannelItem,
        destination: &Path,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<()> {
        self.fetches
            .lock()
            .unwrap()
            .push((item.id.clone(), destination.to_path_buf()));

        match self.failures.get(&item.id) {
            Some(FetchFailure::Channel) => {
                return Err(ChannelDownloadError::channel_fetch(&item.name, "HTTP 503"));
            }
            Some(FetchFailure::Unexpected) => {
                return Err(anyhow::anyhow!("provider returned garbage").into());
            }
            Some(FetchFailure::CancelRun) => {
                cancel.cancel();
                return Err(ChannelDownloadError::Cancelled);
            }
            Some(FetchFailure::Hang) => std::future::pending::<()>().await,
            None => {}
        }

        for value in &self.fetch_progress {
            progress.report(*value);
        }

        if let Some((fs, len)) = &self.sink {
            fs.add(destination, *len, 0);
        }
        Ok(())
    }

    fn download_root(&self) -> PathBuf {
        self.root.clone()
    }
}

// =============================================================================
// Users
// =============================================================================

pub struct FakeUserStore {
    users: Option<Vec<UserId>>,
}

impl FakeUserStore {
    pub fn with_users(ids: &[&str]) -> Self {
        Self {
            users: Some(ids.iter().map(|id| UserId::new(*id)).collect()),
        }
    }

    pub fn broken() -> Self {
        Self { users: None }
    }
}

#[async_trait]
impl UserStorePort for FakeUserStore {
    async fn list_users(&self) -> ChannelDownloadResult<Vec<UserId>> {
        self.users
            .clone()
            .ok_or_else(|| ChannelDownloadError::repository("user database unavailable"))
    }
}

// =============================================================================
// Library
// =============================================================================

/// Resolves every path except `*.nfo` files. Items whose id was added with
/// [`FakeLibrary::store`] already exist in the store.
#[derive(Default)]
pub struct FakeLibrary {
    stored: Mutex<HashSet<LibraryItemId>>,
    pub resolved: Mutex<Vec<PathBuf>>,
    pub refreshes: Mutex<Vec<(LibraryItem, RefreshOptions)>>,
}

impl FakeLibrary {
    pub fn library_id(path: &Path) -> LibraryItemId {
        LibraryItemId::new(path.to_string_lossy())
    }

    pub fn store(&self, path: &Path) {
        self.stored.lock().unwrap().insert(Self::library_id(path));
    }

    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        self.resolved.lock().unwrap().clone()
    }

    pub fn refreshed(&self) -> Vec<(LibraryItem, RefreshOptions)> {
        self.refreshes.lock().unwrap().clone()
    }
}

#[async_trait]
impl LibraryPort for FakeLibrary {
    async fn resolve_path(&self, path: &Path) -> ChannelDownloadResult<Option<LibraryItem>> {
        self.resolved.lock().unwrap().push(path.to_path_buf());
        if path.extension().is_some_and(|ext| ext == "nfo") {
            return Ok(None);
        }
        Ok(Some(LibraryItem::new(
            Self::library_id(path),
            path,
            "resolved",
        )))
    }

    async fn find_by_id(&self, id: &LibraryItemId) -> ChannelDownloadResult<Option<LibraryItem>> {
        if !self.stored.lock().unwrap().contains(id) {
            return Ok(None);
        }
        Ok(Some(LibraryItem::new(id.clone(), id.as_str(), "stored")))
    }

    async fn refresh_metadata(
        &self,
        item: &LibraryItem,
        options: RefreshOptions,
        cancel: &CancellationToken,
    ) -> ChannelDownloadResult<()> {
        if cancel.is_cancelled() {
            return Err(ChannelDownloadError::Cancelled);
        }
        self.refreshes.lock().unwrap().push((item.clone(), options));
        Ok(())
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct Harness {
    pub channels: Arc<FakeChannelManager>,
    pub library: Arc<FakeLibrary>,
    pub fs: Arc<MemoryFs>,
    pub downloader: ChannelDownloader,
}

impl Harness {
    pub fn new(
        channels: FakeChannelManager,
        users: FakeUserStore,
        settings: ChannelDownloadSettings,
    ) -> Self {
        Self::with_fs(channels, users, settings, Arc::new(MemoryFs::default()))
    }

    pub fn with_fs(
        channels: FakeChannelManager,
        users: FakeUserStore,
        settings: ChannelDownloadSettings,
        fs: Arc<MemoryFs>,
    ) -> Self {
        init_tracing();

        let channels = Arc::new(channels);
        let library = Arc::new(FakeLibrary::default());
        let downloader = build_channel_downloader(ChannelDownloaderDeps {
            channels: channels.clone(),
            users: Arc::new(users),
            library: library.clone(),
            file_system: fs.clone(),
            settings: Arc::new(StaticSettings(settings)),
        });

        Self {
            channels,
            library,
            fs,
            downloader,
        }
    }
}
