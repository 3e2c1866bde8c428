//! Per-item outcomes and run totals.

use std::path::PathBuf;

use serde::Serialize;

/// What happened to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Not channel-sourced, channel cannot download, or channel not enabled.
    Ineligible,
    /// Already cached; the cached files were reconciled, nothing fetched.
    Refreshed { cached: usize },
    /// Download directory is full; left for a future run.
    SizeLimitReached,
    /// Fetched and reconciled.
    Downloaded { destination: PathBuf },
}

/// Totals for one run, logged when the run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub users: usize,
    /// Catalog entries seen across both passes (duplicates counted twice).
    pub items_seen: usize,
    pub ineligible: usize,
    pub refreshed: usize,
    pub downloaded: usize,
    pub size_limited: usize,
    pub failed: usize,
    /// Cached files deleted by the age cleanup.
    pub files_expired: usize,
}

impl RunSummary {
    pub(crate) fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Ineligible => self.ineligible += 1,
            ItemOutcome::Refreshed { .. } => self.refreshed += 1,
            ItemOutcome::SizeLimitReached => self.size_limited += 1,
            ItemOutcome::Downloaded { .. } => self.downloaded += 1,
        }
    }
}
