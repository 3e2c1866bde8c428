//! Scheduled task surface exposed to the hosting scheduler.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::ProgressSink;
use crate::error::TaskError;

/// When the host should run a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskTrigger {
    /// Run repeatedly, `interval` after the previous run was triggered.
    Interval { interval: Duration },
}

impl TaskTrigger {
    #[must_use]
    pub const fn every(interval: Duration) -> Self {
        Self::Interval { interval }
    }
}

/// A task the host scheduler can list and run.
///
/// The host is responsible for never running two instances concurrently.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    /// Human-readable name for the scheduler's catalog.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Catalog grouping.
    fn category(&self) -> &str;

    /// Triggers to install when the user has not configured any.
    fn default_triggers(&self) -> Vec<TaskTrigger>;

    /// Run the task once.
    async fn execute(
        &self,
        cancel: &CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<(), TaskError>;
}
