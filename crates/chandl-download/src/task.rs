//! Scheduled task surface for the host scheduler.

use std::time::Duration;

use async_trait::async_trait;
use chandl_core::{ProgressSink, ScheduledTask, TaskError, TaskTrigger};
use tokio_util::sync::CancellationToken;

use crate::orchestrator::ChannelDownloader;

pub const TASK_NAME: &str = "Download channel content";
pub const TASK_DESCRIPTION: &str = "Downloads channel content based on configuration.";
pub const TASK_CATEGORY: &str = "Channels";

/// Default interval between runs.
pub const DEFAULT_RUN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[async_trait]
impl ScheduledTask for ChannelDownloader {
    fn name(&self) -> &str {
        TASK_NAME
    }

    fn description(&self) -> &str {
        TASK_DESCRIPTION
    }

    fn category(&self) -> &str {
        TASK_CATEGORY
    }

    fn default_triggers(&self) -> Vec<TaskTrigger> {
        vec![TaskTrigger::every(DEFAULT_RUN_INTERVAL)]
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        progress: &dyn ProgressSink,
    ) -> Result<(), TaskError> {
        self.run(cancel, progress).await.map(|_| ())
    }
}
