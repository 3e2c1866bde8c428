//! Progress sink port.
//!
//! Progress values are percentages in `0.0..=100.0`. Reporting is
//! fire-and-forget: implementations must not block the caller.

/// Receiver of percentage progress reports.
pub trait ProgressSink: Send + Sync {
    /// Report progress as a percentage.
    fn report(&self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn report(&self, percent: f64) {
        self(percent);
    }
}

/// A sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _percent: f64) {}
}
