//! Non-decreasing progress filter.
//!
//! Collaborators (a channel's fetch progress in particular) may report
//! values that jitter, and float rounding at scope boundaries can produce a
//! value a hair below the previous one. This filter forwards a report only
//! when it moves progress forward.

use std::sync::{Mutex, PoisonError};

use chandl_core::ProgressSink;

/// Forwards only reports greater than the last forwarded value.
///
/// Values are clamped to `0..=100` first.
pub struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressSink,
    last: Mutex<Option<f64>>,
}

impl<'a> MonotonicProgress<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }

    /// Last value forwarded to the inner sink.
    pub fn last(&self) -> Option<f64> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressSink for MonotonicProgress<'_> {
    fn report(&self, percent: f64) {
        if percent.is_nan() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);

        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.is_some_and(|prev| percent <= prev) {
            return;
        }
        *last = Some(percent);
        drop(last);

        self.inner.report(percent);
    }
}
