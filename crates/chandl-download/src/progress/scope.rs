//! Weighted progress scopes.

use chandl_core::ProgressSink;

/// A child scope mapping `0..=100` onto `[start, end]` of its parent.
///
/// Scopes borrow their parent and hold no state of their own, so they nest
/// freely:
///
/// ```
/// use chandl_core::ProgressSink;
/// use chandl_download::ProgressScope;
///
/// let sink = |p: f64| println!("{p}");
/// let user = ProgressScope::range(&sink, 50.0, 100.0);
/// let pass = ProgressScope::range(&user, 0.0, 80.0);
/// pass.report(50.0); // user at 40%, top level at 70%
/// ```
#[derive(Clone, Copy)]
pub struct ProgressScope<'a> {
    parent: &'a dyn ProgressSink,
    start: f64,
    end: f64,
}

impl<'a> ProgressScope<'a> {
    /// Scope covering `[from, to]` of `parent`'s range.
    pub fn range(parent: &'a dyn ProgressSink, from: f64, to: f64) -> Self {
        Self {
            parent,
            start: from,
            end: to,
        }
    }

    /// Parent value this scope reports for `percent`.
    ///
    /// 100 maps to exactly `end`, so a completed child never leaves its
    /// parent a rounding error short of (or past) the boundary.
    pub fn map(&self, percent: f64) -> f64 {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        if percent >= 100.0 {
            return self.end;
        }
        (self.end - self.start)
            .mul_add(percent / 100.0, self.start)
            .min(self.end)
    }
}

impl ProgressSink for ProgressScope<'_> {
    fn report(&self, percent: f64) {
        self.parent.report(self.map(percent));
    }
}

impl std::fmt::Debug for ProgressScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressScope")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
