//! Progress aggregation.
//!
//! A run reports one 0–100 percentage to the host. Nested work (users,
//! catalog passes, items, fetches) reports into [`ProgressScope`]s that
//! rescale their child's 0–100 into a slice of the parent's range.
//! [`MonotonicProgress`] sits in front of the host's sink so the value it
//! sees never goes backwards.

mod monotonic;
mod scope;

pub use monotonic::MonotonicProgress;
pub use scope::ProgressScope;
