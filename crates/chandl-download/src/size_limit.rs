//! Download directory size ceiling.

use std::path::Path;

use chandl_core::{BYTES_PER_GB, FileSystemPort};

/// Whether the files under `path` already total `gigabyte_limit` or more.
///
/// Stops walking as soon as the running total crosses the limit. A missing
/// directory has nothing in it, so the limit is not reached.
#[allow(clippy::cast_precision_loss)]
pub fn is_limit_reached(fs: &dyn FileSystemPort, path: &Path, gigabyte_limit: f64) -> bool {
    let byte_limit = gigabyte_limit * BYTES_PER_GB;
    let mut total: u64 = 0;

    for file in fs.walk_files(path) {
        total = total.saturating_add(file.len);
        if total as f64 >= byte_limit {
            tracing::debug!(
                path = %path.display(),
                total_bytes = total,
                limit_gb = gigabyte_limit,
                "Download size limit reached"
            );
            return true;
        }
    }

    false
}
