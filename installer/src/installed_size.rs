//! `Installed-Size` accounting.
//!
//! The distribution tree, not the staging tree, is the authoritative source
//! for size accounting.

use crate::error::Result;
use crate::tree::regular_file_sizes;
use camino::Utf8Path;
use log::debug;

/// Bytes per kibibyte.
const KIB: u64 = 1024;

/// Sum the sizes of all regular files under `distribution_root` and convert
/// the total to kibibytes.
///
/// Rounding is half-up: a remainder of 512 bytes or more rounds to the next
/// kibibyte. An empty tree yields `0`.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::Traversal`] if the tree cannot be
/// walked.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use distpack_installer::installed_size::installed_size_kib;
///
/// let kib = installed_size_kib(Utf8Path::new("dist/tree"))?;
/// println!("Installed-Size: {kib}");
/// # Ok::<(), distpack_installer::error::PackagerError>(())
/// ```
pub fn installed_size_kib(distribution_root: &Utf8Path) -> Result<u64> {
    let total = regular_file_sizes(distribution_root)
        .try_fold(0_u64, |sum, size| size.map(|bytes| sum.saturating_add(bytes)))?;
    let kib = bytes_to_kib(total);
    debug!(target: "installed_size", "{distribution_root}: {total} bytes, {kib} KiB");
    Ok(kib)
}

/// Convert a byte count to kibibytes, rounding half-up.
#[must_use]
pub const fn bytes_to_kib(bytes: u64) -> u64 {
    bytes.saturating_add(KIB / 2) / KIB
}
