//! Machine-readable Debian copyright file (DEP-5, format 1.0).

use crate::control::write_metadata_file;
use crate::error::Result;
use crate::identity::ProductName;
use crate::metadata::PackagingMetadata;
use camino::{Utf8Path, Utf8PathBuf};

/// Name of the copyright file inside the `DEBIAN` directory.
pub const COPYRIGHT_FILE_NAME: &str = "copyright";

/// URL of the copyright format specification.
pub const COPYRIGHT_FORMAT_URL: &str =
    "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

/// Render the copyright declaration.
///
/// # Examples
///
/// ```
/// use distpack_installer::copyright::render_copyright;
/// use distpack_installer::identity::ProductName;
/// use distpack_installer::metadata::PackagingMetadata;
///
/// let name = ProductName::try_from("Sample").expect("valid name");
/// let text = render_copyright(&name, &PackagingMetadata::default());
/// assert!(text.starts_with("Format: https://www.debian.org/"));
/// assert!(text.contains("\n\nFiles: *\n"));
/// ```
#[must_use]
pub fn render_copyright(product: &ProductName, metadata: &PackagingMetadata) -> String {
    format!(
        concat!(
            "Format: {format}\n",
            "Upstream-Name: {product}\n",
            "Source: {source}\n",
            "\n",
            "Files: *\n",
            "Copyright: {copyright}\n",
            "License: {license}\n",
        ),
        format = COPYRIGHT_FORMAT_URL,
        product = product,
        source = metadata.homepage,
        copyright = metadata.copyright,
        license = metadata.license,
    )
}

/// Write the copyright file into `debian_dir` and return its path.
///
/// # Errors
///
/// Returns [`crate::error::PackagerError::WriteFailed`] if the file cannot be
/// written.
pub fn write_copyright(
    debian_dir: &Utf8Path,
    product: &ProductName,
    metadata: &PackagingMetadata,
) -> Result<Utf8PathBuf> {
    let path = debian_dir.join(COPYRIGHT_FILE_NAME);
    write_metadata_file(&path, &render_copyright(product, metadata))?;
    Ok(path)
}
