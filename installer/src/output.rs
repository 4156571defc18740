//! Output formatting for the packaging CLI.
//!
//! Progress and summaries go to stderr; only the final archive path is
//! printed to stdout so scripts can capture it.

use crate::config::BuildConfiguration;
use crate::pipeline::{PackageOutput, PackagePlan};
use std::io::Write;

/// Write a line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress output; ignore write failures.
    }
}

/// Format a success message after a build.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use distpack_installer::output::success_message;
///
/// let msg = success_message(&Utf8PathBuf::from("/tmp/out/Sample-1.2.0-linux-amd64.deb"), 200);
/// assert!(msg.contains("Sample-1.2.0-linux-amd64.deb"));
/// assert!(msg.contains("200 KiB"));
/// ```
#[must_use]
pub fn success_message(archive_path: &camino::Utf8Path, installed_size_kib: u64) -> String {
    format!("Built {archive_path} (installed size {installed_size_kib} KiB)")
}

/// Summarise a finished build.
#[must_use]
pub fn build_summary(output: &PackageOutput, cleaned: bool) -> String {
    let working = if cleaned {
        "removed".to_owned()
    } else {
        format!("kept at {}", output.working_dir)
    };
    [
        success_message(&output.archive_path, output.installed_size_kib),
        format!("Package: {}", output.identity),
        format!("Working directory: {working}"),
    ]
    .join("\n")
}

/// Dry-run information for display.
#[derive(Debug)]
pub struct DryRunInfo<'a> {
    /// The resolved configuration.
    pub config: &'a BuildConfiguration,
    /// The planned build.
    pub plan: &'a PackagePlan,
    /// Whether the working directory would be removed afterwards.
    pub clean: bool,
}

impl DryRunInfo<'_> {
    /// Format the dry-run information for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let dirs = &self.config.directories;
        [
            "Dry run - no files will be modified".to_owned(),
            String::new(),
            format!("Package: {}", self.plan.identity),
            format!("Archive: {}", self.plan.archive_path),
            format!("Working directory: {}", self.plan.working_dir),
            format!("Binaries: {} -> {}", dirs.binaries, self.plan.bin_dir),
            format!("Shared resources: {} -> {}", dirs.shared, self.plan.share_dir),
            format!("Distribution tree: {}", dirs.distribution),
            format!("Maintainer scripts: {}", crate::scripts::deb_scripts_dir(&dirs.scripts)),
            format!("Clean after build: {}", self.clean),
        ]
        .join("\n")
    }
}
