//! Final `.deb` archive creation via `dpkg-deb`.

use crate::error::{PackagerError, Result};
use crate::executor::{CommandExecutor, stderr_message};
use camino::Utf8Path;
use log::info;

/// The archive-building tool.
pub const ARCHIVE_COMMAND: &str = "dpkg-deb";

/// Compression format passed to [`ARCHIVE_COMMAND`].
pub const COMPRESSION_FORMAT_FLAG: &str = "-Zgzip";

/// Compression level passed to [`ARCHIVE_COMMAND`].
pub const COMPRESSION_LEVEL_FLAG: &str = "-z9";

/// Build action passed to [`ARCHIVE_COMMAND`].
pub const BUILD_FLAG: &str = "--build";

/// Return the `dpkg-deb` argument list for packing `working` into
/// `destination`.
#[must_use]
pub fn archive_args<'a>(working: &'a Utf8Path, destination: &'a Utf8Path) -> [&'a str; 5] {
    [
        COMPRESSION_FORMAT_FLAG,
        COMPRESSION_LEVEL_FLAG,
        BUILD_FLAG,
        working.as_str(),
        destination.as_str(),
    ]
}

/// Pack the working tree into the destination archive.
///
/// # Errors
///
/// Returns [`PackagerError::ArchiveBuild`] if `dpkg-deb` exits unsuccessfully,
/// or [`PackagerError::Io`] if it cannot be spawned.
pub fn build_archive(
    executor: &dyn CommandExecutor,
    working: &Utf8Path,
    destination: &Utf8Path,
) -> Result<()> {
    let output = executor.run(ARCHIVE_COMMAND, &archive_args(working, destination))?;

    if !output.status.success() {
        return Err(PackagerError::ArchiveBuild {
            status: output.status,
            message: stderr_message(&output),
        });
    }

    info!(target: "archive", "built {destination}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, success_output};

    const WORKING: &str = "/tmp/out/working";
    const DEST: &str = "/tmp/out/Sample-1.2.0-linux-amd64.deb";

    fn expected(result: Result<std::process::Output>) -> StubExecutor {
        StubExecutor::new(vec![ExpectedCall::new(
            "dpkg-deb",
            ["-Zgzip", "-z9", "--build", WORKING, DEST],
            result,
        )])
    }

    #[test]
    fn args_are_in_fixed_order() {
        let args = archive_args(Utf8Path::new(WORKING), Utf8Path::new(DEST));
        assert_eq!(args, ["-Zgzip", "-z9", "--build", WORKING, DEST]);
    }

    #[test]
    fn successful_build_returns_ok() {
        let executor = expected(Ok(success_output()));
        build_archive(&executor, Utf8Path::new(WORKING), Utf8Path::new(DEST))
            .expect("build should succeed");
        executor.assert_finished();
    }

    #[test]
    fn non_zero_exit_is_archive_failure() {
        let executor = expected(Ok(failure_output("dpkg-deb: error: control file missing")));
        let err = build_archive(&executor, Utf8Path::new(WORKING), Utf8Path::new(DEST))
            .expect_err("must fail");
        assert!(matches!(err, PackagerError::ArchiveBuild { .. }));
        assert!(err.to_string().contains("control file missing"));
    }

    #[test]
    fn spawn_failure_propagates() {
        let executor = expected(Err(std::io::Error::other("dpkg-deb not found").into()));
        let err = build_archive(&executor, Utf8Path::new(WORKING), Utf8Path::new(DEST))
            .expect_err("must fail");
        assert!(matches!(err, PackagerError::Io(_)));
    }
}
