//! Maintainer script installation.
//!
//! Pre/post install hooks are kept under `<scripts>/linux/deb` and must end up
//! directly inside the package's `DEBIAN` directory.

use crate::error::{PackagerError, Result};
use crate::tree::copy_tree;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// Location of the Debian maintainer scripts below the scripts root.
pub const DEB_SCRIPTS_SUBDIR: &str = "linux/deb";

/// Script names `dpkg` executes and therefore requires to be executable.
pub const MAINTAINER_SCRIPTS: &[&str] = &["preinst", "postinst", "prerm", "postrm", "config"];

/// Return the maintainer script source directory for a scripts root.
#[must_use]
pub fn deb_scripts_dir(scripts_root: &Utf8Path) -> Utf8PathBuf {
    scripts_root.join(DEB_SCRIPTS_SUBDIR)
}

/// Copy `<scripts_root>/linux/deb` into `debian_dir`, overwriting existing
/// files, and mark known maintainer scripts executable.
///
/// Returns the names of the maintainer scripts that were installed.
///
/// # Errors
///
/// Returns [`PackagerError::ScriptsMissing`] if the source directory does not
/// exist, or a staging/I/O error if copying fails.
pub fn install_maintainer_scripts(
    scripts_root: &Utf8Path,
    debian_dir: &Utf8Path,
) -> Result<Vec<&'static str>> {
    let source = deb_scripts_dir(scripts_root);
    if !source.is_dir() {
        return Err(PackagerError::ScriptsMissing { path: source });
    }

    copy_tree(&source, debian_dir)?;

    let installed: Vec<&'static str> = MAINTAINER_SCRIPTS
        .iter()
        .copied()
        .filter(|name| debian_dir.join(name).is_file())
        .collect();
    for name in &installed {
        make_executable(&debian_dir.join(name))?;
    }

    debug!(target: "scripts", "installed maintainer scripts {installed:?} from {source}");
    Ok(installed)
}

#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf8");
        let scripts = root.join("scripts");
        let debian = root.join("working/DEBIAN");
        fs::create_dir_all(&debian).expect("mkdir");
        (temp, scripts, debian)
    }

    #[test]
    fn copies_scripts_into_debian_dir() {
        let (_temp, scripts, debian) = layout();
        let source = deb_scripts_dir(&scripts);
        fs::create_dir_all(&source).expect("mkdir");
        fs::write(source.join("postinst"), "#!/bin/sh\nexit 0\n").expect("write");
        fs::write(source.join("triggers"), "interest foo\n").expect("write");

        let installed = install_maintainer_scripts(&scripts, &debian).expect("install");

        assert_eq!(installed, vec!["postinst"]);
        assert!(debian.join("postinst").is_file());
        assert!(debian.join("triggers").is_file());
    }

    #[test]
    fn overwrites_existing_files() {
        let (_temp, scripts, debian) = layout();
        let source = deb_scripts_dir(&scripts);
        fs::create_dir_all(&source).expect("mkdir");
        fs::write(source.join("prerm"), "new").expect("write");
        fs::write(debian.join("prerm"), "old and longer").expect("write");

        install_maintainer_scripts(&scripts, &debian).expect("install");

        assert_eq!(fs::read_to_string(debian.join("prerm")).expect("read"), "new");
    }

    #[cfg(unix)]
    #[test]
    fn marks_maintainer_scripts_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, scripts, debian) = layout();
        let source = deb_scripts_dir(&scripts);
        fs::create_dir_all(&source).expect("mkdir");
        fs::write(source.join("preinst"), "#!/bin/sh\n").expect("write");
        fs::set_permissions(source.join("preinst"), fs::Permissions::from_mode(0o644))
            .expect("chmod");

        install_maintainer_scripts(&scripts, &debian).expect("install");

        let mode = fs::metadata(debian.join("preinst"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn missing_scripts_are_fatal() {
        let (_temp, scripts, debian) = layout();
        let err = install_maintainer_scripts(&scripts, &debian).expect_err("must fail");
        assert!(matches!(err, PackagerError::ScriptsMissing { .. }));
    }
}
