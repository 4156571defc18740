//! Directory tree primitives shared by staging, size accounting and script
//! installation.

use crate::error::{PackagerError, Result};
use camino::Utf8Path;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `src` into `dst`, overwriting files that already exist.
///
/// `dst` is created if missing. Symbolic links are recreated rather than
/// followed on Unix; elsewhere the link target is copied.
///
/// # Errors
///
/// Returns [`PackagerError::StagingFailed`] naming the source and destination
/// if `src` is missing or any entry cannot be copied.
pub fn copy_tree(src: &Utf8Path, dst: &Utf8Path) -> Result<()> {
    if !src.is_dir() {
        return Err(PackagerError::StagingFailed {
            reason: format!("source directory {src} does not exist"),
        });
    }

    let fail = |reason: String| PackagerError::StagingFailed {
        reason: format!("failed to copy {src} to {dst}: {reason}"),
    };

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| fail(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src.as_std_path())
            .map_err(|e| fail(e.to_string()))?;
        let target = dst.as_std_path().join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| fail(format!("{}: {e}", target.display())))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)
                .map_err(|e| fail(format!("{}: {e}", entry.path().display())))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| fail(format!("{}: {e}", entry.path().display())))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    let link_target = fs::read_link(src)?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)?;
    }
    std::os::unix::fs::symlink(link_target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::copy(src, dst).map(|_| ())
}

/// Lazily yield the byte size of every regular file under `root`.
///
/// Directories and symbolic links are skipped; links are never followed.
/// Errors from the walker or from reading metadata are yielded in place so
/// the caller decides whether to stop.
pub fn regular_file_sizes(root: &Utf8Path) -> impl Iterator<Item = Result<u64>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(
                entry
                    .metadata()
                    .map(|metadata| metadata.len())
                    .map_err(|e| traversal_error(root, &e)),
            ),
            Ok(_) => None,
            Err(e) => Some(Err(traversal_error(root, &e))),
        })
}

fn traversal_error(root: &Utf8Path, error: &walkdir::Error) -> PackagerError {
    PackagerError::Traversal {
        path: root.to_owned(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir path not UTF-8")
    }

    #[test]
    fn copy_tree_copies_nested_files() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        let src = root.join("src");
        fs::create_dir_all(src.join("nested/deeper")).expect("mkdir");
        fs::write(src.join("top.txt"), b"top").expect("write");
        fs::write(src.join("nested/deeper/leaf.txt"), b"leaf").expect("write");

        let dst = root.join("dst");
        copy_tree(&src, &dst).expect("copy should succeed");

        assert_eq!(fs::read(dst.join("top.txt")).expect("read"), b"top");
        assert_eq!(
            fs::read(dst.join("nested/deeper/leaf.txt")).expect("read"),
            b"leaf"
        );
    }

    #[test]
    fn copy_tree_overwrites_existing_files() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        let src = root.join("src");
        let dst = root.join("dst");
        fs::create_dir_all(&src).expect("mkdir");
        fs::create_dir_all(&dst).expect("mkdir");
        fs::write(src.join("file"), b"new").expect("write");
        fs::write(dst.join("file"), b"old contents").expect("write");

        copy_tree(&src, &dst).expect("copy should succeed");

        assert_eq!(fs::read(dst.join("file")).expect("read"), b"new");
    }

    #[test]
    fn copy_tree_rejects_missing_source() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        let err = copy_tree(&root.join("absent"), &root.join("dst")).expect_err("must fail");
        assert!(matches!(err, PackagerError::StagingFailed { .. }));
        assert!(err.to_string().contains("absent"));
    }

    #[cfg(unix)]
    #[test]
    fn copy_tree_preserves_symlinks() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        let src = root.join("src");
        fs::create_dir_all(&src).expect("mkdir");
        fs::write(src.join("real"), b"data").expect("write");
        std::os::unix::fs::symlink("real", src.join("alias")).expect("symlink");

        let dst = root.join("dst");
        copy_tree(&src, &dst).expect("copy should succeed");

        let link = fs::read_link(dst.join("alias")).expect("alias should be a link");
        assert_eq!(link, Path::new("real"));
    }

    #[test]
    fn regular_file_sizes_visits_every_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        fs::create_dir_all(root.join("a/b")).expect("mkdir");
        fs::write(root.join("one"), vec![0_u8; 10]).expect("write");
        fs::write(root.join("a/two"), vec![0_u8; 20]).expect("write");
        fs::write(root.join("a/b/three"), vec![0_u8; 30]).expect("write");

        let mut sizes: Vec<u64> = regular_file_sizes(&root)
            .collect::<Result<_>>()
            .expect("walk should succeed");
        sizes.sort_unstable();
        assert_eq!(sizes, vec![10, 20, 30]);
    }

    #[cfg(unix)]
    #[test]
    fn regular_file_sizes_skips_symlinks() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp);
        fs::write(root.join("real"), vec![0_u8; 100]).expect("write");
        std::os::unix::fs::symlink("real", root.join("alias")).expect("symlink");

        let total: u64 = regular_file_sizes(&root)
            .collect::<Result<Vec<_>>>()
            .expect("walk should succeed")
            .into_iter()
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn regular_file_sizes_reports_missing_root() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8(&temp).join("absent");
        let first = regular_file_sizes(&root).next();
        assert!(matches!(first, Some(Err(PackagerError::Traversal { .. }))));
    }
}
