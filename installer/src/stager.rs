//! Working tree assembly.
//!
//! This module builds the Debian filesystem overlay under
//! `<output>/working`: `opt/<product>/bin`, `opt/<product>/share` and the
//! `DEBIAN` metadata directory.

use crate::error::{PackagerError, Result};
use crate::identity::ProductName;
use crate::tree::copy_tree;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// Name of the staging directory below the output directory.
pub const WORKING_DIR_NAME: &str = "working";

/// Name of the control metadata directory inside the working tree.
pub const DEBIAN_DIR_NAME: &str = "DEBIAN";

/// Handles staging of distribution files into the working tree.
#[derive(Debug, Clone)]
pub struct Stager {
    output_dir: Utf8PathBuf,
    install_name: String,
}

impl Stager {
    /// Create a stager for `product` rooted at `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Utf8Path, product: &ProductName) -> Self {
        Self {
            output_dir: output_dir.to_owned(),
            install_name: product.lowercase(),
        }
    }

    /// Create an empty working directory, removing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingFailed`] if the directory cannot be
    /// cleared or created.
    pub fn prepare(&self) -> Result<()> {
        let working = self.working_path();

        if working.symlink_metadata().is_ok() {
            debug!(target: "stager", "clearing stale working directory {working}");
            fs::remove_dir_all(&working).map_err(|e| PackagerError::StagingFailed {
                reason: format!("failed to clear {working}: {e}"),
            })?;
        }

        fs::create_dir_all(&working).map_err(|e| PackagerError::StagingFailed {
            reason: format!("failed to create {working}: {e}"),
        })
    }

    /// Copy the binary and shared-resource trees into the install prefix.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingFailed`] if either source is missing or
    /// cannot be copied.
    pub fn stage(&self, binaries: &Utf8Path, shared: &Utf8Path) -> Result<()> {
        copy_tree(binaries, &self.bin_path())?;
        copy_tree(shared, &self.share_path())?;
        debug!(target: "stager", "staged {binaries} and {shared} under {}", self.prefix_path());
        Ok(())
    }

    /// Return `<output>/working`.
    #[must_use]
    pub fn working_path(&self) -> Utf8PathBuf {
        self.output_dir.join(WORKING_DIR_NAME)
    }

    /// Return `<output>/working/DEBIAN`.
    #[must_use]
    pub fn debian_path(&self) -> Utf8PathBuf {
        self.working_path().join(DEBIAN_DIR_NAME)
    }

    /// Return `<output>/working/opt/<product>`.
    #[must_use]
    pub fn prefix_path(&self) -> Utf8PathBuf {
        self.working_path().join("opt").join(&self.install_name)
    }

    /// Return the staged binary directory.
    #[must_use]
    pub fn bin_path(&self) -> Utf8PathBuf {
        self.prefix_path().join("bin")
    }

    /// Return the staged shared-resource directory.
    #[must_use]
    pub fn share_path(&self) -> Utf8PathBuf {
        self.prefix_path().join("share")
    }

    /// Remove the working directory after a successful build.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory exists but cannot be removed.
    pub fn cleanup(&self) -> Result<()> {
        let working = self.working_path();
        if working.exists() {
            fs::remove_dir_all(&working)?;
        }
        Ok(())
    }
}
