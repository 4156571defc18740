//! Package build pipeline orchestration.
//!
//! This module runs the packaging steps in a fixed order: detect the
//! architecture, stage files, compute the installed size, write the control
//! metadata, install maintainer scripts and build the archive. The first
//! failing stage aborts the build; its error is wrapped in
//! [`PackagerError::StageFailed`] so callers can tell where it happened.

use crate::architecture::detect_architecture;
use crate::archive::build_archive;
use crate::config::BuildConfiguration;
use crate::control::ControlFile;
use crate::copyright::write_copyright;
use crate::error::{PackagerError, Result};
use crate::executor::CommandExecutor;
use crate::identity::PackageIdentity;
use crate::installed_size::installed_size_kib;
use crate::output::write_stderr_line;
use crate::scripts::install_maintainer_scripts;
use crate::stager::Stager;
use camino::Utf8PathBuf;
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io::Write;

/// The stages of a package build, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Querying the target architecture.
    DetectingArchitecture,
    /// Building the working tree.
    StagingFiles,
    /// Summing the distribution tree.
    ComputingSize,
    /// Writing `control` and `copyright`.
    WritingMetadata,
    /// Copying maintainer scripts.
    InstallingScripts,
    /// Running `dpkg-deb`.
    BuildingArchive,
    /// The archive has been produced.
    Done,
}

impl BuildStage {
    /// Return the stage that follows this one, or `None` once done.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::DetectingArchitecture => Some(Self::StagingFiles),
            Self::StagingFiles => Some(Self::ComputingSize),
            Self::ComputingSize => Some(Self::WritingMetadata),
            Self::WritingMetadata => Some(Self::InstallingScripts),
            Self::InstallingScripts => Some(Self::BuildingArchive),
            Self::BuildingArchive => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Return a human-readable description of the stage.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DetectingArchitecture => "detecting architecture",
            Self::StagingFiles => "staging files",
            Self::ComputingSize => "computing installed size",
            Self::WritingMetadata => "writing metadata",
            Self::InstallingScripts => "installing maintainer scripts",
            Self::BuildingArchive => "building archive",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Options for one pipeline run.
pub struct PipelineContext<'a> {
    /// The resolved build configuration.
    pub config: &'a BuildConfiguration,
    /// Executor used for `dpkg` and `dpkg-deb`.
    pub executor: &'a dyn CommandExecutor,
    /// Suppress progress output.
    pub quiet: bool,
    /// Remove the working directory after a successful build.
    pub clean: bool,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// The package identity.
    pub identity: PackageIdentity,
    /// Path to the produced `.deb`.
    pub archive_path: Utf8PathBuf,
    /// The `Installed-Size` value written to the control file.
    pub installed_size_kib: u64,
    /// The working directory (removed if cleanup was requested).
    pub working_dir: Utf8PathBuf,
}

/// Tracks the current stage and wraps failures with it.
struct StageTracker<'w> {
    stage: BuildStage,
    quiet: bool,
    stderr: &'w mut dyn Write,
}

impl StageTracker<'_> {
    fn run<T>(&mut self, stage: BuildStage, step: impl FnOnce() -> Result<T>) -> Result<T> {
        debug_assert!(
            self.stage == stage || self.stage.next() == Some(stage),
            "stage {stage} cannot follow {}",
            self.stage
        );
        self.stage = stage;
        debug!(target: "pipeline", "entering stage: {stage}");
        if !self.quiet {
            write_stderr_line(self.stderr, format!("==> {stage}"));
        }
        step().map_err(|source| PackagerError::StageFailed {
            stage,
            source: Box::new(source),
        })
    }

    fn finish(&mut self) {
        debug!(target: "pipeline", "{} complete", self.stage);
        self.stage = BuildStage::Done;
    }
}

/// Run the full packaging pipeline.
///
/// Nothing on disk is touched until the architecture has been detected, so a
/// detection failure leaves the output directory untouched.
///
/// # Errors
///
/// Returns [`PackagerError::StageFailed`] wrapping the first error raised by
/// any stage.
pub fn build_package(
    context: &PipelineContext<'_>,
    stderr: &mut dyn Write,
) -> Result<PackageOutput> {
    let config = context.config;
    let dirs = &config.directories;
    let stager = Stager::new(&dirs.output, &config.product);
    let mut tracker = StageTracker {
        stage: BuildStage::DetectingArchitecture,
        quiet: context.quiet,
        stderr,
    };

    let architecture = tracker.run(BuildStage::DetectingArchitecture, || {
        detect_architecture(context.executor)
    })?;
    let identity = PackageIdentity::new(
        config.product.clone(),
        config.version.clone(),
        architecture,
    );
    info!(target: "pipeline", "building {identity}");

    tracker.run(BuildStage::StagingFiles, || {
        fs::create_dir_all(&dirs.output).map_err(|e| PackagerError::StagingFailed {
            reason: format!("failed to create output directory {}: {e}", dirs.output),
        })?;
        stager.prepare()?;
        stager.stage(&dirs.binaries, &dirs.shared)
    })?;

    let installed_size = tracker.run(BuildStage::ComputingSize, || {
        installed_size_kib(&dirs.distribution)
    })?;

    let debian_dir = stager.debian_path();
    tracker.run(BuildStage::WritingMetadata, || {
        ControlFile::new(&identity, installed_size, &config.metadata)?.write_to(&debian_dir)?;
        write_copyright(&debian_dir, &config.product, &config.metadata)?;
        Ok(())
    })?;

    tracker.run(BuildStage::InstallingScripts, || {
        install_maintainer_scripts(&dirs.scripts, &debian_dir)
    })?;

    let archive_path = dirs.output.join(identity.archive_filename());
    let working_dir = stager.working_path();
    tracker.run(BuildStage::BuildingArchive, || {
        build_archive(context.executor, &working_dir, &archive_path)
    })?;
    tracker.finish();

    if context.clean {
        stager.cleanup()?;
        debug!(target: "pipeline", "removed {working_dir}");
    }

    Ok(PackageOutput {
        identity,
        archive_path,
        installed_size_kib: installed_size,
        working_dir,
    })
}

/// What a build would produce, computed without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
    /// The package identity.
    pub identity: PackageIdentity,
    /// Where the archive would be written.
    pub archive_path: Utf8PathBuf,
    /// Where the working tree would be built.
    pub working_dir: Utf8PathBuf,
    /// Staged binary directory.
    pub bin_dir: Utf8PathBuf,
    /// Staged shared-resource directory.
    pub share_dir: Utf8PathBuf,
}

/// Describe the build for `config` without running it.
///
/// Only the architecture query runs; nothing on disk is touched.
///
/// # Errors
///
/// Returns [`PackagerError::ArchitectureDetection`] if detection fails.
pub fn plan_package(
    config: &BuildConfiguration,
    executor: &dyn CommandExecutor,
) -> Result<PackagePlan> {
    let architecture = detect_architecture(executor)?;
    let identity = PackageIdentity::new(
        config.product.clone(),
        config.version.clone(),
        architecture,
    );
    let stager = Stager::new(&config.directories.output, &config.product);
    Ok(PackagePlan {
        archive_path: config.directories.output.join(identity.archive_filename()),
        working_dir: stager.working_path(),
        bin_dir: stager.bin_path(),
        share_dir: stager.share_path(),
        identity,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
