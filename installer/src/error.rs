//! Error types for the Debian package assembler.
//!
//! This module defines semantic error variants for every step of the
//! packaging pipeline. Each variant names the path, field, or tool involved so
//! a failed build can be diagnosed from the message alone.

use crate::pipeline::BuildStage;
use camino::Utf8PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while assembling a package.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The target architecture could not be determined.
    #[error("architecture detection failed: {reason}")]
    ArchitectureDetection {
        /// Description of why detection failed.
        reason: String,
    },

    /// Copying files into the working tree failed.
    #[error("staging failed: {reason}")]
    StagingFailed {
        /// Description of the staging failure.
        reason: String,
    },

    /// Walking a directory tree failed.
    #[error("failed to traverse {path}: {reason}")]
    Traversal {
        /// Root of the traversal.
        path: Utf8PathBuf,
        /// Description of the walker error.
        reason: String,
    },

    /// A metadata file could not be written.
    #[error("failed to write {path}")]
    WriteFailed {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// The maintainer script directory does not exist.
    #[error("maintainer scripts not found at {path}")]
    ScriptsMissing {
        /// Expected location of the scripts.
        path: Utf8PathBuf,
    },

    /// A control-file value cannot be represented in the output format.
    #[error("invalid value for control field {field}: {reason}")]
    InvalidMetadata {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// The archive builder exited unsuccessfully.
    #[error("dpkg-deb failed ({status}): {message}")]
    ArchiveBuild {
        /// Exit status reported by the tool.
        status: ExitStatus,
        /// Captured standard error of the tool.
        message: String,
    },

    /// The build configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline stage failed; wraps the underlying error.
    #[error("{stage} failed: {source}")]
    StageFailed {
        /// The stage that was running when the failure occurred.
        stage: BuildStage,
        /// The error raised by the stage.
        #[source]
        source: Box<PackagerError>,
    },

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

impl PackagerError {
    /// Return the pipeline stage recorded on this error, if any.
    #[must_use]
    pub fn stage(&self) -> Option<BuildStage> {
        match self {
            Self::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Return the innermost error, looking through stage wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::StageFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised while loading or validating the build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}")]
    Read {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("invalid configuration file {path}: {message}")]
    Parse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A required value was supplied neither on the command line nor in the file.
    #[error("missing required setting `{name}`")]
    MissingValue {
        /// Name of the setting.
        name: &'static str,
    },

    /// The product name cannot be used in file names or install paths.
    #[error("invalid product name \"{value}\": {reason}")]
    InvalidProductName {
        /// The rejected name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// The version string cannot be used in a package name.
    #[error("invalid version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A configured source directory does not exist.
    #[error("{role} directory not found: {path}")]
    MissingDirectory {
        /// Which directory of the set is missing (e.g. "binaries").
        role: &'static str,
        /// The configured path.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
