//! Distpack Debian package assembler library.
//!
//! This crate turns a prebuilt distribution into a Debian `.deb` package. It
//! is used by the `distpack-deb` CLI binary and can be driven
//! programmatically for testing or custom release workflows.
//!
//! # Modules
//!
//! - [`architecture`] - Target architecture detection via `dpkg`
//! - [`archive`] - Archive creation via `dpkg-deb`
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Build configuration from TOML files and flags
//! - [`control`] - `DEBIAN/control` generation
//! - [`copyright`] - `DEBIAN/copyright` generation
//! - [`error`] - Error types for configuration and packaging
//! - [`executor`] - External command execution abstraction
//! - [`identity`] - Validated product, version and architecture values
//! - [`installed_size`] - `Installed-Size` computation
//! - [`metadata`] - Constant packaging metadata
//! - [`output`] - Progress and summary formatting
//! - [`pipeline`] - Sequential build pipeline orchestration
//! - [`scripts`] - Maintainer script installation
//! - [`stager`] - Working tree assembly
//! - [`tree`] - Directory copying and traversal helpers

pub mod architecture;
pub mod archive;
pub mod cli;
pub mod config;
pub mod control;
pub mod copyright;
pub mod error;
pub mod executor;
pub mod identity;
pub mod installed_size;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod scripts;
pub mod stager;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod tree;
