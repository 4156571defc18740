//! CLI argument definitions for the Debian package assembler.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::config::{ConfigOverrides, DirectoryTable};
use camino::Utf8PathBuf;
use clap::Parser;

/// Assemble a Debian `.deb` package from a prebuilt distribution.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "distpack-deb")]
#[command(about)]
#[command(long_about = concat!(
    "Assemble a Debian .deb package from a prebuilt distribution.\n\n",
    "Binaries and shared resources are staged under opt/<product> inside a ",
    "working tree, control and copyright metadata are generated, maintainer ",
    "scripts are copied from <scripts>/linux/deb, and dpkg-deb packs the result ",
    "into <output>/<product>-<version>-linux-<arch>.deb.\n\n",
    "Settings may come from a TOML file (--config) and from flags; flags win.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build from a configuration file:\n",
    "    $ distpack-deb --config distpack.toml\n\n",
    "  Override the version for a release build:\n",
    "    $ distpack-deb --config distpack.toml --version 1.2.0\n\n",
    "  Preview without building:\n",
    "    $ distpack-deb --config distpack.toml --dry-run\n",
))]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Product name used in paths and the archive name.
    #[arg(long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// Package version.
    #[arg(long = "version", value_name = "VER")]
    pub package_version: Option<String>,

    /// Directory receiving the working tree and the archive.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Directory of compiled binaries.
    #[arg(long, value_name = "DIR")]
    pub bin_dir: Option<Utf8PathBuf>,

    /// Directory of shared resources.
    #[arg(long, value_name = "DIR")]
    pub share_dir: Option<Utf8PathBuf>,

    /// Full distribution tree used to compute the installed size.
    #[arg(long, value_name = "DIR")]
    pub dist_dir: Option<Utf8PathBuf>,

    /// Packaging scripts root containing `linux/deb`.
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<Utf8PathBuf>,

    /// Show the planned build and exit without modifying files.
    #[arg(long)]
    pub dry_run: bool,

    /// Remove the working directory after a successful build.
    #[arg(long)]
    pub clean: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Collect the flags that override configuration-file values.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use distpack_installer::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["distpack-deb", "--version", "2.0.0"]);
    /// let overrides = cli.overrides();
    /// assert_eq!(overrides.version.as_deref(), Some("2.0.0"));
    /// assert!(overrides.product_name.is_none());
    /// ```
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            product_name: self.product_name.clone(),
            version: self.package_version.clone(),
            directories: DirectoryTable {
                output: self.output_dir.clone(),
                binaries: self.bin_dir.clone(),
                shared: self.share_dir.clone(),
                distribution: self.dist_dir.clone(),
                scripts: self.scripts_dir.clone(),
            },
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
