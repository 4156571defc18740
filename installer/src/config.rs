//! Build configuration.
//!
//! A build is described by a product name, a version and a set of
//! directories. Values come from an optional TOML file and from command-line
//! flags, with flags taking precedence. Relative directories in the file are
//! resolved against the file's own directory.

use crate::error::ConfigError;
use crate::identity::{PackageVersion, ProductName};
use crate::metadata::PackagingMetadata;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Directory table of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryTable {
    /// Where the working tree and archive are written.
    pub output: Option<Utf8PathBuf>,
    /// Compiled binaries, staged to `opt/<product>/bin`.
    pub binaries: Option<Utf8PathBuf>,
    /// Shared resources, staged to `opt/<product>/share`.
    pub shared: Option<Utf8PathBuf>,
    /// Full distribution tree used for size accounting.
    pub distribution: Option<Utf8PathBuf>,
    /// Packaging scripts root containing `linux/deb`.
    pub scripts: Option<Utf8PathBuf>,
}

/// Raw contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Product name.
    pub product_name: Option<String>,
    /// Product version.
    pub version: Option<String>,
    /// Directory set.
    pub directories: DirectoryTable,
    /// Overrides for the constant metadata table.
    pub metadata: Option<PackagingMetadata>,
}

impl ConfigFile {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or
    /// contains unknown keys.
    pub fn parse(contents: &str, path: &Utf8Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file, resolving relative directories
    /// against the file's parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let mut file = Self::parse(&contents, path)?;
        if let Some(base) = path.parent() {
            file.directories.rebase(base);
        }
        Ok(file)
    }
}

impl DirectoryTable {
    fn rebase(&mut self, base: &Utf8Path) {
        for dir in [
            &mut self.output,
            &mut self.binaries,
            &mut self.shared,
            &mut self.distribution,
            &mut self.scripts,
        ]
        .into_iter()
        .flatten()
        {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    fn overlay(self, overrides: Self) -> Self {
        Self {
            output: overrides.output.or(self.output),
            binaries: overrides.binaries.or(self.binaries),
            shared: overrides.shared.or(self.shared),
            distribution: overrides.distribution.or(self.distribution),
            scripts: overrides.scripts.or(self.scripts),
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--product-name`
    pub product_name: Option<String>,
    /// `--version`
    pub version: Option<String>,
    /// Directory flags.
    pub directories: DirectoryTable,
}

/// The resolved directory set for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySet {
    /// Output directory.
    pub output: Utf8PathBuf,
    /// Binary source directory.
    pub binaries: Utf8PathBuf,
    /// Shared-resource source directory.
    pub shared: Utf8PathBuf,
    /// Full distribution tree.
    pub distribution: Utf8PathBuf,
    /// Packaging scripts root.
    pub scripts: Utf8PathBuf,
}

/// A complete, validated build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Product name.
    pub product: ProductName,
    /// Product version.
    pub version: PackageVersion,
    /// Directory set.
    pub directories: DirectorySet,
    /// Constant metadata table.
    pub metadata: PackagingMetadata,
}

impl BuildConfiguration {
    /// Merge file values with command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] if a required setting is absent,
    /// or a validation error for an unusable product name or version.
    pub fn resolve(file: ConfigFile, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let product_name = overrides
            .product_name
            .or(file.product_name)
            .ok_or(ConfigError::MissingValue {
                name: "product_name",
            })?;
        let version = overrides
            .version
            .or(file.version)
            .ok_or(ConfigError::MissingValue { name: "version" })?;
        let dirs = file.directories.overlay(overrides.directories);

        let require = |value: Option<Utf8PathBuf>, name: &'static str| {
            value.ok_or(ConfigError::MissingValue { name })
        };

        Ok(Self {
            product: ProductName::try_from(product_name)?,
            version: PackageVersion::try_from(version)?,
            directories: DirectorySet {
                output: require(dirs.output, "directories.output")?,
                binaries: require(dirs.binaries, "directories.binaries")?,
                shared: require(dirs.shared, "directories.shared")?,
                distribution: require(dirs.distribution, "directories.distribution")?,
                scripts: require(dirs.scripts, "directories.scripts")?,
            },
            metadata: file.metadata.unwrap_or_default(),
        })
    }

    /// Check that every source directory exists.
    ///
    /// The output directory is not checked; the pipeline creates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] for the first source
    /// directory that does not exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dirs = &self.directories;
        for (role, path) in [
            ("binaries", &dirs.binaries),
            ("shared", &dirs.shared),
            ("distribution", &dirs.distribution),
            ("scripts", &dirs.scripts),
        ] {
            if !path.is_dir() {
                return Err(ConfigError::MissingDirectory {
                    role,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}
