//! Debian control file generation.
//!
//! The control file is line oriented: one `Field: value` pair per line, in a
//! fixed order, each line newline-terminated.

use crate::error::{PackagerError, Result};
use crate::identity::PackageIdentity;
use crate::metadata::PackagingMetadata;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fmt;
use std::fs;

/// Name of the control file inside the `DEBIAN` directory.
pub const CONTROL_FILE_NAME: &str = "control";

/// The fields of a binary package control file, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    /// `Package`
    Package,
    /// `Version`
    Version,
    /// `Architecture`
    Architecture,
    /// `Installed-Size`
    InstalledSize,
    /// `Section`
    Section,
    /// `Priority`
    Priority,
    /// `Maintainer`
    Maintainer,
    /// `Homepage`
    Homepage,
    /// `Description`
    Description,
}

impl ControlField {
    /// Every field in the order it appears in the file.
    pub const ORDER: [Self; 9] = [
        Self::Package,
        Self::Version,
        Self::Architecture,
        Self::InstalledSize,
        Self::Section,
        Self::Priority,
        Self::Maintainer,
        Self::Homepage,
        Self::Description,
    ];

    /// Return the field name as written in the file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Package => "Package",
            Self::Version => "Version",
            Self::Architecture => "Architecture",
            Self::InstalledSize => "Installed-Size",
            Self::Section => "Section",
            Self::Priority => "Priority",
            Self::Maintainer => "Maintainer",
            Self::Homepage => "Homepage",
            Self::Description => "Description",
        }
    }
}

impl fmt::Display for ControlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendered-ready control metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFile {
    fields: Vec<(ControlField, String)>,
}

impl ControlFile {
    /// Assemble the control metadata for one build.
    ///
    /// `Package` is the lowercased product name, since Debian package names
    /// may not contain uppercase letters.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidMetadata`] if any value contains a line
    /// break or is empty.
    pub fn new(
        identity: &PackageIdentity,
        installed_size_kib: u64,
        metadata: &PackagingMetadata,
    ) -> Result<Self> {
        let fields = ControlField::ORDER
            .iter()
            .map(|&field| {
                let value = match field {
                    ControlField::Package => identity.product().lowercase(),
                    ControlField::Version => identity.version().to_string(),
                    ControlField::Architecture => identity.architecture().to_string(),
                    ControlField::InstalledSize => installed_size_kib.to_string(),
                    ControlField::Section => metadata.section.clone(),
                    ControlField::Priority => metadata.priority.clone(),
                    ControlField::Maintainer => metadata.maintainer.clone(),
                    ControlField::Homepage => metadata.homepage.clone(),
                    ControlField::Description => metadata.description.clone(),
                };
                validate_value(field, &value)?;
                Ok((field, value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// Return the value recorded for `field`.
    #[must_use]
    pub fn value(&self, field: ControlField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value.as_str())
    }

    /// Render the file contents.
    #[must_use]
    pub fn render(&self) -> String {
        self.fields
            .iter()
            .map(|(field, value)| format!("{field}: {value}\n"))
            .collect()
    }

    /// Write the control file into `debian_dir`, creating the directory if
    /// needed, and return the path written.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::WriteFailed`] if the directory or file cannot
    /// be written.
    pub fn write_to(&self, debian_dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let path = debian_dir.join(CONTROL_FILE_NAME);
        write_metadata_file(&path, &self.render())?;
        debug!(target: "control", "wrote {path}");
        Ok(path)
    }
}

fn validate_value(field: ControlField, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PackagerError::InvalidMetadata {
            field: field.name(),
            reason: "value must not be empty".to_owned(),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(PackagerError::InvalidMetadata {
            field: field.name(),
            reason: "value must not contain line breaks".to_owned(),
        });
    }
    Ok(())
}

/// Create the parent directory of `path` and write `contents` to it.
pub(crate) fn write_metadata_file(path: &Utf8Path, contents: &str) -> Result<()> {
    let write_failed = |source| PackagerError::WriteFailed {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, contents).map_err(write_failed)
}
