//! Validated package identity components.
//!
//! A package is identified by `<product>-<version>-linux-<architecture>`.
//! That string names the `.deb` archive and feeds the control file, so each
//! component is validated once at construction time and never changes
//! afterwards.

use crate::error::{ConfigError, PackagerError};
use std::fmt;

/// Fixed operating-system segment of the package identity.
const PLATFORM: &str = "linux";

/// File extension of the produced archive.
const ARCHIVE_EXTENSION: &str = ".deb";

/// A product name usable in file names and `/opt` install paths.
///
/// # Examples
///
/// ```
/// use distpack_installer::identity::ProductName;
///
/// let name = ProductName::try_from("Sample").expect("valid product name");
/// assert_eq!(name.lowercase(), "sample");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the lowercased name used for the `opt/<name>` directory.
    #[must_use]
    pub fn lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl TryFrom<&str> for ProductName {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_product_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ProductName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_product_name(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_product_name(value: &str) -> Result<(), ConfigError> {
    let reject = |reason: &str| ConfigError::InvalidProductName {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(reject("name must not be empty"));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(reject("name must not contain whitespace"));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(reject("name must not be a path"));
    }
    Ok(())
}

/// A version string usable in file names and the control file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PackageVersion {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_version(value: &str) -> Result<(), ConfigError> {
    let reject = |reason: &str| ConfigError::InvalidVersion {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if value.is_empty() {
        return Err(reject("version must not be empty"));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(reject("version must not contain whitespace"));
    }
    if value.contains('/') {
        return Err(reject("version must not contain '/'"));
    }
    Ok(())
}

/// Target CPU architecture as reported by the host packaging tools.
///
/// # Examples
///
/// ```
/// use distpack_installer::identity::Architecture;
///
/// let arch = Architecture::try_from("amd64\n").expect("valid architecture");
/// assert_eq!(arch.as_str(), "amd64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Architecture(String);

impl Architecture {
    /// Return the architecture as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Architecture {
    type Error = PackagerError;

    /// Trims surrounding whitespace and rejects empty or multi-word values.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PackagerError::ArchitectureDetection {
                reason: "architecture query returned no output".to_owned(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(PackagerError::ArchitectureDetection {
                reason: format!("unexpected architecture string \"{trimmed}\""),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fully-qualified identity of one package build.
///
/// # Examples
///
/// ```
/// use distpack_installer::identity::{Architecture, PackageIdentity, PackageVersion, ProductName};
///
/// let identity = PackageIdentity::new(
///     ProductName::try_from("Sample").expect("valid name"),
///     PackageVersion::try_from("1.2.0").expect("valid version"),
///     Architecture::try_from("amd64").expect("valid architecture"),
/// );
/// assert_eq!(identity.to_string(), "Sample-1.2.0-linux-amd64");
/// assert_eq!(identity.archive_filename(), "Sample-1.2.0-linux-amd64.deb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    product: ProductName,
    version: PackageVersion,
    architecture: Architecture,
}

impl PackageIdentity {
    /// Create an identity from validated components.
    #[must_use]
    pub fn new(product: ProductName, version: PackageVersion, architecture: Architecture) -> Self {
        Self {
            product,
            version,
            architecture,
        }
    }

    /// Return the product name component.
    #[must_use]
    pub fn product(&self) -> &ProductName {
        &self.product
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &PackageVersion {
        &self.version
    }

    /// Return the architecture component.
    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// Return the archive file name, `<identity>.deb`.
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{self}{ARCHIVE_EXTENSION}")
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{PLATFORM}-{}",
            self.product, self.version, self.architecture
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_identity() -> PackageIdentity {
        PackageIdentity::new(
            ProductName::try_from("Sample").expect("valid name"),
            PackageVersion::try_from("1.2.0").expect("valid version"),
            Architecture::try_from("amd64").expect("valid architecture"),
        )
    }

    #[rstest]
    fn archive_filename_follows_naming_convention(sample_identity: PackageIdentity) {
        assert_eq!(
            sample_identity.archive_filename(),
            "Sample-1.2.0-linux-amd64.deb"
        );
    }

    #[rstest]
    fn accessors_return_components(sample_identity: PackageIdentity) {
        assert_eq!(sample_identity.product().as_str(), "Sample");
        assert_eq!(sample_identity.version().as_str(), "1.2.0");
        assert_eq!(sample_identity.architecture().as_str(), "amd64");
    }

    #[test]
    fn product_name_lowercases_for_install_path() {
        let name = ProductName::try_from("MarkText").expect("valid name");
        assert_eq!(name.lowercase(), "marktext");
        assert_eq!(name.as_str(), "MarkText");
    }

    #[rstest]
    #[case::empty("")]
    #[case::space("my product")]
    #[case::slash("a/b")]
    #[case::dotdot("..")]
    fn product_name_rejects_unusable_values(#[case] value: &str) {
        assert!(matches!(
            ProductName::try_from(value),
            Err(ConfigError::InvalidProductName { .. })
        ));
    }

    #[rstest]
    #[case::empty("")]
    #[case::tab("1.0\t")]
    #[case::slash("1/0")]
    fn version_rejects_unusable_values(#[case] value: &str) {
        assert!(matches!(
            PackageVersion::try_from(value),
            Err(ConfigError::InvalidVersion { .. })
        ));
    }

    #[rstest]
    #[case::plain("arm64", "arm64")]
    #[case::trailing_newline("amd64\n", "amd64")]
    #[case::padded("  riscv64  ", "riscv64")]
    fn architecture_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let arch = Architecture::try_from(raw).expect("valid architecture");
        assert_eq!(arch.as_str(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace_only(" \n")]
    #[case::two_words("amd64 i386")]
    fn architecture_rejects_unusable_output(#[case] raw: &str) {
        assert!(matches!(
            Architecture::try_from(raw),
            Err(PackagerError::ArchitectureDetection { .. })
        ));
    }
}
