//! Fixed packaging metadata.
//!
//! Values that do not vary between builds live in one table so every
//! packaging target reads the same maintainer, homepage and licence
//! information.

use serde::Deserialize;

/// Debian archive section for the package.
pub const DEFAULT_SECTION: &str = "user/text";

/// Debian priority for the package.
pub const DEFAULT_PRIORITY: &str = "optional";

/// Organisational maintainer contact.
pub const DEFAULT_MAINTAINER: &str = "Distpack Maintainers <packaging@distpack.dev>";

/// Project homepage, also used as the copyright `Source`.
pub const DEFAULT_HOMEPAGE: &str = "https://github.com/distpack/distpack";

/// One-line product description.
pub const DEFAULT_DESCRIPTION: &str = "Document editor and converter";

/// Copyright holder named in the `Files: *` stanza.
pub const DEFAULT_COPYRIGHT: &str = "Distpack Maintainers";

/// Licence named in the `Files: *` stanza.
pub const DEFAULT_LICENSE: &str = "ISC";

/// Constant metadata shared by the control and copyright files.
///
/// Every field may be overridden from the `[metadata]` table of the
/// configuration file; omitted fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingMetadata {
    /// Debian `Section` field.
    pub section: String,
    /// Debian `Priority` field.
    pub priority: String,
    /// Debian `Maintainer` field.
    pub maintainer: String,
    /// Debian `Homepage` field and copyright `Source`.
    pub homepage: String,
    /// Debian `Description` field.
    pub description: String,
    /// Copyright holder.
    pub copyright: String,
    /// Licence short name.
    pub license: String,
}

impl Default for PackagingMetadata {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_owned(),
            priority: DEFAULT_PRIORITY.to_owned(),
            maintainer: DEFAULT_MAINTAINER.to_owned(),
            homepage: DEFAULT_HOMEPAGE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            copyright: DEFAULT_COPYRIGHT.to_owned(),
            license: DEFAULT_LICENSE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let metadata = PackagingMetadata::default();
        assert_eq!(metadata.section, "user/text");
        assert_eq!(metadata.priority, "optional");
        assert_eq!(metadata.homepage, DEFAULT_HOMEPAGE);
    }

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let metadata: PackagingMetadata =
            toml::from_str("maintainer = \"Jo <jo@example.org>\"").expect("valid table");
        assert_eq!(metadata.maintainer, "Jo <jo@example.org>");
        assert_eq!(metadata.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<PackagingMetadata, _> = toml::from_str("maintainr = \"typo\"");
        assert!(result.is_err());
    }
}
