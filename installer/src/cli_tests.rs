//! Tests for CLI parsing and override collection.

use super::*;
use rstest::rstest;

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["distpack-deb"]);
    assert!(cli.config.is_none());
    assert!(cli.product_name.is_none());
    assert!(cli.package_version.is_none());
    assert!(cli.output_dir.is_none());
    assert!(!cli.dry_run);
    assert!(!cli.clean);
    assert!(!cli.quiet);
}

#[test]
fn cli_parses_every_directory_flag() {
    let cli = Cli::parse_from([
        "distpack-deb",
        "--output-dir",
        "/out",
        "--bin-dir",
        "/dist/bin",
        "--share-dir",
        "/dist/share",
        "--dist-dir",
        "/dist",
        "--scripts-dir",
        "/packaging",
    ]);
    let dirs = cli.overrides().directories;
    assert_eq!(dirs.output, Some(Utf8PathBuf::from("/out")));
    assert_eq!(dirs.binaries, Some(Utf8PathBuf::from("/dist/bin")));
    assert_eq!(dirs.shared, Some(Utf8PathBuf::from("/dist/share")));
    assert_eq!(dirs.distribution, Some(Utf8PathBuf::from("/dist")));
    assert_eq!(dirs.scripts, Some(Utf8PathBuf::from("/packaging")));
}

#[test]
fn version_flag_sets_package_version() {
    let cli = Cli::parse_from(["distpack-deb", "--version", "1.2.0", "--product-name", "Sample"]);
    let overrides = cli.overrides();
    assert_eq!(overrides.version.as_deref(), Some("1.2.0"));
    assert_eq!(overrides.product_name.as_deref(), Some("Sample"));
}

#[rstest]
#[case::short(&["distpack-deb", "-c", "distpack.toml"])]
#[case::long(&["distpack-deb", "--config", "distpack.toml"])]
fn cli_parses_config_path(#[case] args: &[&str]) {
    let cli = Cli::parse_from(args);
    assert_eq!(cli.config, Some(Utf8PathBuf::from("distpack.toml")));
}

#[rstest]
#[case::dry_run("--dry-run")]
#[case::clean("--clean")]
#[case::quiet("-q")]
fn cli_parses_switches(#[case] flag: &str) {
    let cli = Cli::parse_from(["distpack-deb", flag]);
    assert!(cli.dry_run || cli.clean || cli.quiet);
}

#[test]
fn default_cli_has_no_overrides() {
    assert_eq!(Cli::default().overrides(), ConfigOverrides::default());
}
