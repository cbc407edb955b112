//! Version comparison for CLI and catalog compatibility

use semver::Version;

/// Parse a version string, tolerating a leading 'v'
fn parse(version: &str) -> Option<Version> {
    Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}

/// Compare the CLI version against the catalog's declared version.
/// Returns a warning message if the CLI is older than the catalog expects;
/// unparseable versions skip the warning.
pub fn check_compatibility(
    cli_version: &str,
    catalog_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = parse(cli_version)?;
    let catalog = parse(catalog_version)?;

    (cli < catalog).then(|| {
        format!(
            "This template catalog was built for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            catalog_version, cli_version, upgrade_command
        )
    })
}
