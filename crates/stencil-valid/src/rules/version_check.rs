use semver::Version;

use stencil_spec::parser::CONFIG_FILE;
use stencil_spec::types::config::StencilConfig;
use stencil_spec::types::error::{ErrorEntry, ValidationReport, E_VERSION_MISMATCH};

const SUPPORTED_VERSION: Version = Version::new(1, 0, 0);

/// Check that the project file format version is supported.
pub fn check(config: &StencilConfig, report: &mut ValidationReport) {
    let version_str = &config.version;

    match Version::parse(version_str) {
        Ok(version) => {
            if version.major != SUPPORTED_VERSION.major || version.minor != SUPPORTED_VERSION.minor
            {
                report.push(
                    ErrorEntry::error(
                        E_VERSION_MISMATCH,
                        format!(
                            "Unsupported project version '{version_str}'. Expected compatible with {SUPPORTED_VERSION}"
                        ),
                        CONFIG_FILE,
                        "$.version",
                    )
                    .with_suggestion(format!("Set 'version' to \"{SUPPORTED_VERSION}\"")),
                );
            }
        }
        Err(_) => {
            report.push(
                ErrorEntry::error(
                    E_VERSION_MISMATCH,
                    format!("Invalid semver version: '{version_str}'"),
                    CONFIG_FILE,
                    "$.version",
                )
                .with_suggestion("Version must be valid semver (e.g., '1.0.0')"),
            );
        }
    }
}
