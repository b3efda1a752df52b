use std::sync::LazyLock;

use regex::Regex;

use crate::boundary::ReleaseWarning;
use crate::error::{ReleaseError, Result};

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9._-]").expect("version character class is a valid regex")
});

/// A release version that is safe to embed in file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    value: String,
}

impl ReleaseVersion {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the version also parses as a semantic version.
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.value).is_ok()
    }
}

impl std::fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Removes every character outside `[A-Za-z0-9._-]`, keeping the rest in order.
///
/// # Returns
/// * `Ok(ReleaseVersion)` - At least one allowed character remained
/// * `Err(ReleaseError::Usage)` - Nothing usable was left
///
/// # Example
/// ```
/// # use uikit_devtools::version::sanitize_version;
/// # fn main() -> Result<(), uikit_devtools::ReleaseError> {
/// assert_eq!(sanitize_version(" v1.2.3 ")?.as_str(), "v1.2.3");
/// assert_eq!(sanitize_version("1.0/../x")?.as_str(), "1.0..x");
/// assert!(sanitize_version("$$$").is_err());
/// # Ok(())
/// # }
/// ```
pub fn sanitize_version(raw: &str) -> Result<ReleaseVersion> {
    let value = DISALLOWED.replace_all(raw, "").into_owned();
    if value.is_empty() {
        return Err(ReleaseError::usage(
            "invalid version (allowed: letters/digits . _ -)",
        ));
    }
    Ok(ReleaseVersion { value })
}

/// Non-fatal observations about how a raw version argument was interpreted.
pub fn version_warnings(raw: &str, version: &ReleaseVersion) -> Vec<ReleaseWarning> {
    let mut warnings = Vec::new();

    if raw.trim() != version.as_str() {
        warnings.push(ReleaseWarning::VersionCharactersDropped {
            original: raw.to_string(),
            sanitized: version.to_string(),
        });
    }

    if !version.is_semver() {
        warnings.push(ReleaseWarning::NonSemverVersion {
            version: version.to_string(),
        });
    }

    warnings
}
