use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// File name searched for in the project root and the user config directory.
pub const CONFIG_FILE_NAME: &str = "uikit-release.toml";

/// Represents the complete configuration for a release build.
///
/// Contains the package layout, bundler invocation, relocation rule, and the
/// rules deciding which extra files land in the distribution directory.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub bundler: BundlerConfig,

    #[serde(default)]
    pub relocation: RelocationConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub third_party: ThirdPartyConfig,
}

fn default_name() -> String {
    "ui-kit-0".to_string()
}

fn default_entry() -> String {
    "ui-kit-0.js".to_string()
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

/// Project layout: bundle name, entry module, and the source/output directories.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageConfig {
    /// Base name of the produced bundles (`<name>-<version>.js`)
    #[serde(default = "default_name")]
    pub name: String,

    /// Entry module, relative to the source directory
    #[serde(default = "default_entry")]
    pub entry: String,

    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            name: default_name(),
            entry: default_entry(),
            src_dir: default_src_dir(),
            dist_dir: default_dist_dir(),
        }
    }
}

fn default_bundler_command() -> Vec<String> {
    vec!["npx".to_string(), "-y".to_string(), "esbuild".to_string()]
}

fn default_format() -> String {
    "esm".to_string()
}

fn default_target() -> String {
    "es2020".to_string()
}

/// External bundler invocation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BundlerConfig {
    /// Program followed by its leading arguments
    #[serde(default = "default_bundler_command")]
    pub command: Vec<String>,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        BundlerConfig {
            command: default_bundler_command(),
            format: default_format(),
            target: default_target(),
        }
    }
}

/// How to decide whether the project root is a usable build location.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelocationMode {
    /// Relocate when the canonical project root lies under a restricted prefix
    #[default]
    Prefixes,
    /// Relocate when a scratch file cannot be created in the project root
    Probe,
    /// Always build in place
    Never,
}

/// Android shared-storage mount points where the bundler cannot write reliably.
fn default_restricted_prefixes() -> Vec<String> {
    vec![
        "/storage/emulated/0".to_string(),
        "/sdcard".to_string(),
        "/storage/self/primary".to_string(),
    ]
}

fn default_workspace() -> String {
    ".uikit_release".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "dist".to_string(),
        ".git".to_string(),
        "__pycache__".to_string(),
        "*.pyc".to_string(),
    ]
}

/// Configuration for building in a relocated workspace under the home directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RelocationConfig {
    #[serde(default)]
    pub mode: RelocationMode,

    #[serde(default = "default_restricted_prefixes")]
    pub prefixes: Vec<String>,

    /// Workspace directory, relative to the home directory
    #[serde(default = "default_workspace")]
    pub workspace: String,

    /// Glob patterns matched against file and directory names skipped when copying
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        RelocationConfig {
            mode: RelocationMode::default(),
            prefixes: default_restricted_prefixes(),
            workspace: default_workspace(),
            exclude: default_exclude(),
        }
    }
}

fn default_source_files() -> Vec<String> {
    vec![
        "sbom.json".to_string(),
        "ui-kit-.theme.css".to_string(),
        "ui-kit-0.css".to_string(),
    ]
}

fn default_docs() -> Vec<String> {
    vec![
        "API.md".to_string(),
        "README.md".to_string(),
        "Styling.md".to_string(),
    ]
}

/// Optional files copied into the distribution directory when present.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AssetsConfig {
    /// Files taken from the source directory
    #[serde(default = "default_source_files")]
    pub source_files: Vec<String>,

    /// Files taken from the project root
    #[serde(default = "default_docs")]
    pub docs: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            source_files: default_source_files(),
            docs: default_docs(),
        }
    }
}

fn default_third_party_dir() -> String {
    "third_party".to_string()
}

fn default_minified() -> String {
    "*.min.js".to_string()
}

fn default_excluded() -> String {
    "*.map".to_string()
}

fn default_script() -> String {
    "*.js".to_string()
}

fn default_unminified_libraries() -> Vec<String> {
    vec!["ace".to_string()]
}

/// Rules for mirroring vendored scripts into the distribution directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ThirdPartyConfig {
    /// Directory under the source directory holding vendored scripts
    #[serde(default = "default_third_party_dir")]
    pub dir: String,

    /// Copied recursively from anywhere in the tree
    #[serde(default = "default_minified")]
    pub minified: String,

    /// Never copied
    #[serde(default = "default_excluded")]
    pub excluded: String,

    /// Copied from the top level of each unminified library
    #[serde(default = "default_script")]
    pub script: String,

    /// Libraries shipped without pre-minified builds
    #[serde(default = "default_unminified_libraries")]
    pub unminified_libraries: Vec<String>,
}

impl Default for ThirdPartyConfig {
    fn default() -> Self {
        ThirdPartyConfig {
            dir: default_third_party_dir(),
            minified: default_minified(),
            excluded: default_excluded(),
            script: default_script(),
            unminified_libraries: default_unminified_libraries(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `uikit-release.toml` in the project root
/// 3. `uikit-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<ReleaseConfig> {
    if let Some(path) = config_path {
        return read_config_file(path);
    }

    let local = project_root.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return read_config_file(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(CONFIG_FILE_NAME);
        if user.is_file() {
            return read_config_file(&user);
        }
    }

    Ok(ReleaseConfig::default())
}

/// Parses a single configuration file.
pub fn read_config_file(path: &Path) -> Result<ReleaseConfig> {
    let config_str =
        fs::read_to_string(path).map_err(|e| ReleaseError::file_op("read", path, e))?;
    parse_config(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(config_str: &str) -> std::result::Result<ReleaseConfig, toml::de::Error> {
    toml::from_str(config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ReleaseConfig::default());
        assert_eq!(config.package.name, "ui-kit-0");
        assert_eq!(config.bundler.target, "es2020");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[package]\nname = \"widgets\"\n").unwrap();
        assert_eq!(config.package.name, "widgets");
        assert_eq!(config.package.entry, "ui-kit-0.js");
        assert_eq!(config.relocation.mode, RelocationMode::Prefixes);
    }

    #[test]
    fn test_relocation_mode_is_lowercase() {
        let config = parse_config("[relocation]\nmode = \"probe\"\n").unwrap();
        assert_eq!(config.relocation.mode, RelocationMode::Probe);
        assert!(parse_config("[relocation]\nmode = \"Probe\"\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = load_config(
            Some(Path::new("/nonexistent/uikit-release.toml")),
            Path::new("."),
        );
        assert!(matches!(
            result,
            Err(ReleaseError::FileOperation { action: "read", .. })
        ));
    }
}
