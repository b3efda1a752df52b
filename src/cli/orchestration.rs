//! Main workflow orchestration logic
//!
//! This module contains the release workflow behind `uikit-release`. It
//! provides a clean separation between CLI argument parsing and the build
//! steps, and takes every piece of process state (project root, home
//! directory) as an explicit argument.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::artifacts::{self, ThirdPartyRules};
use crate::boundary::ReleaseWarning;
use crate::bundler::{BundleJob, BundleKind, Bundler};
use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::ui;
use crate::version;
use crate::workspace::{self, ExcludeSet, RelocationRule};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap or on the process environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Version as typed by the user, before sanitizing
    pub version: String,

    /// Directory holding `src/` and receiving `dist/`; resolved to an absolute path before use
    pub project_root: PathBuf,

    /// Home directory used for the relocated workspace
    pub home_dir: PathBuf,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Sanitized version used in output names
    pub version: String,

    /// Development bundle file name inside the distribution directory
    pub dev_bundle: String,

    /// Minified bundle file name inside the distribution directory
    pub min_bundle: String,

    /// Workspace the bundler ran in, when the project was relocated
    pub relocated_to: Option<PathBuf>,

    /// Auxiliary and documentation files copied into the distribution directory
    pub extra_files: Vec<PathBuf>,

    /// Third-party files copied, relative to the third-party directory
    pub third_party_files: Vec<PathBuf>,

    pub warnings: Vec<ReleaseWarning>,
}

/// Main release workflow
///
/// Orchestrates the entire packaging process:
/// 1. Check the source directory and entry module
/// 2. Sanitize the version
/// 3. Pick the build root, copying the project into a workspace if needed
/// 4. Run the development and minified bundles, in that order
/// 5. Bring relocated outputs back into the project's distribution directory
/// 6. Copy auxiliary sources, documentation, and third-party scripts
///
/// Every failure is returned immediately; nothing is retried.
pub fn run_release_workflow(
    args: &ReleaseWorkflowArgs,
    config: &ReleaseConfig,
    rule: &dyn RelocationRule,
    bundler: &dyn Bundler,
) -> Result<WorkflowResult> {
    let package = &config.package;
    let root = fs::canonicalize(&args.project_root)
        .map_err(|_| ReleaseError::missing("project root", &args.project_root))?;
    let root = root.as_path();
    let src_dir = root.join(&package.src_dir);
    let entry = src_dir.join(&package.entry);

    if !src_dir.is_dir() {
        return Err(ReleaseError::missing("source directory", src_dir));
    }
    if !entry.is_file() {
        return Err(ReleaseError::missing("entry module", entry));
    }

    let version = version::sanitize_version(&args.version)?;
    let mut warnings = version::version_warnings(&args.version, &version);
    ui::display_warnings(&warnings);

    let dev_bundle = format!("{}-{}.js", package.name, version);
    let min_bundle = format!("{}-{}.min.js", package.name, version);
    let source_map = format!("{}.map", dev_bundle);

    let dist_dir = root.join(&package.dist_dir);
    fs::create_dir_all(&dist_dir).map_err(|e| ReleaseError::file_op("create", &dist_dir, e))?;

    let relocated_to = if rule.requires_relocation(root) {
        let ws = workspace::workspace_dir(&args.home_dir, &config.relocation.workspace, root)?;
        let warning = ReleaseWarning::RelocatedBuild {
            project_root: root.to_path_buf(),
            workspace: ws.clone(),
        };
        ui::display_warning(&warning);
        warnings.push(warning);

        let exclude = ExcludeSet::new(&config.relocation.exclude)?;
        workspace::copy_project(root, &ws, &exclude)?;
        info!(workspace = %ws.display(), "project copied to build workspace");
        Some(ws)
    } else {
        None
    };
    let build_root: &Path = relocated_to.as_deref().unwrap_or(root);

    let build_dist = build_root.join(&package.dist_dir);
    fs::create_dir_all(&build_dist).map_err(|e| ReleaseError::file_op("create", &build_dist, e))?;

    let entry_arg = format!("./{}/{}", package.src_dir, package.entry);
    for (kind, outfile) in [
        (BundleKind::Development, &dev_bundle),
        (BundleKind::Minified, &min_bundle),
    ] {
        let job = BundleJob {
            kind,
            entry: entry_arg.clone(),
            outfile: format!("./{}/{}", package.dist_dir, outfile),
        };
        bundler.bundle(&job, build_root)?;
        debug!(%kind, outfile = %outfile, "bundle written");
    }

    if relocated_to.is_some() {
        for name in [&dev_bundle, &min_bundle] {
            artifacts::copy_file(&build_dist.join(name), &dist_dir.join(name))?;
        }
        let built_map = build_dist.join(&source_map);
        if built_map.is_file() {
            artifacts::copy_file(&built_map, &dist_dir.join(&source_map))?;
        } else {
            let warning = ReleaseWarning::SourceMapMissing { expected: built_map };
            ui::display_warning(&warning);
            warnings.push(warning);
        }
    }

    let build_src = build_root.join(&package.src_dir);
    let mut extra_files =
        artifacts::copy_optional_files(&build_src, &dist_dir, &config.assets.source_files)?;
    extra_files.extend(artifacts::copy_optional_files(
        build_root,
        &dist_dir,
        &config.assets.docs,
    )?);

    let rules = ThirdPartyRules::from_config(&config.third_party)?;
    let third_party_files = artifacts::sync_third_party(
        &build_src.join(&config.third_party.dir),
        &dist_dir.join(&config.third_party.dir),
        &rules,
    )?;
    info!(
        extras = extra_files.len(),
        third_party = third_party_files.len(),
        "distribution assembled"
    );

    Ok(WorkflowResult {
        version: version.to_string(),
        dev_bundle,
        min_bundle,
        relocated_to,
        extra_files,
        third_party_files,
        warnings,
    })
}
