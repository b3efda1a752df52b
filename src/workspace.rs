//! Choosing where a release is built.
//!
//! Some storage (Android shared storage under Termux, for example) does not let
//! the bundler write reliably. A [RelocationRule] decides whether the project
//! root is such a place; if so the project is copied to a workspace under the
//! home directory and built there.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

use crate::config::{RelocationConfig, RelocationMode};
use crate::error::{ReleaseError, Result};

/// Decides whether a project root must not be used as the build location.
pub trait RelocationRule: Send + Sync {
    fn requires_relocation(&self, project_root: &Path) -> bool;
}

/// Relocate when the canonical project root lies under one of the prefixes.
#[derive(Debug, Clone)]
pub struct RestrictedPrefixes {
    prefixes: Vec<PathBuf>,
}

impl RestrictedPrefixes {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        RestrictedPrefixes {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl RelocationRule for RestrictedPrefixes {
    fn requires_relocation(&self, project_root: &Path) -> bool {
        let resolved = fs::canonicalize(project_root).unwrap_or_else(|_| project_root.to_path_buf());
        self.prefixes.iter().any(|prefix| resolved.starts_with(prefix))
    }
}

/// Relocate when a scratch file cannot be created in the project root.
#[derive(Debug, Clone, Copy, Default)]
pub struct WritabilityProbe;

impl RelocationRule for WritabilityProbe {
    fn requires_relocation(&self, project_root: &Path) -> bool {
        let probe = project_root.join(format!(".uikit-release-probe-{}", std::process::id()));
        match fs::write(&probe, b"probe") {
            Ok(()) => {
                if let Err(e) = fs::remove_file(&probe) {
                    warn!(path = %probe.display(), error = %e, "could not remove writability probe file");
                }
                false
            }
            Err(e) => {
                debug!(path = %probe.display(), error = %e, "project root is not writable");
                true
            }
        }
    }
}

/// Always build in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRelocate;

impl RelocationRule for NeverRelocate {
    fn requires_relocation(&self, _project_root: &Path) -> bool {
        false
    }
}

/// Builds the rule selected by `config.mode`.
pub fn relocation_rule(config: &RelocationConfig) -> Box<dyn RelocationRule> {
    match config.mode {
        RelocationMode::Prefixes => Box::new(RestrictedPrefixes::new(config.prefixes.iter())),
        RelocationMode::Probe => Box::new(WritabilityProbe),
        RelocationMode::Never => Box::new(NeverRelocate),
    }
}

/// `<home>/<workspace>/build_<project dir name>`
pub fn workspace_dir(home: &Path, workspace: &str, project_root: &Path) -> Result<PathBuf> {
    let name = project_root
        .file_name()
        .ok_or_else(|| {
            ReleaseError::config(format!(
                "project root {} has no directory name",
                project_root.display()
            ))
        })?
        .to_string_lossy();
    Ok(home.join(workspace).join(format!("build_{}", name)))
}

/// Names skipped while copying a project into its workspace.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ExcludeSet { patterns })
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Replaces `destination` with a copy of `source`, skipping excluded names.
///
/// The destination is removed first, so a previous workspace is never merged
/// with the new copy.
pub fn copy_project(source: &Path, destination: &Path, exclude: &ExcludeSet) -> Result<()> {
    if destination.starts_with(source) {
        return Err(ReleaseError::config(format!(
            "workspace {} lies inside the project {}",
            destination.display(),
            source.display()
        )));
    }

    if destination.exists() {
        fs::remove_dir_all(destination)
            .map_err(|e| ReleaseError::file_op("remove", destination, e))?;
    }

    copy_filtered(source, destination, exclude)
}

fn copy_filtered(source: &Path, destination: &Path, exclude: &ExcludeSet) -> Result<()> {
    fs::create_dir_all(destination).map_err(|e| ReleaseError::file_op("create", destination, e))?;

    for entry in fs::read_dir(source).map_err(|e| ReleaseError::file_op("read", source, e))? {
        let entry = entry?;
        let name = entry.file_name();
        if exclude.is_excluded(&name.to_string_lossy()) {
            continue;
        }

        let src_path = entry.path();
        let dst_path = destination.join(&name);
        if fs::metadata(&src_path)?.is_dir() {
            copy_filtered(&src_path, &dst_path, exclude)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| ReleaseError::file_op("copy", &src_path, e))?;
        }
    }

    Ok(())
}
