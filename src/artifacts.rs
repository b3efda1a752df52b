//! Copying build outputs and curated extras into the distribution directory.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;

use crate::config::ThirdPartyConfig;
use crate::error::{ReleaseError, Result};

/// Copies `source` to `destination`, creating the parent directory.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| ReleaseError::file_op("create", parent, e))?;
    }
    fs::copy(source, destination).map_err(|e| ReleaseError::file_op("copy", source, e))?;
    Ok(())
}

/// Copies each named file from `from_dir` into `to_dir` when it exists.
///
/// Missing files are skipped silently. Returns the destination paths written.
pub fn copy_optional_files(from_dir: &Path, to_dir: &Path, names: &[String]) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for name in names {
        let source = from_dir.join(name);
        if !source.is_file() {
            debug!(path = %source.display(), "optional file not present");
            continue;
        }
        let destination = to_dir.join(name);
        copy_file(&source, &destination)?;
        copied.push(destination);
    }
    Ok(copied)
}

/// Compiled third-party selection rules.
#[derive(Debug, Clone)]
pub struct ThirdPartyRules {
    minified: Pattern,
    excluded: Pattern,
    script: Pattern,
    unminified_libraries: Vec<String>,
}

impl ThirdPartyRules {
    pub fn from_config(config: &ThirdPartyConfig) -> Result<Self> {
        Ok(ThirdPartyRules {
            minified: Pattern::new(&config.minified)?,
            excluded: Pattern::new(&config.excluded)?,
            script: Pattern::new(&config.script)?,
            unminified_libraries: config.unminified_libraries.clone(),
        })
    }

    fn is_minified(&self, name: &str) -> bool {
        self.minified.matches(name) && !self.excluded.matches(name)
    }

    fn is_plain_script(&self, name: &str) -> bool {
        self.script.matches(name) && !self.excluded.matches(name)
    }

    /// Relative paths (under the third-party root) that belong in the distribution.
    ///
    /// Every minified script anywhere in the tree, plus the top-level scripts of
    /// each unminified library. The result is sorted and free of duplicates.
    pub fn select(&self, third_party_root: &Path) -> Result<Vec<PathBuf>> {
        let mut selected = Vec::new();

        for file in walk_files(third_party_root)? {
            let is_match = file
                .file_name()
                .map(|n| self.is_minified(&n.to_string_lossy()))
                .unwrap_or(false);
            if is_match {
                selected.push(relative_to(&file, third_party_root)?);
            }
        }

        for library in &self.unminified_libraries {
            let library_dir = third_party_root.join(library);
            if !library_dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&library_dir)
                .map_err(|e| ReleaseError::file_op("read", &library_dir, e))?
            {
                let entry = entry?;
                let path = entry.path();
                if path.is_file() && self.is_plain_script(&entry.file_name().to_string_lossy()) {
                    selected.push(relative_to(&path, third_party_root)?);
                }
            }
        }

        selected.sort();
        selected.dedup();
        Ok(selected)
    }
}

/// Mirrors the selected third-party scripts into `destination`.
///
/// `destination` is wiped first so files removed from the source tree do not
/// survive from an earlier release. Nothing happens when `source` is not a
/// directory. Returns the relative paths copied.
pub fn sync_third_party(source: &Path, destination: &Path, rules: &ThirdPartyRules) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        debug!(path = %source.display(), "no third-party directory");
        return Ok(Vec::new());
    }

    if destination.exists() {
        fs::remove_dir_all(destination).map_err(|e| ReleaseError::file_op("remove", destination, e))?;
    }
    fs::create_dir_all(destination).map_err(|e| ReleaseError::file_op("create", destination, e))?;

    let selected = rules.select(source)?;
    for relative in &selected {
        copy_file(&source.join(relative), &destination.join(relative))?;
    }
    Ok(selected)
}

fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(|e| ReleaseError::file_op("read", &dir, e))? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn relative_to(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| ReleaseError::config(format!("{} escaped {}", path.display(), root.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    fn rules() -> ThirdPartyRules {
        ThirdPartyRules::from_config(&ThirdPartyConfig::default()).unwrap()
    }

    #[test]
    fn test_select_applies_minified_and_library_rules() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "marked/marked.min.js");
        touch(root, "marked/marked.min.js.map");
        touch(root, "marked/marked.js");
        touch(root, "deep/a/b/c.min.js");
        touch(root, "ace/ace.js");
        touch(root, "ace/ace.js.map");
        touch(root, "ace/ext-search.js");
        touch(root, "ace/worker.min.js");
        touch(root, "ace/snippets/js.js");
        touch(root, "ace/README.md");

        let selected = rules().select(root).unwrap();
        let expected: Vec<PathBuf> = [
            "ace/ace.js",
            "ace/ext-search.js",
            "ace/worker.min.js",
            "deep/a/b/c.min.js",
            "marked/marked.min.js",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(selected, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_select_does_not_descend_into_symlinked_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(root, "lib/a.min.js");
        touch(root, "real/b.min.js");
        std::os::unix::fs::symlink(root.join("lib"), root.join("lib/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("real/b.min.js"), root.join("lib/b.min.js")).unwrap();

        let selected = rules().select(root).unwrap();
        let expected: Vec<PathBuf> = ["lib/a.min.js", "lib/b.min.js", "real/b.min.js"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(selected, expected);
    }

    #[test]
    fn test_select_with_missing_library_dir() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "x/x.js");
        assert!(rules().select(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_custom_patterns() {
        let config = ThirdPartyConfig {
            minified: "*.prod.js".to_string(),
            unminified_libraries: Vec::new(),
            ..ThirdPartyConfig::default()
        };
        let rules = ThirdPartyRules::from_config(&config).unwrap();
        let dir = tempdir().unwrap();
        touch(dir.path(), "v/v.prod.js");
        touch(dir.path(), "v/v.min.js");
        assert_eq!(rules.select(dir.path()).unwrap(), vec![PathBuf::from("v/v.prod.js")]);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let config = ThirdPartyConfig {
            minified: "[".to_string(),
            ..ThirdPartyConfig::default()
        };
        assert!(matches!(
            ThirdPartyRules::from_config(&config),
            Err(ReleaseError::Pattern(_))
        ));
    }

    #[test]
    fn test_sync_without_source_leaves_destination() {
        let dir = tempdir().unwrap();
        let dst = dir.path().join("dist/third_party");
        touch(dir.path(), "dist/third_party/keep.min.js");

        let copied = sync_third_party(&dir.path().join("missing"), &dst, &rules()).unwrap();
        assert!(copied.is_empty());
        assert!(dst.join("keep.min.js").exists());
    }

    #[test]
    fn test_copy_optional_files_skips_missing() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/sbom.json");
        let names = vec!["sbom.json".to_string(), "missing.css".to_string()];

        let copied = copy_optional_files(&dir.path().join("src"), &dir.path().join("dist"), &names).unwrap();
        assert_eq!(copied, vec![dir.path().join("dist/sbom.json")]);
    }
}
