use std::fmt;
use std::path::PathBuf;

/// Warnings that occur while preparing a release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// The version argument contained characters that were removed
    VersionCharactersDropped { original: String, sanitized: String },
    /// The version is usable in file names but is not a semantic version
    NonSemverVersion { version: String },
    /// The project root is not a safe build location, so a copy is built instead
    RelocatedBuild {
        project_root: PathBuf,
        workspace: PathBuf,
    },
    /// The development bundle was built without a source map next to it
    SourceMapMissing { expected: PathBuf },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::VersionCharactersDropped {
                original,
                sanitized,
            } => {
                write!(
                    f,
                    "Version '{}' contained unsupported characters, using '{}'",
                    original.escape_debug(),
                    sanitized
                )
            }
            ReleaseWarning::NonSemverVersion { version } => {
                write!(f, "Version '{}' is not a semantic version", version)
            }
            ReleaseWarning::RelocatedBuild {
                project_root,
                workspace,
            } => {
                write!(
                    f,
                    "Project at '{}' is on restricted storage, building in '{}'",
                    project_root.display(),
                    workspace.display()
                )
            }
            ReleaseWarning::SourceMapMissing { expected } => {
                write!(f, "Source map not produced: {}", expected.display())
            }
        }
    }
}
