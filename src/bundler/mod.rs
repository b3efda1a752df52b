//! Bundler abstraction layer
//!
//! The release workflow never talks to a JavaScript bundler directly. It hands
//! a [BundleJob] to a [Bundler], which is either:
//!
//! - [command::CommandBundler]: runs the configured external command (esbuild)
//! - [mock::MockBundler]: writes deterministic outputs for tests

pub mod command;
pub mod mock;

pub use command::CommandBundler;
pub use mock::MockBundler;

use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Which of the two release bundles a job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// Unminified output with a source map next to it
    Development,
    Minified,
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::Development => f.write_str("development"),
            BundleKind::Minified => f.write_str("minified"),
        }
    }
}

/// One bundler run. Paths are relative to the build root and written the way
/// they are passed on the command line (`./src/...`, `./dist/...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleJob {
    pub kind: BundleKind,
    pub entry: String,
    pub outfile: String,
}

/// Common bundler trait for abstraction
///
/// Implementations must block until the output file is written and report any
/// failure as an error; the caller never retries.
pub trait Bundler: Send + Sync {
    /// Run `job` with `build_root` as the working directory.
    fn bundle(&self, job: &BundleJob, build_root: &Path) -> Result<()>;
}
