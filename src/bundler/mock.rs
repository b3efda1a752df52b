use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::bundler::{BundleJob, BundleKind, Bundler};
use crate::error::{ReleaseError, Result};

/// Mock bundler for testing without Node.js
///
/// Output content depends only on the entry file's bytes, so two builds of
/// the same sources always produce identical files.
#[derive(Debug, Default)]
pub struct MockBundler {
    fail_on: Option<BundleKind>,
    calls: Mutex<Vec<(BundleJob, std::path::PathBuf)>>,
}

impl MockBundler {
    /// Create a mock that succeeds on every job
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails jobs of the given kind
    pub fn failing_on(kind: BundleKind) -> Self {
        MockBundler {
            fail_on: Some(kind),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Jobs received so far, with the working directory of each
    pub fn calls(&self) -> Vec<(BundleJob, std::path::PathBuf)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Bundler for MockBundler {
    fn bundle(&self, job: &BundleJob, build_root: &Path) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((job.clone(), build_root.to_path_buf()));
        }

        if self.fail_on == Some(job.kind) {
            return Err(ReleaseError::Bundler {
                command: format!("mock {}", job.outfile),
                status: "exited with code 1".to_string(),
            });
        }

        let entry = build_root.join(&job.entry);
        let source = fs::read_to_string(&entry).map_err(|e| ReleaseError::file_op("read", &entry, e))?;
        let outfile = build_root.join(&job.outfile);

        match job.kind {
            BundleKind::Development => {
                let map = outfile.with_extension("js.map");
                fs::write(&outfile, format!("// bundle\n{}", source))?;
                fs::write(&map, format!("{{\"sources\":[\"{}\"]}}", job.entry))?;
            }
            BundleKind::Minified => {
                let minified: String = source.split_whitespace().collect();
                fs::write(&outfile, minified)?;
            }
        }

        Ok(())
    }
}
