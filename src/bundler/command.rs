use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::bundler::{BundleJob, BundleKind, Bundler};
use crate::config::BundlerConfig;
use crate::error::{ReleaseError, Result};
use crate::ui;

/// Runs an external bundler such as `npx -y esbuild`.
///
/// Standard output and error are inherited so the bundler's own diagnostics
/// reach the terminal unchanged.
#[derive(Debug, Clone)]
pub struct CommandBundler {
    program: String,
    leading_args: Vec<String>,
    format: String,
    target: String,
}

impl CommandBundler {
    /// Build a bundler from configuration.
    ///
    /// # Returns
    /// * `Err` - If the configured command is empty
    pub fn from_config(config: &BundlerConfig) -> Result<Self> {
        let (program, leading_args) = config
            .command
            .split_first()
            .ok_or_else(|| ReleaseError::config("bundler.command must not be empty"))?;

        Ok(CommandBundler {
            program: program.clone(),
            leading_args: leading_args.to_vec(),
            format: config.format.clone(),
            target: config.target.clone(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for `job`, excluding the program itself.
    pub fn args(&self, job: &BundleJob) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push(job.entry.clone());
        args.push("--bundle".to_string());
        args.push(format!("--format={}", self.format));
        args.push(format!("--target={}", self.target));

        match job.kind {
            BundleKind::Development => args.push("--sourcemap".to_string()),
            BundleKind::Minified => args.push("--minify".to_string()),
        }

        args.push(format!("--outfile={}", job.outfile));
        args
    }
}

impl Bundler for CommandBundler {
    fn bundle(&self, job: &BundleJob, build_root: &Path) -> Result<()> {
        let args = self.args(job);
        ui::display_command(&self.program, &args, build_root);
        let command_line = std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(build_root)
            .status()
            .map_err(|e| ReleaseError::Bundler {
                command: command_line.clone(),
                status: format!("could not be started: {}", e),
            })?;

        debug!(kind = %job.kind, ?status, "bundler finished");

        if !status.success() {
            return Err(ReleaseError::Bundler {
                command: command_line,
                status: describe_status(status),
            });
        }

        Ok(())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}
