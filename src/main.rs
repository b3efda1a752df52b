use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use uikit_devtools::bundler::CommandBundler;
use uikit_devtools::cli::orchestration::{ReleaseWorkflowArgs, run_release_workflow};
use uikit_devtools::{config, telemetry, ui, workspace};

#[derive(clap::Parser)]
#[command(
    name = "uikit-release",
    about = "Bundle the UI kit with esbuild and assemble a versioned dist/ directory"
)]
struct Args {
    #[arg(value_name = "VERSION", help = "Release version, e.g. 0.0.1")]
    release_version: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Project root holding src/ (defaults to the current directory)")]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing("warn")?;

    let project_root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    // Load configuration
    let config = match config::load_config(args.config.as_deref(), &project_root) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let Some(home_dir) = dirs::home_dir() else {
        ui::display_error("Cannot determine the home directory");
        std::process::exit(1);
    };

    let bundler = match CommandBundler::from_config(&config.bundler) {
        Ok(bundler) => bundler,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let rule = workspace::relocation_rule(&config.relocation);

    let workflow_args = ReleaseWorkflowArgs {
        version: args.release_version,
        project_root,
        home_dir,
    };

    match run_release_workflow(&workflow_args, &config, rule.as_ref(), &bundler) {
        Ok(result) => {
            ui::display_outputs(
                &config.package.dist_dir,
                &[result.dev_bundle.as_str(), result.min_bundle.as_str()],
            );
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
