//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the release tool.
//! Message bodies are built by the `format_*` helpers so they can be tested
//! without capturing stdout.

use std::path::Path;

use console::style;

use crate::boundary::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Echo a command line before it is run.
pub fn display_command(program: &str, args: &[String], cwd: &Path) {
    println!("{}", format_command(program, args, cwd));
}

/// Display the final list of produced bundles.
///
/// # Arguments
/// * `dist_dir` - Name of the distribution directory as shown to the user
/// * `outputs` - File names inside the distribution directory
pub fn display_outputs(dist_dir: &str, outputs: &[&str]) {
    println!("\n{}", style("Done:").bold());
    for line in format_outputs(dist_dir, outputs) {
        println!("{}", line);
    }
}

/// Renders `$ program args...  (cwd=dir)`.
pub fn format_command(program: &str, args: &[String], cwd: &Path) -> String {
    let mut line = format!("$ {}", program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    format!("{}  (cwd={})", line, cwd.display())
}

/// Renders one ` - <dist>/<file>` line per output.
pub fn format_outputs(dist_dir: &str, outputs: &[&str]) -> Vec<String> {
    outputs
        .iter()
        .map(|name| format!(" - {}/{}", dist_dir, name))
        .collect()
}
