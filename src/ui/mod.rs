//! User interface module for the release tool.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Grouped reporting used by the release workflow

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_error, display_outputs, display_warning, format_command,
    format_outputs,
};

use crate::boundary::ReleaseWarning;

/// Prints every warning, in order.
pub fn display_warnings(warnings: &[ReleaseWarning]) {
    for warning in warnings {
        display_warning(warning);
    }
}
