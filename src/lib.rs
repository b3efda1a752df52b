pub mod artifacts;
pub mod boundary;
pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;
pub mod ui;
pub mod version;
pub mod workspace;

pub use error::{ReleaseError, Result};
