//! Command-line workflows shared by the binaries.

pub mod orchestration;
