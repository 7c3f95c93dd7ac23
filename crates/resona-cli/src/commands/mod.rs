//! CLI command implementations.

pub mod analyze;
pub mod batch;
pub mod common;
pub mod presets;
pub mod simulate;
pub mod step;
pub mod sweep;
