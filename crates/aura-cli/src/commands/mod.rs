//! CLI subcommands.

pub mod common;
pub mod impulse;
pub mod params;
pub mod presets;
pub mod process;
