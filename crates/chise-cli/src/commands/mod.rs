//! CLI subcommand implementations.

pub mod contrast;
pub mod grid;
pub mod media;
pub mod menu;
pub mod scroll;
