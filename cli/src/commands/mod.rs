//! CLI subcommand implementations

pub mod dialects;
pub mod generate;
