//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the pitchcraft binary.

mod commands;
mod config;
mod generate;

pub use commands::{Cli, Commands, GenerateArgs, OutputFormat};
pub use config::show_config;
pub use generate::run_generate;
