//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the stowage binary.

mod commands;
mod resource;

pub use commands::Cli;
pub use resource::handle_command;
