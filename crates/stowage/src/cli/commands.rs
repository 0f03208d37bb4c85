//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stowage::Layout;

/// Stowage - raw access to a filesystem content store
#[derive(Parser, Debug)]
#[command(name = "stowage")]
#[command(about = "Raw access to a filesystem content store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Store root directory (overrides configuration)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Directory layout: flat or sharded (overrides configuration)
    #[arg(long, global = true)]
    pub layout: Option<Layout>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store content under a location, replacing what was there
    Put {
        /// Content location
        location: String,

        /// Read content from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Write the content at a location to stdout
    Get {
        /// Content location
        location: String,
    },

    /// Report whether content exists at a location
    Exists {
        /// Content location
        location: String,
    },

    /// Delete the content at a location
    Rm {
        /// Content location
        location: String,
    },

    /// Print a fresh, unused location
    Allocate,
}
