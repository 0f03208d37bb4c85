//! Stowage CLI binary.
//!
//! Inspects and edits raw content in a filesystem store:
//! - Store a file or stdin under a location
//! - Stream a location to stdout
//! - Check for, delete and allocate locations

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, handle_command};

    // Pick up RUST_LOG and STOWAGE_* from a local .env, if any
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so `get` output stays clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    handle_command(cli)?;

    Ok(())
}
