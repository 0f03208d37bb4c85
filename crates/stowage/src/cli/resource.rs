//! Raw resource command handlers.

use super::commands::{Cli, Commands};
use std::io::{Read, Write};
use std::path::Path;
use stowage::{
    FileSystemPlacement, Layout, PlacementService, Resource, StorageError, StoreConfig,
    StowageResult,
};

/// Handle a parsed command line.
pub fn handle_command(cli: Cli) -> StowageResult<()> {
    let placement = open_placement(cli.root.as_deref(), cli.layout)?;

    match cli.command {
        Commands::Put { location, file } => {
            let written = match file {
                Some(path) => {
                    let input = std::fs::File::open(&path).map_err(|e| {
                        StorageError::from_io(&path.display().to_string(), &e)
                    })?;
                    put(&placement, &location, input)?
                }
                None => put(&placement, &location, std::io::stdin().lock())?,
            };
            println!("{} ({} bytes)", location, written);
        }

        Commands::Get { location } => {
            let mut stdout = std::io::stdout().lock();
            get(&placement, &location, &mut stdout)?;
            stdout
                .flush()
                .map_err(|e| StorageError::from_io(&location, &e))?;
        }

        Commands::Exists { location } => {
            println!("{}", exists(&placement, &location)?);
        }

        Commands::Rm { location } => {
            remove(&placement, &location)?;
        }

        Commands::Allocate => {
            println!("{}", allocate(&placement)?);
        }
    }

    Ok(())
}

/// Filesystem placement from layered configuration, with command-line overrides.
fn open_placement(root: Option<&Path>, layout: Option<Layout>) -> StowageResult<FileSystemPlacement> {
    let mut filesystem = StoreConfig::load()?.filesystem().clone();

    if let Some(root) = root {
        filesystem = filesystem.with_root(Some(root.to_path_buf()));
    }
    if let Some(layout) = layout {
        filesystem = filesystem.with_layout(layout);
    }

    tracing::debug!(root = %filesystem.resolved_root().display(), layout = %filesystem.layout(), "Opening store");
    FileSystemPlacement::from_config(&filesystem)
}

/// Replace the content at `location` with `input`, returning the bytes written.
#[tracing::instrument(skip(placement, input))]
fn put<P: PlacementService>(
    placement: &P,
    location: &str,
    mut input: impl Read,
) -> StowageResult<u64> {
    let resource = placement.resolve(location)?;
    let mut writer = resource.open_write()?;

    let written = std::io::copy(&mut input, &mut writer)
        .map_err(|e| StorageError::from_io(location, &e))?;
    writer.finish()?;

    tracing::info!(written, "Stored content");
    Ok(written)
}

/// Copy the content at `location` into `out`, returning the bytes copied.
#[tracing::instrument(skip(placement, out))]
fn get<P: PlacementService>(
    placement: &P,
    location: &str,
    out: &mut impl Write,
) -> StowageResult<u64> {
    let mut reader = placement.resolve(location)?.open_read()?;
    let copied =
        std::io::copy(&mut reader, out).map_err(|e| StorageError::from_io(location, &e))?;

    tracing::debug!(copied, "Streamed content");
    Ok(copied)
}

fn exists<P: PlacementService>(placement: &P, location: &str) -> StowageResult<bool> {
    Ok(placement.resolve(location)?.exists())
}

#[tracing::instrument(skip(placement))]
fn remove<P: PlacementService>(placement: &P, location: &str) -> StowageResult<()> {
    placement.resolve(location)?.delete()?;
    tracing::info!("Deleted content");
    Ok(())
}

fn allocate<P: PlacementService>(placement: &P) -> StowageResult<String> {
    let (id, _) = placement.allocate()?;
    Ok(id)
}
