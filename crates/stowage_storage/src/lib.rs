//! Resource and placement backends for the Stowage content store.
//!
//! A [`Resource`] is a handle on the bytes stored at one location. A
//! [`PlacementService`] turns an opaque content id into a resource, and
//! allocates fresh ids for content stored for the first time. Backends
//! implement both; everything above this crate is backend-agnostic.
//!
//! # Backends
//!
//! - [`FileSystemPlacement`]: files under a root directory, flat or sharded
//! - [`MemoryPlacement`]: a shared in-process map, optionally read-only
//!
//! # Example
//!
//! ```rust
//! use std::io::{Read, Write};
//! use stowage_storage::{FileSystemPlacement, Layout, PlacementService, Resource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = std::env::temp_dir().join("stowage-doc");
//! let placement = FileSystemPlacement::new(&root, Layout::Flat)?;
//!
//! let (id, resource) = placement.allocate()?;
//! let mut writer = resource.open_write()?;
//! writer.write_all(b"hello")?;
//! writer.finish()?;
//!
//! let mut text = String::new();
//! placement.resolve(&id)?.open_read()?.read_to_string(&mut text)?;
//! assert_eq!(text, "hello");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod filesystem;
mod memory;
mod placement;
mod resource;

pub use config::{FileSystemConfig, FileSystemConfigBuilder, Layout, StoreConfig};
pub use filesystem::{FileSystemPlacement, FileSystemResource};
pub use memory::{MemoryPlacement, MemoryResource};
pub use placement::PlacementService;
pub use resource::{Resource, ResourceWriter};
pub use stowage_error::{StorageError, StorageErrorKind};
