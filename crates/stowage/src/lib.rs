//! Stowage - content attached to domain entities
//!
//! Stowage stores arbitrary binary content (documents, images, renditions) on
//! behalf of your own entity types. An entity only records an opaque content id
//! and a length per content property; the bytes live in a pluggable backend.
//!
//! # Quick Start
//!
//! ```
//! use stowage::{
//!     ContentEntity, ContentProperties, ContentProperty, ContentStore, MemoryPlacement,
//!     PropertyPath,
//! };
//! use std::io::Read;
//!
//! #[derive(Default)]
//! struct Photo {
//!     image_id: Option<String>,
//!     image_len: u64,
//! }
//!
//! impl ContentEntity for Photo {
//!     fn content_properties() -> ContentProperties<Self> {
//!         ContentProperties::new().with(ContentProperty::new(
//!             PropertyPath::default(),
//!             |p: &Photo| p.image_id.clone(),
//!             |p: &mut Photo, id| p.image_id = id,
//!             |p: &Photo| p.image_len,
//!             |p: &mut Photo, len| p.image_len = len,
//!         ))
//!     }
//! }
//!
//! # fn main() -> stowage::StowageResult<()> {
//! let store: ContentStore<Photo, _> = ContentStore::new(MemoryPlacement::new());
//! let mut photo = Photo::default();
//!
//! store.set_content(&mut photo, &b"\x89PNG"[..])?;
//! assert_eq!(photo.image_len, 4);
//!
//! let mut bytes = Vec::new();
//! if let Some(mut stream) = store.get_content(&photo)? {
//!     stream.read_to_end(&mut bytes).map_err(|e| stowage::StorageError::from_io("photo", &e))?;
//! }
//! assert_eq!(bytes, b"\x89PNG");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `stowage_error` - Error types
//! - `stowage_core` - Property paths, accessors and the property path resolver
//! - `stowage_storage` - Resources, placement services, filesystem and memory backends
//! - `stowage_store` - Content store and association service
//!
//! This crate (`stowage`) re-exports everything for convenience and ships the
//! `stowage` command-line tool.

#![forbid(unsafe_code)]

pub use stowage_core::*;
pub use stowage_error::*;
pub use stowage_storage::*;
pub use stowage_store::*;
