//! Entity content store and association service for Stowage.
//!
//! [`ContentStore`] keeps an entity's content id and content length fields in
//! step with the bytes a [`PlacementService`](stowage_storage::PlacementService)
//! stores for it. [`AssociationService`] links existing resources to an
//! entity without touching their bytes.
//!
//! # Example
//!
//! ```rust
//! use stowage_core::{ContentEntity, ContentProperties, ContentProperty, PropertyPath};
//! use stowage_storage::MemoryPlacement;
//! use stowage_store::ContentStore;
//! use std::io::Read;
//!
//! #[derive(Default)]
//! struct Invoice {
//!     content_id: Option<String>,
//!     content_len: u64,
//! }
//!
//! impl ContentEntity for Invoice {
//!     fn content_properties() -> ContentProperties<Self> {
//!         ContentProperties::new().with(ContentProperty::new(
//!             PropertyPath::default(),
//!             |i: &Invoice| i.content_id.clone(),
//!             |i: &mut Invoice, id| i.content_id = id,
//!             |i: &Invoice| i.content_len,
//!             |i: &mut Invoice, len| i.content_len = len,
//!         ))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ContentStore::<Invoice, _>::new(MemoryPlacement::new());
//! let mut invoice = Invoice::default();
//!
//! store.set_content(&mut invoice, &b"%PDF-1.7"[..])?;
//! assert_eq!(invoice.content_len, 8);
//!
//! let mut bytes = Vec::new();
//! if let Some(mut content) = store.get_content(&invoice)? {
//!     content.read_to_end(&mut bytes)?;
//! }
//! assert_eq!(bytes, b"%PDF-1.7");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod association;
mod invoker;
mod store;

pub use association::AssociationService;
pub use invoker::ContentInvoker;
pub use store::ContentStore;
