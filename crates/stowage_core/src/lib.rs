//! Content property paths and resolution for the Stowage content store.
//!
//! An entity declares its content properties once, through [`ContentEntity`].
//! Each property is a (content id, content length) field pair bound to a
//! [`PropertyPath`]; the default path denotes the entity's primary content.
//! [`PropertyPathResolver`] indexes the declaration and hands out the bound
//! accessor pair for a path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod path;
mod property;
mod resolver;

pub use path::PropertyPath;
pub use property::{ContentEntity, ContentProperties, ContentProperty};
pub use resolver::PropertyPathResolver;
