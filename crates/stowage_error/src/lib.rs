//! Error types for the Stowage content store.
//!
//! This crate provides the error types shared by every Stowage crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use stowage_error::{StowageResult, StorageError, StorageErrorKind};
//!
//! fn open(location: &str) -> StowageResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound(location.to_string())))?
//! }
//!
//! let err = open("a/b").unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod property;
mod storage;

pub use config::ConfigError;
pub use error::{StowageError, StowageErrorKind, StowageResult};
pub use property::{PropertyError, PropertyErrorKind};
pub use storage::{StorageError, StorageErrorKind};
