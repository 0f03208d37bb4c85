//! Resource contract.

use std::io::{Read, Write};
use stowage_error::{StorageError, StorageErrorKind, StowageResult};

/// Handle on the bytes stored at one location.
///
/// Handles are cheap and created per access; existence is always asked of
/// the backend, never cached. Reading is mandatory, writing and deleting are
/// capabilities a backend may decline with `Unsupported`.
pub trait Resource: Send + Sync + std::fmt::Debug {
    /// Backend location this handle addresses.
    fn location(&self) -> &str;

    /// Whether bytes are currently stored at the location.
    fn exists(&self) -> bool;

    /// Number of stored bytes.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored at the location.
    fn content_length(&self) -> StowageResult<u64>;

    /// Open the stored bytes for reading.
    ///
    /// The stream holds backend handles until it is dropped.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored at the location.
    fn open_read(&self) -> StowageResult<Box<dyn Read + Send>>;

    /// Whether [`Resource::open_write`] is supported.
    fn is_writable(&self) -> bool {
        false
    }

    /// Open a writer that replaces the stored bytes once finished.
    ///
    /// # Errors
    ///
    /// `Unsupported` on read-only resources.
    fn open_write(&self) -> StowageResult<Box<dyn ResourceWriter>> {
        Err(unsupported("write", self.location()).into())
    }

    /// Whether [`Resource::delete`] is supported.
    fn is_deletable(&self) -> bool {
        false
    }

    /// Remove the stored bytes. Afterwards [`Resource::exists`] is false.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored, `Unsupported` on resources that
    /// cannot be deleted.
    fn delete(&self) -> StowageResult<()> {
        Err(unsupported("delete", self.location()).into())
    }
}

/// Staged write into a [`Resource`].
///
/// Bytes written are committed by [`ResourceWriter::finish`], replacing
/// whatever was stored before. Dropping the writer without finishing aborts
/// the write and releases its handles; the previously stored bytes are left
/// as the backend had them.
pub trait ResourceWriter: Write + Send {
    /// Commit the staged bytes.
    fn finish(self: Box<Self>) -> StowageResult<()>;
}

#[track_caller]
pub(crate) fn unsupported(operation: &str, location: &str) -> StorageError {
    StorageError::new(StorageErrorKind::Unsupported(format!(
        "{} on {}",
        operation, location
    )))
}
