//! Top-level error wrapper types.

use crate::{ConfigError, PropertyError, StorageError, StorageErrorKind};

/// Every failure a Stowage operation can surface.
///
/// # Examples
///
/// ```
/// use stowage_error::{ConfigError, StowageError};
///
/// let err: StowageError = ConfigError::new("bad layout").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StowageErrorKind {
    /// Configuration loading error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content property resolution error
    #[from(PropertyError)]
    Property(PropertyError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Stowage error with kind discrimination.
///
/// # Examples
///
/// ```
/// use stowage_error::{StowageResult, StorageError, StorageErrorKind};
///
/// fn write() -> StowageResult<()> {
///     Err(StorageError::new(StorageErrorKind::Unsupported("write".to_string())))?
/// }
///
/// assert!(!write().unwrap_err().is_not_found());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Stowage Error: {}", _0)]
pub struct StowageError(Box<StowageErrorKind>);

impl StowageError {
    /// Create a new error from a kind.
    pub fn new(kind: StowageErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StowageErrorKind {
        &self.0
    }

    /// Storage error kind, if this is a storage failure.
    pub fn storage_kind(&self) -> Option<&StorageErrorKind> {
        match self.kind() {
            StowageErrorKind::Storage(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// True when the addressed content does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.storage_kind(), Some(StorageErrorKind::NotFound(_)))
    }

    /// True for setup failures that retrying cannot fix.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.kind(),
            StowageErrorKind::Config(_) | StowageErrorKind::Property(_)
        )
    }
}

// Generic From implementation for any type that converts to StowageErrorKind
impl<T> From<T> for StowageError
where
    T: Into<StowageErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Stowage operations.
pub type StowageResult<T> = std::result::Result<T, StowageError>;
