//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// No content is stored at the location
    #[display("Content not found: {}", _0)]
    NotFound(String),
    /// Identifier is malformed for the backend
    #[display("Invalid content id: {}", _0)]
    InvalidId(String),
    /// The resource does not provide the requested capability
    #[display("Unsupported operation: {}", _0)]
    Unsupported(String),
    /// Transport or backend failure while moving bytes
    #[display("I/O failure: {}", _0)]
    Io(String),
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use stowage_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("ab/cd".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Classify an I/O error raised while accessing `location`.
    ///
    /// `NotFound` is preserved so callers can treat missing content
    /// separately from transport failures.
    #[track_caller]
    pub fn from_io(location: &str, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::new(StorageErrorKind::NotFound(location.to_string()))
        } else {
            Self::new(StorageErrorKind::Io(format!("{}: {}", location, err)))
        }
    }
}
