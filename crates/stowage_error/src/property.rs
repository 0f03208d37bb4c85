//! Content property resolution errors.
//!
//! These are configuration errors: an entity type either declares a usable
//! content property for a path or it does not, so they are never retried.

/// Kinds of property path resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PropertyErrorKind {
    /// No content property is registered for the path
    #[display("No content property '{}' on {}", path, entity)]
    Unresolved {
        /// Entity type name
        entity: String,
        /// Requested property path
        path: String,
    },
    /// More than one content property claims the path
    #[display("Ambiguous content property '{}' on {}: {} candidates", path, entity, candidates)]
    Ambiguous {
        /// Entity type name
        entity: String,
        /// Requested property path
        path: String,
        /// Number of registrations matching the path
        candidates: usize,
    },
}

/// Property resolution error with location tracking.
///
/// # Examples
///
/// ```
/// use stowage_error::{PropertyError, PropertyErrorKind};
///
/// let err = PropertyError::new(PropertyErrorKind::Unresolved {
///     entity: "Document".to_string(),
///     path: "thumbnail".to_string(),
/// });
/// assert!(format!("{}", err).contains("thumbnail"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Property Error: {} at line {} in {}", kind, line, file)]
pub struct PropertyError {
    /// The kind of error that occurred
    pub kind: PropertyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PropertyError {
    /// Create a new property error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PropertyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
