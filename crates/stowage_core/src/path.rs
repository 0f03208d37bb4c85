//! Property path names.

use serde::{Deserialize, Serialize};

/// Name of a content property on an entity.
///
/// The empty name is the default path and addresses the entity's primary
/// content. Names are trimmed; dotted names such as `"pages.cover"` are kept
/// verbatim.
///
/// # Examples
///
/// ```
/// use stowage_core::PropertyPath;
///
/// assert!(PropertyPath::from("  ").is_default());
/// assert_eq!(PropertyPath::from(" rendition ").name(), "rendition");
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(from = "String", into = "String")]
#[display("{}", _0)]
pub struct PropertyPath(String);

impl PropertyPath {
    /// Create a path from a property name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    /// The property name, empty for the default path.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is the default (unnamed) path.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PropertyPath {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PropertyPath {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.0
    }
}
