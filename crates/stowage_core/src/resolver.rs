//! Property path resolution.

use crate::{ContentEntity, ContentProperties, ContentProperty, PropertyPath};
use std::collections::HashMap;
use stowage_error::{PropertyError, PropertyErrorKind, StowageResult};

/// Resolves property paths to bound accessor pairs for one entity type.
///
/// The declaration is indexed once at construction; entity schemas are
/// static, so the index is kept for the resolver's lifetime. Duplicate
/// registrations for a path are kept and reported as ambiguous when that
/// path is resolved.
///
/// # Examples
///
/// ```
/// use stowage_core::{ContentEntity, ContentProperties, ContentProperty, PropertyPath, PropertyPathResolver};
///
/// #[derive(Default)]
/// struct Note {
///     content_id: Option<String>,
///     content_len: u64,
/// }
///
/// impl ContentEntity for Note {
///     fn content_properties() -> ContentProperties<Self> {
///         ContentProperties::new().with(ContentProperty::new(
///             PropertyPath::default(),
///             |n: &Note| n.content_id.clone(),
///             |n: &mut Note, id| n.content_id = id,
///             |n: &Note| n.content_len,
///             |n: &mut Note, len| n.content_len = len,
///         ))
///     }
/// }
///
/// let resolver = PropertyPathResolver::<Note>::new();
/// assert!(resolver.resolve(&PropertyPath::default()).is_ok());
/// assert!(resolver.resolve(&PropertyPath::from("missing")).is_err());
/// ```
pub struct PropertyPathResolver<E> {
    entity: &'static str,
    properties: Vec<ContentProperty<E>>,
    index: HashMap<PropertyPath, Vec<usize>>,
}

impl<E: ContentEntity> PropertyPathResolver<E> {
    /// Index the properties declared by `E`.
    pub fn new() -> Self {
        Self::from_properties(E::content_properties())
    }
}

impl<E: ContentEntity> Default for PropertyPathResolver<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> PropertyPathResolver<E> {
    /// Index an explicit declaration.
    #[tracing::instrument(skip(properties), fields(entity = std::any::type_name::<E>(), count = properties.len()))]
    pub fn from_properties(properties: ContentProperties<E>) -> Self {
        let properties = properties.into_vec();
        let mut index: HashMap<PropertyPath, Vec<usize>> = HashMap::new();
        for (position, property) in properties.iter().enumerate() {
            index
                .entry(property.path().clone())
                .or_default()
                .push(position);
        }

        tracing::debug!(paths = index.len(), "Indexed content properties");

        Self {
            entity: std::any::type_name::<E>(),
            properties,
            index,
        }
    }

    /// Find the accessor pair registered for `path`.
    ///
    /// # Errors
    ///
    /// `Unresolved` if nothing is registered for the path, `Ambiguous` if
    /// more than one property claims it.
    pub fn resolve(&self, path: &PropertyPath) -> StowageResult<&ContentProperty<E>> {
        match self.index.get(path).map(Vec::as_slice) {
            Some([position]) => Ok(&self.properties[*position]),
            Some(candidates) if candidates.len() > 1 => {
                tracing::error!(entity = self.entity, path = %path, candidates = candidates.len(), "Ambiguous content property");
                Err(PropertyError::new(PropertyErrorKind::Ambiguous {
                    entity: self.entity.to_string(),
                    path: path.name().to_string(),
                    candidates: candidates.len(),
                })
                .into())
            }
            _ => {
                tracing::error!(entity = self.entity, path = %path, "Unresolved content property");
                Err(PropertyError::new(PropertyErrorKind::Unresolved {
                    entity: self.entity.to_string(),
                    path: path.name().to_string(),
                })
                .into())
            }
        }
    }

    /// Name of the entity type this resolver serves.
    pub fn entity_type(&self) -> &'static str {
        self.entity
    }

    /// Every registered path, in declaration order, without duplicates.
    pub fn paths(&self) -> Vec<&PropertyPath> {
        let mut paths: Vec<&PropertyPath> = Vec::with_capacity(self.index.len());
        for property in &self.properties {
            if !paths.contains(&property.path()) {
                paths.push(property.path());
            }
        }
        paths
    }
}

impl<E> std::fmt::Debug for PropertyPathResolver<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyPathResolver")
            .field("entity", &self.entity)
            .field("properties", &self.properties)
            .finish()
    }
}
