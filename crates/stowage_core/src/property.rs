//! Content property declarations.

use crate::PropertyPath;

/// Reads the content id field.
pub type IdGetter<E> = fn(&E) -> Option<String>;
/// Writes the content id field.
pub type IdSetter<E> = fn(&mut E, Option<String>);
/// Reads the content length field.
pub type LengthGetter<E> = fn(&E) -> u64;
/// Writes the content length field.
pub type LengthSetter<E> = fn(&mut E, u64);

/// A (content id, content length) field pair bound to a property path.
///
/// Accessors are plain function pointers fixed at registration, so resolving
/// a property never inspects the entity at runtime. Mutations are applied
/// directly to the entity passed in.
///
/// # Examples
///
/// ```
/// use stowage_core::{ContentProperty, PropertyPath};
///
/// #[derive(Default)]
/// struct Photo {
///     thumb_id: Option<String>,
///     thumb_len: u64,
/// }
///
/// let property = ContentProperty::new(
///     PropertyPath::from("thumbnail"),
///     |p: &Photo| p.thumb_id.clone(),
///     |p: &mut Photo, id| p.thumb_id = id,
///     |p: &Photo| p.thumb_len,
///     |p: &mut Photo, len| p.thumb_len = len,
/// );
///
/// let mut photo = Photo::default();
/// property.set_content_id(&mut photo, Some("abc".to_string()));
/// assert_eq!(property.content_id(&photo).as_deref(), Some("abc"));
/// ```
pub struct ContentProperty<E> {
    path: PropertyPath,
    get_id: IdGetter<E>,
    set_id: IdSetter<E>,
    get_length: LengthGetter<E>,
    set_length: LengthSetter<E>,
    shared_identifier: bool,
}

impl<E> ContentProperty<E> {
    /// Bind a path to its accessor pair.
    pub fn new(
        path: PropertyPath,
        get_id: IdGetter<E>,
        set_id: IdSetter<E>,
        get_length: LengthGetter<E>,
        set_length: LengthSetter<E>,
    ) -> Self {
        Self {
            path,
            get_id,
            set_id,
            get_length,
            set_length,
            shared_identifier: false,
        }
    }

    /// Mark the content id field as also being the entity's persistence
    /// identifier. Unsetting such content keeps the id and only resets the
    /// length.
    pub fn with_shared_identifier(mut self, shared: bool) -> Self {
        self.shared_identifier = shared;
        self
    }

    /// Path this property is registered under.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Whether the content id doubles as the persistence identifier.
    pub fn is_shared_identifier(&self) -> bool {
        self.shared_identifier
    }

    /// Current content id, `None` when unset. Blank ids count as unset.
    pub fn content_id(&self, entity: &E) -> Option<String> {
        (self.get_id)(entity).filter(|id| !id.trim().is_empty())
    }

    /// Whether content is currently recorded for this property.
    pub fn has_content(&self, entity: &E) -> bool {
        self.content_id(entity).is_some()
    }

    /// Overwrite the content id field.
    pub fn set_content_id(&self, entity: &mut E, id: Option<String>) {
        (self.set_id)(entity, id)
    }

    /// Current content length.
    pub fn content_length(&self, entity: &E) -> u64 {
        (self.get_length)(entity)
    }

    /// Overwrite the content length field.
    pub fn set_content_length(&self, entity: &mut E, length: u64) {
        (self.set_length)(entity, length)
    }

    /// Clear both fields, leaving the property empty.
    pub fn clear(&self, entity: &mut E) {
        self.set_content_id(entity, None);
        self.set_content_length(entity, 0);
    }
}

impl<E> std::fmt::Debug for ContentProperty<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProperty")
            .field("path", &self.path)
            .field("shared_identifier", &self.shared_identifier)
            .finish_non_exhaustive()
    }
}

/// Every content property declared by one entity type.
pub struct ContentProperties<E> {
    properties: Vec<ContentProperty<E>>,
}

impl<E> ContentProperties<E> {
    /// Start an empty declaration.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Add a property.
    pub fn with(mut self, property: ContentProperty<E>) -> Self {
        self.properties.push(property);
        self
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether nothing was declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<ContentProperty<E>> {
        self.properties
    }
}

impl<E> Default for ContentProperties<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ContentProperties<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.properties.iter()).finish()
    }
}

/// An entity type that carries content properties.
///
/// Implementations declare their properties once; stores index the
/// declaration when they are constructed.
pub trait ContentEntity: Sized {
    /// Declare the content properties of this type.
    fn content_properties() -> ContentProperties<Self>;
}
