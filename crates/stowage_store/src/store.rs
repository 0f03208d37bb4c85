//! Content store façade.

use crate::{AssociationService, ContentInvoker};
use std::io::Read;
use std::sync::Arc;
use stowage_core::{ContentEntity, PropertyPath, PropertyPathResolver};
use stowage_error::{StorageError, StorageErrorKind, StowageResult};
use stowage_storage::{PlacementService, Resource};

/// Reads, writes and removes the content of entities of type `E`.
///
/// Each content property moves between two states: empty (no content id)
/// and present (content id set, length equal to the bytes last written).
/// Entity fields are only mutated after the backend operation succeeded,
/// so a failed write never makes an entity claim content it does not have.
///
/// The store never persists entities; callers save them after a mutation.
///
/// # Concurrency
///
/// Operations run on the caller's thread and perform blocking I/O. Calls
/// for different entities may run concurrently. Writers to the same entity
/// and path must be serialized by the caller (typically by the surrounding
/// persistence transaction); racing writers get whatever the backend does
/// with concurrent writes to one location.
pub struct ContentStore<E, P> {
    placement: P,
    resolver: Arc<PropertyPathResolver<E>>,
    associations: AssociationService<E>,
}

impl<E: ContentEntity, P: PlacementService> ContentStore<E, P> {
    /// Create a store for the properties `E` declares.
    pub fn new(placement: P) -> Self {
        Self::with_resolver(placement, PropertyPathResolver::new())
    }
}

impl<E, P: PlacementService> ContentStore<E, P> {
    /// Create a store over an explicit resolver.
    pub fn with_resolver(placement: P, resolver: PropertyPathResolver<E>) -> Self {
        let resolver = Arc::new(resolver);
        tracing::debug!(entity = resolver.entity_type(), "Creating content store");
        Self {
            placement,
            associations: AssociationService::new(Arc::clone(&resolver)),
            resolver,
        }
    }

    /// Placement backing this store.
    pub fn placement(&self) -> &P {
        &self.placement
    }

    /// Resolver indexing the entity's content properties.
    pub fn resolver(&self) -> &PropertyPathResolver<E> {
        &self.resolver
    }

    /// Association service sharing this store's resolver.
    pub fn associations(&self) -> &AssociationService<E> {
        &self.associations
    }

    /// Resource at the location of `id`, whether or not content exists there.
    ///
    /// # Errors
    ///
    /// `InvalidId` if the backend rejects `id`.
    pub fn get_resource(&self, id: &str) -> StowageResult<P::Resource> {
        self.placement.resolve(id)
    }

    /// Resource holding the entity's primary content, `None` if it has none.
    pub fn get_entity_resource(&self, entity: &E) -> StowageResult<Option<P::Resource>> {
        self.get_entity_resource_at(entity, &PropertyPath::default())
    }

    /// Resource holding the content at `path`, `None` if it has none.
    pub fn get_entity_resource_at(
        &self,
        entity: &E,
        path: &PropertyPath,
    ) -> StowageResult<Option<P::Resource>> {
        let property = self.resolver.resolve(path)?;
        property
            .content_id(entity)
            .map(|id| self.placement.resolve(&id))
            .transpose()
    }

    /// Content id recorded at `path`.
    pub fn content_id(&self, entity: &E, path: &PropertyPath) -> StowageResult<Option<String>> {
        Ok(self.resolver.resolve(path)?.content_id(entity))
    }

    /// Content length recorded at `path`.
    pub fn content_length(&self, entity: &E, path: &PropertyPath) -> StowageResult<u64> {
        Ok(self.resolver.resolve(path)?.content_length(entity))
    }

    /// Stream of the entity's primary content, `None` if it has none.
    pub fn get_content(&self, entity: &E) -> StowageResult<Option<Box<dyn Read + Send>>> {
        self.get_content_at(entity, &PropertyPath::default())
    }

    /// Stream of the content at `path`, `None` if it has none.
    ///
    /// The stream holds backend handles until dropped.
    ///
    /// # Errors
    ///
    /// `NotFound` if an id is recorded but nothing is stored at its location.
    #[tracing::instrument(skip(self, entity), fields(entity = self.resolver.entity_type(), path = %path))]
    pub fn get_content_at(
        &self,
        entity: &E,
        path: &PropertyPath,
    ) -> StowageResult<Option<Box<dyn Read + Send>>> {
        match self.get_entity_resource_at(entity, path)? {
            Some(resource) => {
                tracing::debug!(location = resource.location(), "Opening content");
                resource.open_read().map(Some)
            }
            None => {
                tracing::debug!("No content recorded");
                Ok(None)
            }
        }
    }

    /// Replace the entity's primary content with everything `content` yields.
    pub fn set_content<'a, R: Read>(
        &self,
        entity: &'a mut E,
        content: R,
    ) -> StowageResult<&'a mut E> {
        self.set_content_at(entity, &PropertyPath::default(), content)
    }

    /// Replace the content at `path` with everything `content` yields.
    ///
    /// Empty properties get a freshly allocated id; present ones are
    /// overwritten in place, old bytes fully replaced. The content length
    /// becomes the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Configuration errors for unresolvable paths, `Unsupported` for
    /// read-only resources, `Io` if the copy fails. On error the entity is
    /// left untouched.
    #[tracing::instrument(skip(self, entity, content), fields(entity = self.resolver.entity_type(), path = %path))]
    pub fn set_content_at<'a, R: Read>(
        &self,
        entity: &'a mut E,
        path: &PropertyPath,
        mut content: R,
    ) -> StowageResult<&'a mut E> {
        let property = self.resolver.resolve(path)?;

        let (id, resource, allocated) = match property.content_id(entity) {
            Some(id) => {
                tracing::debug!(%id, "Overwriting existing content");
                let resource = self.placement.resolve(&id)?;
                (id, resource, false)
            }
            None => {
                let (id, resource) = self.placement.allocate()?;
                tracing::debug!(%id, "Allocated location for new content");
                (id, resource, true)
            }
        };

        let mut writer = resource.open_write()?;
        let written = std::io::copy(&mut content, &mut writer).map_err(|e| {
            tracing::warn!(%id, error = %e, "Content copy failed");
            StorageError::new(StorageErrorKind::Io(format!("{}: {}", id, e)))
        })?;
        writer.finish()?;

        if allocated {
            property.set_content_id(entity, Some(id.clone()));
        }
        property.set_content_length(entity, written);

        tracing::info!(%id, bytes = written, "Stored content");
        Ok(entity)
    }

    /// Remove the entity's primary content.
    pub fn unset_content<'a>(&self, entity: &'a mut E) -> StowageResult<&'a mut E> {
        self.unset_content_at(entity, &PropertyPath::default())
    }

    /// Remove the content at `path`: delete the stored bytes, then clear the
    /// id and reset the length to 0. Unsetting an empty path is a no-op.
    ///
    /// Bytes that are already gone are not an error. When the content id
    /// doubles as the entity's identifier it is kept, leaving a reference to
    /// deleted bytes, and only the length is reset.
    #[tracing::instrument(skip(self, entity), fields(entity = self.resolver.entity_type(), path = %path))]
    pub fn unset_content_at<'a>(
        &self,
        entity: &'a mut E,
        path: &PropertyPath,
    ) -> StowageResult<&'a mut E> {
        let property = self.resolver.resolve(path)?;

        let Some(id) = property.content_id(entity) else {
            tracing::debug!("No content recorded, nothing to unset");
            return Ok(entity);
        };

        let resource = self.placement.resolve(&id)?;
        match resource.delete() {
            Ok(()) => tracing::info!(%id, "Deleted content"),
            Err(e) if e.is_not_found() => {
                tracing::debug!(%id, "Content already gone");
            }
            Err(e) => return Err(e),
        }

        self.associations.unassociate(entity, path)?;
        Ok(entity)
    }

    /// Record `id` as the entity's primary content.
    pub fn associate(&self, entity: &mut E, id: impl Into<String>) -> StowageResult<()> {
        self.associations
            .associate(entity, &PropertyPath::default(), id)
    }

    /// Record `id` as the content at `path`.
    pub fn associate_at(
        &self,
        entity: &mut E,
        path: &PropertyPath,
        id: impl Into<String>,
    ) -> StowageResult<()> {
        self.associations.associate(entity, path, id)
    }

    /// Record `resource` as the content at `path`.
    pub fn associate_resource(
        &self,
        entity: &mut E,
        path: &PropertyPath,
        resource: &P::Resource,
    ) -> StowageResult<()> {
        self.associations
            .associate_resource(&self.placement, entity, path, resource)
    }

    /// Forget the entity's primary content without deleting its bytes.
    pub fn unassociate(&self, entity: &mut E) -> StowageResult<()> {
        self.associations
            .unassociate(entity, &PropertyPath::default())
    }

    /// Forget the content at `path` without deleting its bytes.
    pub fn unassociate_at(&self, entity: &mut E, path: &PropertyPath) -> StowageResult<()> {
        self.associations.unassociate(entity, path)
    }

    /// Bind this store to one entity and path.
    pub fn invoker<'a>(&'a self, entity: &'a E, path: PropertyPath) -> ContentInvoker<'a, E, P> {
        ContentInvoker::new(self, entity, path)
    }
}

impl<E, P: std::fmt::Debug> std::fmt::Debug for ContentStore<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("entity", &self.resolver.entity_type())
            .field("placement", &self.placement)
            .finish()
    }
}
