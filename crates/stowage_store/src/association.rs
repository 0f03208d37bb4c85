//! Metadata-only links between entities and existing resources.

use std::sync::Arc;
use stowage_core::{PropertyPath, PropertyPathResolver};
use stowage_error::{StorageError, StorageErrorKind, StowageResult};
use stowage_storage::PlacementService;

/// Binds and unbinds content ids on entities.
///
/// Associating records an id; unassociating forgets it. Neither ever
/// creates, reads or deletes stored bytes, so callers that want the old
/// bytes gone must delete them themselves.
pub struct AssociationService<E> {
    resolver: Arc<PropertyPathResolver<E>>,
}

impl<E> AssociationService<E> {
    /// Create a service over a resolver.
    pub fn new(resolver: Arc<PropertyPathResolver<E>>) -> Self {
        Self { resolver }
    }

    /// Record `id` as the content at `path`, replacing any previous id.
    /// The content length is left as it was.
    ///
    /// # Errors
    ///
    /// Configuration errors for unresolvable paths, `InvalidId` for a blank id.
    #[tracing::instrument(skip(self, entity, id), fields(entity = self.resolver.entity_type(), path = %path))]
    pub fn associate(
        &self,
        entity: &mut E,
        path: &PropertyPath,
        id: impl Into<String>,
    ) -> StowageResult<()> {
        let property = self.resolver.resolve(path)?;
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidId(
                "cannot associate a blank id".to_string(),
            ))
            .into());
        }

        tracing::debug!(%id, "Associating content");
        property.set_content_id(entity, Some(id));
        Ok(())
    }

    /// Record `resource` as the content at `path`, deriving its id from the
    /// placement that produced it.
    pub fn associate_resource<P: PlacementService>(
        &self,
        placement: &P,
        entity: &mut E,
        path: &PropertyPath,
        resource: &P::Resource,
    ) -> StowageResult<()> {
        let id = placement.id_for(resource)?;
        self.associate(entity, path, id)
    }

    /// Forget the content at `path`: the id is cleared and the length reset
    /// to 0. Unassociating an empty path is a no-op.
    ///
    /// Exception: when the content id doubles as the entity's identifier the
    /// id is kept and only the length is reset, the same as
    /// [`ContentStore::unset_content_at`](crate::ContentStore::unset_content_at).
    /// Clearing it would detach the entity from its own identity, so for
    /// such properties the id is deliberately not cleared.
    #[tracing::instrument(skip(self, entity), fields(entity = self.resolver.entity_type(), path = %path))]
    pub fn unassociate(&self, entity: &mut E, path: &PropertyPath) -> StowageResult<()> {
        let property = self.resolver.resolve(path)?;

        if property.is_shared_identifier() {
            tracing::debug!("Content id is the entity identifier, resetting length only");
            property.set_content_length(entity, 0);
        } else {
            property.clear(entity);
        }
        Ok(())
    }
}

impl<E> Clone for AssociationService<E> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<E> std::fmt::Debug for AssociationService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssociationService")
            .field("entity", &self.resolver.entity_type())
            .finish()
    }
}
