//! Store bound to a single entity and property.

use crate::ContentStore;
use std::io::Read;
use stowage_core::PropertyPath;
use stowage_error::StowageResult;
use stowage_storage::PlacementService;

/// A [`ContentStore`] bound to one entity and property path.
///
/// Lets generic code (a download handler, an export job) fetch content
/// without knowing the entity type or where its content lives.
pub struct ContentInvoker<'a, E, P> {
    store: &'a ContentStore<E, P>,
    entity: &'a E,
    path: PropertyPath,
}

impl<'a, E, P: PlacementService> ContentInvoker<'a, E, P> {
    pub(crate) fn new(store: &'a ContentStore<E, P>, entity: &'a E, path: PropertyPath) -> Self {
        Self {
            store,
            entity,
            path,
        }
    }

    /// Type name of the bound entity.
    pub fn domain_type(&self) -> &'static str {
        self.store.resolver().entity_type()
    }

    /// Type of the content ids this store records.
    pub fn content_id_type(&self) -> &'static str {
        "String"
    }

    /// Bound property path.
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    /// Stream of the bound content, `None` if there is none.
    pub fn invoke_get_content(&self) -> StowageResult<Option<Box<dyn Read + Send>>> {
        self.store.get_content_at(self.entity, &self.path)
    }
}
