//! Placement contract.

use crate::Resource;
use stowage_error::StowageResult;

/// Maps content ids to resources.
///
/// Resolving is a pure function of the id and never allocates, so updating
/// content reuses the location it was first written to. Allocation is only
/// used for content stored for the first time.
pub trait PlacementService: Send + Sync {
    /// Resource handle produced by this backend.
    type Resource: Resource;

    /// Handle on the location of `id`. The location need not exist.
    ///
    /// # Errors
    ///
    /// `InvalidId` if `id` is malformed for this backend.
    fn resolve(&self, id: &str) -> StowageResult<Self::Resource>;

    /// Fresh, currently unused id and the handle on its location.
    fn allocate(&self) -> StowageResult<(String, Self::Resource)>;

    /// Inverse of [`PlacementService::resolve`]: the id addressing `resource`.
    ///
    /// # Errors
    ///
    /// `InvalidId` if the resource does not belong to this placement.
    fn id_for(&self, resource: &Self::Resource) -> StowageResult<String>;
}
