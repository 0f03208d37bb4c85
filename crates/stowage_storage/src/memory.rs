//! In-memory resource backend.

use crate::resource::unsupported;
use crate::{FileSystemConfig, PlacementService, Resource, ResourceWriter};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::sync::{Arc, RwLock};
use stowage_error::{StorageError, StorageErrorKind, StowageResult};
use uuid::Uuid;

type Blobs = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// Placement over a shared in-process map.
///
/// Clones share the same map. A read-only placement hands out resources
/// that refuse writes and deletes with `Unsupported`; content can still be
/// seeded through [`MemoryPlacement::insert`].
#[derive(Debug, Clone)]
pub struct MemoryPlacement {
    blobs: Blobs,
    read_only: bool,
    allocate_attempts: u32,
}

impl Default for MemoryPlacement {
    fn default() -> Self {
        Self {
            blobs: Blobs::default(),
            read_only: false,
            allocate_attempts: FileSystemConfig::DEFAULT_ALLOCATE_ATTEMPTS,
        }
    }
}

impl MemoryPlacement {
    /// Create an empty, writable placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty placement whose resources cannot be written or deleted.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Bound the fresh ids tried by `allocate`.
    pub fn with_allocate_attempts(mut self, attempts: u32) -> Self {
        self.allocate_attempts = attempts;
        self
    }

    /// Store `bytes` under `id` directly.
    pub fn insert(&self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> StowageResult<()> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs.insert(id.into(), bytes.into());
        Ok(())
    }

    /// Number of stored entries.
    pub fn len(&self) -> StowageResult<usize> {
        Ok(self.blobs.read().map_err(|_| poisoned())?.len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> StowageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl PlacementService for MemoryPlacement {
    type Resource = MemoryResource;

    fn resolve(&self, id: &str) -> StowageResult<MemoryResource> {
        if id.trim().is_empty() || id.contains('\0') {
            return Err(StorageError::new(StorageErrorKind::InvalidId(format!("'{}'", id))).into());
        }
        Ok(MemoryResource {
            location: id.to_string(),
            blobs: Arc::clone(&self.blobs),
            read_only: self.read_only,
        })
    }

    fn allocate(&self) -> StowageResult<(String, MemoryResource)> {
        for attempt in 1..=self.allocate_attempts {
            let id = Uuid::new_v4().to_string();
            let resource = self.resolve(&id)?;
            if !resource.exists() {
                return Ok((id, resource));
            }
            tracing::warn!(%id, attempt, "Allocated id already in use, retrying");
        }

        Err(StorageError::new(StorageErrorKind::Io(format!(
            "no unused id found after {} attempts",
            self.allocate_attempts
        )))
        .into())
    }

    fn id_for(&self, resource: &MemoryResource) -> StowageResult<String> {
        if !Arc::ptr_eq(&self.blobs, &resource.blobs) {
            return Err(StorageError::new(StorageErrorKind::InvalidId(format!(
                "'{}' (resource is outside this placement)",
                resource.location
            )))
            .into());
        }
        Ok(resource.location.clone())
    }
}

/// Entry in a [`MemoryPlacement`].
#[derive(Debug, Clone)]
pub struct MemoryResource {
    location: String,
    blobs: Blobs,
    read_only: bool,
}

impl Resource for MemoryResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        self.blobs
            .read()
            .map(|b| b.contains_key(&self.location))
            .unwrap_or(false)
    }

    fn content_length(&self) -> StowageResult<u64> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        blobs
            .get(&self.location)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| not_found(&self.location).into())
    }

    fn open_read(&self) -> StowageResult<Box<dyn Read + Send>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        let bytes = blobs
            .get(&self.location)
            .cloned()
            .ok_or_else(|| not_found(&self.location))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn is_writable(&self) -> bool {
        !self.read_only
    }

    fn open_write(&self) -> StowageResult<Box<dyn ResourceWriter>> {
        if self.read_only {
            return Err(unsupported("write", &self.location).into());
        }
        Ok(Box::new(MemoryWriter {
            buffer: Vec::new(),
            location: self.location.clone(),
            blobs: Arc::clone(&self.blobs),
        }))
    }

    fn is_deletable(&self) -> bool {
        !self.read_only
    }

    fn delete(&self) -> StowageResult<()> {
        if self.read_only {
            return Err(unsupported("delete", &self.location).into());
        }
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs
            .remove(&self.location)
            .map(|_| ())
            .ok_or_else(|| not_found(&self.location).into())
    }
}

struct MemoryWriter {
    buffer: Vec<u8>,
    location: String,
    blobs: Blobs,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl ResourceWriter for MemoryWriter {
    fn finish(self: Box<Self>) -> StowageResult<()> {
        let MemoryWriter {
            buffer,
            location,
            blobs,
        } = *self;
        let mut blobs = blobs.write().map_err(|_| poisoned())?;
        blobs.insert(location, buffer);
        Ok(())
    }
}

#[track_caller]
fn not_found(location: &str) -> StorageError {
    StorageError::new(StorageErrorKind::NotFound(location.to_string()))
}

#[track_caller]
fn poisoned() -> StorageError {
    StorageError::new(StorageErrorKind::Io("memory placement lock poisoned".to_string()))
}
