//! Filesystem-based resource backend.
//!
//! Content ids map to files under a root directory. Writes are staged in a
//! sibling temporary file and renamed over the target when finished, so a
//! failed write never leaves a half-written file at the content location.

use crate::{FileSystemConfig, Layout, PlacementService, Resource, ResourceWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use stowage_error::{StorageError, StorageErrorKind, StowageResult};
use uuid::Uuid;

/// Filesystem placement.
///
/// Maps ids to files under `root`:
///
/// ```text
/// Flat:     {root}/{id}
/// Sharded:  {root}/{id[0:2]}/{id[2:4]}/{id}
/// ```
///
/// Flat ids may be hierarchical (`"reports/2024/q1.pdf"`); sharded ids must
/// be a single segment starting with four alphanumeric or `-` characters,
/// which every allocated UUID satisfies.
#[derive(Debug, Clone)]
pub struct FileSystemPlacement {
    root: PathBuf,
    layout: Layout,
    allocate_attempts: u32,
}

impl FileSystemPlacement {
    /// Create a placement rooted at `root`.
    ///
    /// Creates the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(root), fields(root = %root.as_ref().display()))]
    pub fn new(root: impl AsRef<Path>, layout: Layout) -> StowageResult<Self> {
        let root = root.as_ref().to_path_buf();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), %layout, "Created filesystem placement");
        Ok(Self {
            root,
            layout,
            allocate_attempts: FileSystemConfig::DEFAULT_ALLOCATE_ATTEMPTS,
        })
    }

    /// Create a placement from configuration.
    pub fn from_config(config: &FileSystemConfig) -> StowageResult<Self> {
        let mut placement = Self::new(config.resolved_root(), *config.layout())?;
        placement.allocate_attempts = (*config.allocate_attempts()).max(1);
        Ok(placement)
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Filesystem path for `id`.
    ///
    /// # Errors
    ///
    /// `InvalidId` if `id` is not a safe relative path for the layout.
    pub fn path_for(&self, id: &str) -> StowageResult<PathBuf> {
        validate_id(id)?;

        match self.layout {
            Layout::Flat => Ok(id.split('/').fold(self.root.clone(), |p, s| p.join(s))),
            Layout::Sharded => {
                let shardable = !id.contains('/')
                    && id.len() >= 4
                    && id
                        .bytes()
                        .take(4)
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-');
                if !shardable {
                    return Err(invalid_id(id, "not shardable").into());
                }
                Ok(self.root.join(&id[0..2]).join(&id[2..4]).join(id))
            }
        }
    }
}

impl PlacementService for FileSystemPlacement {
    type Resource = FileSystemResource;

    fn resolve(&self, id: &str) -> StowageResult<FileSystemResource> {
        let path = self.path_for(id)?;
        Ok(FileSystemResource {
            location: id.to_string(),
            path,
        })
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn allocate(&self) -> StowageResult<(String, FileSystemResource)> {
        for attempt in 1..=self.allocate_attempts {
            let id = Uuid::new_v4().to_string();
            let resource = self.resolve(&id)?;
            if !resource.exists() {
                tracing::debug!(%id, attempt, "Allocated content id");
                return Ok((id, resource));
            }
            tracing::warn!(%id, attempt, "Allocated id already in use, retrying");
        }

        Err(StorageError::new(StorageErrorKind::Io(format!(
            "no unused id found under {} after {} attempts",
            self.root.display(),
            self.allocate_attempts
        )))
        .into())
    }

    fn id_for(&self, resource: &FileSystemResource) -> StowageResult<String> {
        let expected = self.path_for(resource.location())?;
        if expected != resource.path {
            return Err(invalid_id(resource.location(), "resource is outside this placement").into());
        }
        Ok(resource.location().to_string())
    }
}

/// File addressed by a content id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemResource {
    location: String,
    path: PathBuf,
}

impl FileSystemResource {
    /// Filesystem path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metadata of the content file; a directory at the path is `NotFound`.
    fn require_file(&self) -> StowageResult<std::fs::Metadata> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| StorageError::from_io(&self.location, &e))?;
        if !metadata.is_file() {
            return Err(StorageError::new(StorageErrorKind::NotFound(self.location.clone())).into());
        }
        Ok(metadata)
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }
}

impl Resource for FileSystemResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn content_length(&self) -> StowageResult<u64> {
        Ok(self.require_file()?.len())
    }

    #[tracing::instrument(skip(self), fields(location = %self.location))]
    fn open_read(&self) -> StowageResult<Box<dyn Read + Send>> {
        self.require_file()?;
        let file = File::open(&self.path).map_err(|e| StorageError::from_io(&self.location, &e))?;
        tracing::debug!(path = %self.path.display(), "Opened file for reading");
        Ok(Box::new(BufReader::new(file)))
    }

    fn is_writable(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self), fields(location = %self.location))]
    fn open_write(&self) -> StowageResult<Box<dyn ResourceWriter>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let staging = self.staging_path();
        let file = File::create(&staging).map_err(|e| {
            StorageError::new(StorageErrorKind::Io(format!("{}: {}", staging.display(), e)))
        })?;

        tracing::debug!(staging = %staging.display(), "Opened staged writer");
        Ok(Box::new(FileWriter {
            writer: Some(BufWriter::new(file)),
            staging,
            target: self.path.clone(),
            location: self.location.clone(),
        }))
    }

    fn is_deletable(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self), fields(location = %self.location))]
    fn delete(&self) -> StowageResult<()> {
        self.require_file()?;
        std::fs::remove_file(&self.path).map_err(|e| StorageError::from_io(&self.location, &e))?;
        tracing::info!(path = %self.path.display(), "Deleted content file");
        Ok(())
    }
}

/// Writer staging bytes next to the target file.
struct FileWriter {
    writer: Option<BufWriter<File>>,
    staging: PathBuf,
    target: PathBuf,
    location: String,
}

impl FileWriter {
    fn io_error(&self, e: std::io::Error) -> StorageError {
        StorageError::new(StorageErrorKind::Io(format!("{}: {}", self.location, e)))
    }

    fn writer(&mut self) -> std::io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| std::io::Error::other("writer already finished"))
    }
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer()?.flush()
    }
}

impl ResourceWriter for FileWriter {
    fn finish(mut self: Box<Self>) -> StowageResult<()> {
        let Some(writer) = self.writer.take() else {
            return Err(self.io_error(std::io::Error::other("writer already finished")).into());
        };

        let committed = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|file| file.sync_all())
            .and_then(|()| std::fs::rename(&self.staging, &self.target));

        if let Err(e) = committed {
            discard(&self.staging);
            return Err(self.io_error(e).into());
        }

        tracing::debug!(path = %self.target.display(), "Committed staged write");
        Ok(())
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            drop(writer);
            tracing::debug!(location = %self.location, "Aborted unfinished write");
            discard(&self.staging);
        }
    }
}

fn discard(staging: &Path) {
    if let Err(e) = std::fs::remove_file(staging) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }
    }
}

fn validate_id(id: &str) -> StowageResult<()> {
    if id.is_empty() {
        return Err(invalid_id(id, "empty").into());
    }
    if id.starts_with('/') || id.contains('\\') || id.contains('\0') {
        return Err(invalid_id(id, "not a relative path").into());
    }
    if id
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid_id(id, "bad path segment").into());
    }
    Ok(())
}

#[track_caller]
fn invalid_id(id: &str, reason: &str) -> StorageError {
    StorageError::new(StorageErrorKind::InvalidId(format!("'{}' ({})", id, reason)))
}
