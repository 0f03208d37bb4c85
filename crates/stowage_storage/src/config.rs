//! Store configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from stowage.toml)
//! - User overrides (~/.config/stowage/stowage.toml, then ./stowage.toml)
//! - Environment variables prefixed `STOWAGE_` (`__` separates sections)
//!
//! Later sources take precedence.

use derive_getters::Getters;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stowage_error::{ConfigError, StowageResult};
use tracing::{debug, instrument};

/// How content files are laid out under the filesystem root.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// `{root}/{id}`
    #[default]
    #[display("flat")]
    Flat,
    /// `{root}/{id[0:2]}/{id[2:4]}/{id}`
    #[display("sharded")]
    Sharded,
}

/// Filesystem backend settings.
///
/// ```toml
/// [filesystem]
/// root = "/var/lib/stowage"
/// layout = "sharded"
/// allocate_attempts = 8
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct FileSystemConfig {
    /// Root directory, the platform data directory when unset
    #[serde(default)]
    #[builder(default)]
    root: Option<PathBuf>,

    /// Directory layout
    #[serde(default)]
    #[builder(default)]
    layout: Layout,

    /// Fresh ids tried before allocation gives up
    #[serde(default = "default_allocate_attempts")]
    #[builder(default = "default_allocate_attempts()")]
    allocate_attempts: u32,
}

fn default_allocate_attempts() -> u32 {
    FileSystemConfig::DEFAULT_ALLOCATE_ATTEMPTS
}

impl FileSystemConfig {
    /// Allocation attempts when none are configured.
    pub const DEFAULT_ALLOCATE_ATTEMPTS: u32 = 8;

    /// Start a builder.
    pub fn builder() -> FileSystemConfigBuilder {
        FileSystemConfigBuilder::default()
    }

    /// The configured root, or `{data_dir}/stowage`, or `{temp_dir}/stowage`.
    pub fn resolved_root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("stowage")
        })
    }
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            root: None,
            layout: Layout::default(),
            allocate_attempts: default_allocate_attempts(),
        }
    }
}

/// Top-level Stowage configuration.
///
/// # Example
///
/// ```no_run
/// use stowage_storage::{FileSystemPlacement, StoreConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoreConfig::load()?;
/// let placement = FileSystemPlacement::from_config(config.filesystem())?;
/// println!("Storing content under {}", placement.root().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct StoreConfig {
    /// Filesystem backend settings
    #[serde(default)]
    filesystem: FileSystemConfig,
}

impl StoreConfig {
    /// Wrap filesystem settings.
    pub fn new(filesystem: FileSystemConfig) -> Self {
        Self { filesystem }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StowageResult<Self> {
        debug!("Loading configuration from file");
        let origin = path.as_ref().display().to_string();

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| ConfigError::new(format!("unreadable: {}", e)).with_origin(&origin))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid settings: {}", e)).with_origin(origin).into())
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> StowageResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../stowage.toml");
        const LAYERED: &str = "layered configuration";

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/stowage/stowage.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("stowage").required(false))
            .add_source(
                Environment::with_prefix("STOWAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("unreadable: {}", e)).with_origin(LAYERED))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid settings: {}", e)).with_origin(LAYERED).into())
    }
}
