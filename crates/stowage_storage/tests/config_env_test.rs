//! Tests for the environment layer of store configuration.
//!
//! Kept in its own test binary: the process environment is shared by every
//! test in a binary.

use stowage_storage::{Layout, StoreConfig};
use tempfile::TempDir;

#[test]
fn test_environment_overrides_bundled_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("from-env");

    // SAFETY: the only test in this binary, so no other thread reads the environment.
    unsafe {
        std::env::set_var("STOWAGE_FILESYSTEM__LAYOUT", "sharded");
        std::env::set_var("STOWAGE_FILESYSTEM__ROOT", &root);
        std::env::set_var("STOWAGE_FILESYSTEM__ALLOCATE_ATTEMPTS", "3");
    }

    let loaded = StoreConfig::load();

    unsafe {
        std::env::remove_var("STOWAGE_FILESYSTEM__LAYOUT");
        std::env::remove_var("STOWAGE_FILESYSTEM__ROOT");
        std::env::remove_var("STOWAGE_FILESYSTEM__ALLOCATE_ATTEMPTS");
    }

    let config = loaded.unwrap();
    assert_eq!(*config.filesystem().layout(), Layout::Sharded);
    assert_eq!(config.filesystem().root().as_deref(), Some(root.as_path()));
    assert_eq!(*config.filesystem().allocate_attempts(), 3);
}
