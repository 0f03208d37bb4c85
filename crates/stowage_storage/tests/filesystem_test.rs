//! Tests for the filesystem backend.

use std::io::{Read, Write};
use stowage_storage::{FileSystemPlacement, Layout, PlacementService, Resource, StorageErrorKind};
use tempfile::TempDir;

fn write(resource: &impl Resource, bytes: &[u8]) {
    let mut writer = resource.open_write().unwrap();
    writer.write_all(bytes).unwrap();
    writer.finish().unwrap();
}

fn read(resource: &impl Resource) -> Vec<u8> {
    let mut bytes = Vec::new();
    resource
        .open_read()
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

#[test]
fn test_resolved_resource_does_not_exist() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();

    let resource = placement.resolve("abcde").unwrap();
    assert!(!resource.exists());
    assert_eq!(resource.location(), "abcde");
    assert!(resource.is_writable());
    assert!(resource.is_deletable());
}

#[test]
fn test_write_then_read() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("abcde").unwrap();

    write(&resource, b"Hello Spring Content World!");

    assert!(resource.exists());
    assert_eq!(resource.content_length().unwrap(), 27);
    assert_eq!(read(&resource), b"Hello Spring Content World!");
    assert!(temp_dir.path().join("abcde").is_file());
}

#[test]
fn test_update_replaces_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("abcde").unwrap();

    write(&resource, b"Hello Updated Spring Content World!");
    write(&resource, b"Hello Spring World!");

    assert_eq!(read(&resource), b"Hello Spring World!");
    assert_eq!(resource.content_length().unwrap(), 19);
}

#[test]
fn test_dropped_writer_leaves_previous_content() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("kept").unwrap();

    write(&resource, b"original");

    {
        let mut writer = resource.open_write().unwrap();
        writer.write_all(b"partial replacement").unwrap();
        // dropped without finish
    }

    assert_eq!(read(&resource), b"original");

    // No staging files left behind
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_delete() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("doomed").unwrap();

    write(&resource, b"Delete me");
    resource.delete().unwrap();

    assert!(!resource.exists());
    let err = resource.delete().unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_read_missing_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("nothing-here").unwrap();

    assert!(resource.open_read().err().unwrap().is_not_found());
    assert!(resource.content_length().unwrap_err().is_not_found());
}

#[test]
fn test_hierarchical_ids_create_directories() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("reports/2024/q1.txt").unwrap();

    write(&resource, b"quarterly");

    assert!(temp_dir.path().join("reports").join("2024").join("q1.txt").is_file());
}

#[test]
fn test_invalid_ids_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();

    for id in ["", "/etc/passwd", "../escape", "a//b", "a/./b", "a\\b", "a\0b"] {
        let err = placement.resolve(id).unwrap_err();
        assert!(
            matches!(err.storage_kind(), Some(StorageErrorKind::InvalidId(_))),
            "expected InvalidId for {:?}",
            id
        );
    }
}

#[test]
fn test_sharded_layout() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Sharded).unwrap();

    let (id, resource) = placement.allocate().unwrap();
    write(&resource, b"sharded");

    let expected = temp_dir.path().join(&id[0..2]).join(&id[2..4]).join(&id);
    assert_eq!(resource.path(), expected);
    assert!(expected.is_file());

    assert!(placement.resolve("ab").is_err());
    assert!(placement.resolve("ab/cdef").is_err());
}

#[test]
fn test_allocate_returns_fresh_ids() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();

    let (first, resource) = placement.allocate().unwrap();
    write(&resource, b"taken");
    let (second, fresh) = placement.allocate().unwrap();

    assert_ne!(first, second);
    assert!(!fresh.exists());
}

#[test]
fn test_id_for_inverts_resolve() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    let resource = placement.resolve("loc123").unwrap();

    assert_eq!(placement.id_for(&resource).unwrap(), "loc123");

    let other_dir = TempDir::new().unwrap();
    let other = FileSystemPlacement::new(other_dir.path(), Layout::Flat).unwrap();
    let foreign = other.resolve("loc123").unwrap();
    assert!(placement.id_for(&foreign).is_err());
}

#[test]
fn test_directory_location_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let placement = FileSystemPlacement::new(temp_dir.path(), Layout::Flat).unwrap();
    write(&placement.resolve("reports/q1").unwrap(), b"figures");

    let parent = placement.resolve("reports").unwrap();

    assert!(!parent.exists());
    assert!(parent.open_read().err().unwrap().is_not_found());
    assert!(parent.content_length().unwrap_err().is_not_found());
    assert!(parent.delete().unwrap_err().is_not_found());
    assert!(temp_dir.path().join("reports").join("q1").is_file());
}
