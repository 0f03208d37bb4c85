//! Tests for the in-memory backend.

use std::io::{Read, Write};
use stowage_storage::{MemoryPlacement, PlacementService, Resource, StorageErrorKind};

#[test]
fn test_write_read_delete() {
    let placement = MemoryPlacement::new();
    let (id, resource) = placement.allocate().unwrap();
    assert!(!resource.exists());

    let mut writer = resource.open_write().unwrap();
    writer.write_all(b"in memory").unwrap();
    writer.finish().unwrap();

    let again = placement.resolve(&id).unwrap();
    let mut text = String::new();
    again.open_read().unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, "in memory");
    assert_eq!(again.content_length().unwrap(), 9);

    again.delete().unwrap();
    assert!(!resource.exists());
    assert!(placement.is_empty().unwrap());
}

#[test]
fn test_unfinished_write_is_discarded() {
    let placement = MemoryPlacement::new();
    let resource = placement.resolve("draft").unwrap();

    let mut writer = resource.open_write().unwrap();
    writer.write_all(b"never committed").unwrap();
    drop(writer);

    assert!(!resource.exists());
}

#[test]
fn test_read_only_refuses_writes_and_deletes() {
    let placement = MemoryPlacement::read_only();
    placement.insert("seeded", b"fixed".to_vec()).unwrap();
    let resource = placement.resolve("seeded").unwrap();

    assert!(!resource.is_writable());
    assert!(!resource.is_deletable());

    let err = resource.open_write().err().unwrap();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::Unsupported(_))));

    let err = resource.delete().unwrap_err();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::Unsupported(_))));

    assert!(resource.exists());
}

#[test]
fn test_missing_entry_is_not_found() {
    let placement = MemoryPlacement::new();
    let resource = placement.resolve("ghost").unwrap();

    assert!(resource.open_read().err().unwrap().is_not_found());
    assert!(resource.delete().unwrap_err().is_not_found());
}

#[test]
fn test_blank_id_is_invalid() {
    let placement = MemoryPlacement::new();
    let err = placement.resolve("  ").unwrap_err();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::InvalidId(_))));
}

#[test]
fn test_id_for_rejects_foreign_resources() {
    let placement = MemoryPlacement::new();
    let other = MemoryPlacement::new();

    let own = placement.resolve("x").unwrap();
    let foreign = other.resolve("x").unwrap();

    assert_eq!(placement.id_for(&own).unwrap(), "x");
    assert!(placement.id_for(&foreign).is_err());
    assert_eq!(placement.clone().id_for(&own).unwrap(), "x");
}

#[test]
fn test_allocate_gives_up_after_bounded_attempts() {
    let placement = MemoryPlacement::new().with_allocate_attempts(0);

    let err = placement.allocate().err().unwrap();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::Io(_))));

    let (id, _) = placement.with_allocate_attempts(1).allocate().unwrap();
    assert!(!id.is_empty());
}

#[test]
fn test_len_counts_committed_entries() {
    let placement = MemoryPlacement::new();
    placement.insert("a", b"1".to_vec()).unwrap();
    placement.insert("b", b"2".to_vec()).unwrap();

    assert_eq!(placement.len().unwrap(), 2);
    assert!(!placement.is_empty().unwrap());
}
