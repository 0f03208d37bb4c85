//! Tests for stores bound to a single entity.

mod common;

use common::TEntity;
use stowage_core::PropertyPath;
use stowage_storage::MemoryPlacement;
use stowage_store::ContentStore;

#[test]
fn test_invoker_reads_bound_content() {
    let store: ContentStore<TEntity, _> = ContentStore::new(MemoryPlacement::new());
    let rendition = PropertyPath::from("rendition");
    let mut entity = TEntity::default();
    store
        .set_content_at(&mut entity, &rendition, &b"rendered"[..])
        .unwrap();

    let invoker = store.invoker(&entity, rendition.clone());

    assert!(invoker.domain_type().ends_with("TEntity"));
    assert_eq!(invoker.content_id_type(), "String");
    assert_eq!(invoker.path(), &rendition);

    let content = common::read_all(invoker.invoke_get_content().unwrap().unwrap());
    assert_eq!(content, b"rendered");
}

#[test]
fn test_invoker_without_content() {
    let store: ContentStore<TEntity, _> = ContentStore::new(MemoryPlacement::new());
    let entity = TEntity::default();

    let invoker = store.invoker(&entity, PropertyPath::default());
    assert!(invoker.invoke_get_content().unwrap().is_none());
}
