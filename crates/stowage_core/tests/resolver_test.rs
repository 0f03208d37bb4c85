//! Tests for property path resolution.

use stowage_core::{
    ContentEntity, ContentProperties, ContentProperty, PropertyPath, PropertyPathResolver,
};
use stowage_error::{PropertyErrorKind, StowageErrorKind};

#[derive(Debug, Default)]
struct Document {
    content_id: Option<String>,
    content_len: u64,
    rendition_id: Option<String>,
    rendition_len: u64,
}

impl ContentEntity for Document {
    fn content_properties() -> ContentProperties<Self> {
        ContentProperties::new()
            .with(ContentProperty::new(
                PropertyPath::default(),
                |d: &Document| d.content_id.clone(),
                |d: &mut Document, id| d.content_id = id,
                |d: &Document| d.content_len,
                |d: &mut Document, len| d.content_len = len,
            ))
            .with(ContentProperty::new(
                PropertyPath::from("rendition"),
                |d: &Document| d.rendition_id.clone(),
                |d: &mut Document, id| d.rendition_id = id,
                |d: &Document| d.rendition_len,
                |d: &mut Document, len| d.rendition_len = len,
            ))
    }
}

/// Declares two unnamed properties, so the default path is ambiguous.
#[derive(Debug, Default)]
struct TwoDefaults {
    first: Option<String>,
    second: Option<String>,
}

impl ContentEntity for TwoDefaults {
    fn content_properties() -> ContentProperties<Self> {
        ContentProperties::new()
            .with(ContentProperty::new(
                PropertyPath::from(""),
                |e: &TwoDefaults| e.first.clone(),
                |e: &mut TwoDefaults, id| e.first = id,
                |_: &TwoDefaults| 0,
                |_: &mut TwoDefaults, _| {},
            ))
            .with(ContentProperty::new(
                PropertyPath::from(" "),
                |e: &TwoDefaults| e.second.clone(),
                |e: &mut TwoDefaults, id| e.second = id,
                |_: &TwoDefaults| 0,
                |_: &mut TwoDefaults, _| {},
            ))
    }
}

#[test]
fn test_resolves_default_and_named_paths() {
    let resolver = PropertyPathResolver::<Document>::new();

    let default = resolver.resolve(&PropertyPath::default()).unwrap();
    assert!(default.path().is_default());

    let rendition = resolver.resolve(&PropertyPath::from("rendition")).unwrap();
    assert_eq!(rendition.path().name(), "rendition");

    assert_eq!(resolver.paths().len(), 2);
}

#[test]
fn test_accessors_mutate_the_given_entity() {
    let resolver = PropertyPathResolver::<Document>::new();
    let rendition = resolver.resolve(&PropertyPath::from("rendition")).unwrap();

    let mut doc = Document::default();
    rendition.set_content_id(&mut doc, Some("loc123".to_string()));
    rendition.set_content_length(&mut doc, 42);

    assert_eq!(doc.rendition_id.as_deref(), Some("loc123"));
    assert_eq!(doc.rendition_len, 42);
    assert_eq!(doc.content_id, None);
    assert_eq!(doc.content_len, 0);

    rendition.clear(&mut doc);
    assert_eq!(doc.rendition_id, None);
    assert_eq!(doc.rendition_len, 0);
}

#[test]
fn test_blank_content_id_counts_as_unset() {
    let resolver = PropertyPathResolver::<Document>::new();
    let default = resolver.resolve(&PropertyPath::default()).unwrap();

    let doc = Document {
        content_id: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(default.content_id(&doc), None);
    assert!(!default.has_content(&doc));
}

#[test]
fn test_unknown_path_is_unresolved() {
    let resolver = PropertyPathResolver::<Document>::new();
    let err = resolver
        .resolve(&PropertyPath::from("thumbnail"))
        .unwrap_err();

    assert!(err.is_configuration());
    match err.kind() {
        StowageErrorKind::Property(e) => {
            assert!(matches!(e.kind, PropertyErrorKind::Unresolved { ref path, .. } if path == "thumbnail"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_duplicate_default_path_is_ambiguous() {
    let resolver = PropertyPathResolver::<TwoDefaults>::new();
    let err = resolver.resolve(&PropertyPath::default()).unwrap_err();

    match err.kind() {
        StowageErrorKind::Property(e) => {
            assert!(matches!(e.kind, PropertyErrorKind::Ambiguous { candidates: 2, .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_shared_identifier_flag() {
    let property = ContentProperty::new(
        PropertyPath::default(),
        |d: &Document| d.content_id.clone(),
        |d: &mut Document, id| d.content_id = id,
        |d: &Document| d.content_len,
        |d: &mut Document, len| d.content_len = len,
    );
    assert!(!property.is_shared_identifier());
    assert!(property.with_shared_identifier(true).is_shared_identifier());
}
