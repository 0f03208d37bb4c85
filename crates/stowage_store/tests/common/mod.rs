//! Entities shared by the store tests.

#![allow(dead_code)]

use std::io::Read;
use stowage_core::{ContentEntity, ContentProperties, ContentProperty, PropertyPath};

/// Entity with a primary content and a rendition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TEntity {
    pub id: u64,
    pub content_id: Option<String>,
    pub content_len: u64,
    pub rendition_id: Option<String>,
    pub rendition_len: u64,
}

impl ContentEntity for TEntity {
    fn content_properties() -> ContentProperties<Self> {
        ContentProperties::new()
            .with(ContentProperty::new(
                PropertyPath::default(),
                |e: &TEntity| e.content_id.clone(),
                |e: &mut TEntity, id| e.content_id = id,
                |e: &TEntity| e.content_len,
                |e: &mut TEntity, len| e.content_len = len,
            ))
            .with(ContentProperty::new(
                PropertyPath::from("rendition"),
                |e: &TEntity| e.rendition_id.clone(),
                |e: &mut TEntity, id| e.rendition_id = id,
                |e: &TEntity| e.rendition_len,
                |e: &mut TEntity, len| e.rendition_len = len,
            ))
    }
}

/// Entity whose content id is also its persistence identifier.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SharedIdEntity {
    pub content_id: Option<String>,
    pub content_len: u64,
}

impl ContentEntity for SharedIdEntity {
    fn content_properties() -> ContentProperties<Self> {
        ContentProperties::new().with(
            ContentProperty::new(
                PropertyPath::default(),
                |e: &SharedIdEntity| e.content_id.clone(),
                |e: &mut SharedIdEntity, id| e.content_id = id,
                |e: &SharedIdEntity| e.content_len,
                |e: &mut SharedIdEntity, len| e.content_len = len,
            )
            .with_shared_identifier(true),
        )
    }
}

/// Drain a content stream.
pub fn read_all(mut content: Box<dyn Read + Send>) -> Vec<u8> {
    let mut bytes = Vec::new();
    content.read_to_end(&mut bytes).unwrap();
    bytes
}
