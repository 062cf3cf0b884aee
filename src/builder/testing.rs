// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! Fixtures shared by the unit tests

use super::dimensions::Dimensions;
use crate::api::{ContentStore, DimensionProbe, FullTextIndex};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::repository::MetadataValue;
use crate::formats::{Bitstream, Bundle, Item, Metadata};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const CONFIG: &str = r#"
endpoint = "http://localhost/iiif"
image-server = "http://localhost:8182/iiif/2/"

[links]
ui = "http://localhost:4000"
content = "http://localhost/server/api/core/bitstreams"

[search]
url = "http://localhost:8983/solr/word_highlighting"
"#;

pub fn config() -> Config {
    CONFIG.parse().unwrap()
}

pub fn metadata(pairs: &[(&str, &str)]) -> Metadata {
    Metadata(
        pairs
            .iter()
            .map(|(field, value)| MetadataValue {
                field: field.to_string(),
                value: value.to_string(),
            })
            .collect(),
    )
}

pub fn file(id: &str, mime_type: &str, pairs: &[(&str, &str)]) -> Bitstream {
    Bitstream {
        id: id.into(),
        mime_type: mime_type.into(),
        format: None,
        size_bytes: 0,
        checksum: None,
        metadata: metadata(pairs),
    }
}

/// A JPEG page without any metadata
pub fn bitstream(id: &str) -> Bitstream {
    file(id, "image/jpeg", &[])
}

pub fn sized(id: &str, width: u32, height: u32) -> Bitstream {
    let (width, height) = (width.to_string(), height.to_string());
    file(
        id,
        "image/jpeg",
        &[("iiif.image.width", &width), ("iiif.image.height", &height)],
    )
}

pub fn bundle(name: &str, bitstreams: Vec<Bitstream>) -> Bundle {
    Bundle {
        name: name.into(),
        metadata: Metadata::default(),
        bitstreams,
    }
}

/// An enabled item titled "Public item 1"
pub fn item(id: &str, bundles: Vec<Bundle>) -> Item {
    Item {
        id: id.into(),
        metadata: metadata(&[
            ("dspace.iiif.enabled", "true"),
            ("dc.title", "Public item 1"),
        ]),
        bundles,
    }
}

/// Answers every probe the same way and counts the calls
pub struct CountingProbe {
    answer: Option<Dimensions>,
    calls: Cell<usize>,
}

impl CountingProbe {
    pub fn answering(answer: Option<Dimensions>) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DimensionProbe for CountingProbe {
    fn probe(&self, _: &Bitstream) -> Option<Dimensions> {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}

pub struct MemoryStore(HashMap<String, Item>);

impl MemoryStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self(items.into_iter().map(|i| (i.id.clone(), i)).collect())
    }
}

impl ContentStore for MemoryStore {
    fn item(&self, id: &str) -> Result<Item> {
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("item {}", id)))
    }
}

/// Replies with a fixed body, or fails when there is none
pub struct CannedIndex {
    body: Option<String>,
    pub params: RefCell<Vec<(String, String)>>,
}

impl CannedIndex {
    pub fn replying(body: Option<&str>) -> Self {
        Self {
            body: body.map(Into::into),
            params: RefCell::new(Vec::new()),
        }
    }
}

impl FullTextIndex for CannedIndex {
    fn select(&self, params: &[(&str, String)]) -> Result<String> {
        *self.params.borrow_mut() = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        self.body
            .clone()
            .ok_or_else(|| Error::Index("connection refused".into()))
    }
}
