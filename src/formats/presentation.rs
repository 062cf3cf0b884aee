// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::annotation::Annotation;

use serde::Serialize;

pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";
pub const IMAGE_CONTEXT: &str = "http://iiif.io/api/image/2/context.json";
pub const SEARCH_CONTEXT: &str = "http://iiif.io/api/search/0/context.json";
pub const SEARCH_PROFILE: &str = "http://iiif.io/api/search/0/search";

/// The JSON-LD `@type` of a presentation resource
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Type {
    #[serde(rename = "sc:Manifest")]
    Manifest,

    #[serde(rename = "sc:Sequence")]
    Sequence,

    #[serde(rename = "sc:Canvas")]
    Canvas,

    #[serde(rename = "sc:Range")]
    Range,

    #[serde(rename = "sc:AnnotationList")]
    AnnotationList,

    #[serde(rename = "oa:Annotation")]
    Annotation,

    #[serde(rename = "dctypes:Image")]
    Image,

    #[serde(rename = "cnt:ContentAsText")]
    ContentAsText,
}

/// A metadata value: a single string, or a list when a field repeats
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    One(String),
    Many(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: Value,
}

impl MetadataEntry {
    /// Merges `values` into one entry; no entry at all when there are none
    pub fn new(label: &str, mut values: Vec<String>) -> Option<Self> {
        let value = match values.len() {
            0 => return None,
            1 => Value::One(values.remove(0)),
            _ => Value::Many(values),
        };

        Some(Self {
            label: label.into(),
            value,
        })
    }
}

/// Advertises dynamic resizing of an image through an image service
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageService {
    #[serde(rename = "@context")]
    pub context: &'static str,

    #[serde(rename = "@id")]
    pub id: String,

    pub profile: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageContent {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ImageService>,
}

/// A plain link to an external resource
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchService {
    #[serde(rename = "@context")]
    pub context: &'static str,

    #[serde(rename = "@id")]
    pub id: String,

    pub profile: &'static str,
}

/// A reference to an annotation list that is dereferenced separately
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListReference {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Canvas {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub label: String,

    pub width: u32,

    pub height: u32,

    pub images: Vec<Annotation>,

    pub thumbnail: ImageContent,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sequence {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub canvases: Vec<Canvas>,
}

/// A table-of-contents node; children and canvases are referenced by id
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Range {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub label: String,

    #[serde(rename = "viewingHint", skip_serializing_if = "Option::is_none")]
    pub viewing_hint: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub canvases: Vec<String>,
}

impl Range {
    pub fn new(id: String, label: &str) -> Self {
        Self {
            id,
            kind: Type::Range,
            label: label.into(),
            viewing_hint: None,
            ranges: Vec::new(),
            canvases: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.canvases.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Manifest {
    #[serde(rename = "@context")]
    pub context: &'static str,

    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub label: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<ExternalLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<SearchService>,

    #[serde(rename = "viewingHint", skip_serializing_if = "Option::is_none")]
    pub viewing_hint: Option<String>,

    pub sequences: Vec<Sequence>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub structures: Vec<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendering: Option<ExternalLink>,

    #[serde(rename = "seeAlso", skip_serializing_if = "Option::is_none")]
    pub see_also: Option<ListReference>,
}

impl Manifest {
    pub fn new(id: String, label: String) -> Self {
        Self {
            context: PRESENTATION_CONTEXT,
            id,
            kind: Type::Manifest,
            label,
            metadata: Vec::new(),
            description: None,
            license: None,
            logo: None,
            thumbnail: None,
            related: None,
            service: None,
            viewing_hint: None,
            sequences: Vec::new(),
            structures: Vec::new(),
            rendering: None,
            see_also: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn metadata_value_shape_follows_count() {
        assert_eq!(MetadataEntry::new("Title", vec![]), None);

        let one = MetadataEntry::new("Title", vec!["A".into()]).unwrap();
        assert_eq!(serde_json::to_value(&one).unwrap(), json!({"label": "Title", "value": "A"}));

        let many = MetadataEntry::new("Authors", vec!["A".into(), "B".into()]).unwrap();
        assert_eq!(
            serde_json::to_value(&many).unwrap(),
            json!({"label": "Authors", "value": ["A", "B"]})
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let manifest = Manifest::new("http://x/1/manifest".into(), "Item".into());
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["@context"], PRESENTATION_CONTEXT);
        assert_eq!(value["@type"], "sc:Manifest");
        assert_eq!(value["sequences"], json!([]));
        assert!(value.get("structures").is_none());
        assert!(value.get("metadata").is_none());
        assert!(value.get("seeAlso").is_none());
        assert!(value.get("service").is_none());
    }

    #[test]
    fn range_references_children_by_id() {
        let mut range = Range::new("r0".into(), "Table of Contents");
        assert!(range.is_empty());

        range.ranges.push("r0-0".into());
        let value = serde_json::to_value(&range).unwrap();
        assert_eq!(value["@type"], "sc:Range");
        assert_eq!(value["ranges"], json!(["r0-0"]));
        assert!(value.get("canvases").is_none());
        assert!(value.get("viewingHint").is_none());
    }
}
