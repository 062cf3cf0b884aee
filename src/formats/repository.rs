// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! Items, bundles and bitstreams as handed over by the content store

use crate::error::{Error, Result};

use std::fmt::Display;
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

/// Well-known metadata fields consulted while assembling documents
pub mod fields {
    pub const IIIF_ENABLED: &str = "dspace.iiif.enabled";
    pub const SEARCH_ENABLED: &str = "iiif.search.enabled";
    pub const CANVAS_NAMING: &str = "iiif.canvas.naming";
    pub const VIEWING_HINT: &str = "iiif.viewing.hint";
    pub const ENABLED: &str = "iiif.enabled";
    pub const LABEL: &str = "iiif.label";
    pub const TOC: &str = "iiif.toc";
    pub const WIDTH: &str = "iiif.image.width";
    pub const HEIGHT: &str = "iiif.image.height";
    pub const ANNOTATIONS: &str = "iiif.image.annotations";
    pub const TITLE: &str = "dc.title";
}

/// A metadata field name (format: schema.element[.qualifier])
///
/// A qualifier of `*` matches any qualifier, including none at all.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldName {
    pub schema: String,
    pub element: String,
    pub qualifier: Option<String>,
}

impl FromStr for FieldName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        const RE: &str = r"^([A-Za-z0-9_]+)\.([A-Za-z0-9_-]+)(?:\.([A-Za-z0-9_*-]+))?$";

        let re = Regex::new(RE).map_err(|e| Error::Config(e.to_string()))?;
        let caps = re
            .captures(s)
            .ok_or_else(|| Error::Config(format!("invalid metadata field: {:?}", s)))?;

        Ok(Self {
            schema: caps[1].to_string(),
            element: caps[2].to_string(),
            qualifier: caps.get(3).map(|m| m.as_str().into()),
        })
    }
}

impl TryFrom<String> for FieldName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.element)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{}", qualifier)?;
        }

        Ok(())
    }
}

impl FieldName {
    pub fn matches(&self, field: &str) -> bool {
        let mut parts = field.splitn(3, '.');
        if parts.next() != Some(self.schema.as_str()) || parts.next() != Some(self.element.as_str()) {
            return false;
        }

        match (self.qualifier.as_deref(), parts.next()) {
            (Some("*"), _) => true,
            (lhs, rhs) => lhs == rhs,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MetadataValue {
    pub field: String,
    pub value: String,
}

/// An ordered list of metadata values; a field may repeat
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub Vec<MetadataValue>);

impl Metadata {
    /// All values of the fields matching `name`, in stored order
    pub fn values<'a>(&'a self, name: &'a FieldName) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |m| name.matches(&m.field))
            .map(|m| m.value.as_str())
    }

    /// All values of exactly `field`, in stored order
    pub fn all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |m| m.field == field)
            .map(|m| m.value.as_str())
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.value.as_str())
    }

    /// Interprets the first value of `field` as a yes/no switch
    pub fn flag(&self, field: &str) -> Option<bool> {
        let value = self.first(field)?.trim();
        if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") || value.eq_ignore_ascii_case("no") {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Checksum {
    pub value: String,
    pub algorithm: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bitstream {
    pub id: String,

    pub mime_type: String,

    /// Short description of the file format (e.g. "JPEG")
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub size_bytes: u64,

    #[serde(default)]
    pub checksum: Option<Checksum>,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Bitstream {
    pub fn name(&self) -> &str {
        self.metadata.first(fields::TITLE).unwrap_or(&self.id)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_enabled(&self) -> bool {
        self.metadata.flag(fields::ENABLED) != Some(false)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Bundle {
    pub name: String,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub bitstreams: Vec<Bitstream>,
}

impl Bundle {
    pub fn is_enabled(&self) -> bool {
        self.metadata.flag(fields::ENABLED) != Some(false)
    }

    /// The prefix placed before every TOC label of this bundle's files
    pub fn toc_prefix(&self) -> &str {
        self.metadata.first(fields::TOC).unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

impl Item {
    pub fn is_enabled(&self) -> bool {
        self.metadata.flag(fields::IIIF_ENABLED) == Some(true)
    }

    pub fn is_searchable(&self) -> bool {
        self.metadata.flag(fields::SEARCH_ENABLED) == Some(true)
    }

    pub fn bitstream(&self, id: &str) -> Option<&Bitstream> {
        self.bundles
            .iter()
            .flat_map(|b| b.bitstreams.iter())
            .find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> Metadata {
        Metadata(
            pairs
                .iter()
                .map(|(f, v)| MetadataValue {
                    field: f.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn field_name_parses_and_displays() {
        let name: FieldName = "dc.contributor.author".parse().unwrap();
        assert_eq!(name.schema, "dc");
        assert_eq!(name.element, "contributor");
        assert_eq!(name.qualifier.as_deref(), Some("author"));
        assert_eq!(name.to_string(), "dc.contributor.author");

        let name: FieldName = "dc.title".parse().unwrap();
        assert_eq!(name.qualifier, None);

        assert!("title".parse::<FieldName>().is_err());
        assert!("dc.title.a.b".parse::<FieldName>().is_err());
    }

    #[test]
    fn wildcard_qualifier_matches_everything_below_element() {
        let name: FieldName = "dc.contributor.*".parse().unwrap();
        assert!(name.matches("dc.contributor.author"));
        assert!(name.matches("dc.contributor"));
        assert!(!name.matches("dc.creator"));

        let exact: FieldName = "dc.title".parse().unwrap();
        assert!(exact.matches("dc.title"));
        assert!(!exact.matches("dc.title.alternative"));
    }

    #[test]
    fn values_keep_stored_order_and_duplicates() {
        let md = metadata(&[
            ("dc.contributor.author", "Smith, Donald"),
            ("dc.title", "A title"),
            ("dc.contributor.editor", "Doe, John"),
            ("dc.contributor.author", "Smith, Donald"),
        ]);

        let name: FieldName = "dc.contributor.*".parse().unwrap();
        let values: Vec<_> = md.values(&name).collect();
        assert_eq!(values, ["Smith, Donald", "Doe, John", "Smith, Donald"]);
        assert_eq!(md.first("dc.title"), Some("A title"));
    }

    #[test]
    fn flags() {
        let md = metadata(&[("a.b", "Yes"), ("c.d", "false"), ("e.f", "maybe")]);
        assert_eq!(md.flag("a.b"), Some(true));
        assert_eq!(md.flag("c.d"), Some(false));
        assert_eq!(md.flag("e.f"), None);
        assert_eq!(md.flag("g.h"), None);
    }

    #[test]
    fn item_document_deserializes() {
        let json = r#"{
            "id": "0a1b",
            "metadata": [{"field": "dspace.iiif.enabled", "value": "true"}],
            "bundles": [{
                "name": "ORIGINAL",
                "bitstreams": [{
                    "id": "f1",
                    "mimeType": "image/jpeg",
                    "format": "JPEG",
                    "sizeBytes": 19,
                    "checksum": {"value": "abc", "algorithm": "MD5"},
                    "metadata": [{"field": "dc.title", "value": "page.jpg"}]
                }]
            }]
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.is_enabled());
        assert!(!item.is_searchable());

        let file = item.bitstream("f1").unwrap();
        assert_eq!(file.name(), "page.jpg");
        assert!(file.is_image());
        assert!(file.is_enabled());
        assert_eq!(item.bundles[0].toc_prefix(), "ORIGINAL");
    }
}
