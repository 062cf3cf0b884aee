// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::builder::dimensions::Dimensions;
use crate::builder::metadata::Registry;
use crate::error::{Error, Result};
use crate::formats::FieldName;

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

const LEVEL1: &str = "http://iiif.io/api/image/2/level1.json";
const LEVEL0: &str = "http://iiif.io/api/image/2/level0.json";

/// Prefix marking a bitstream field whose values are computed, not stored
pub const VIRTUAL_PREFIX: &str = "bitstream.iiif-virtual.";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Base of every identifier this crate mints
    pub endpoint: String,

    /// Base of the external image service; the bitstream id is appended
    pub image_server: String,

    pub links: Links,

    #[serde(default)]
    pub search: Search,

    #[serde(default)]
    pub canvas: Canvas,

    #[serde(default)]
    pub document: Document,

    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Links {
    /// Landing pages live at `{ui}/items/{id}`
    pub ui: String,

    /// Raw files live at `{content}/{id}/content`
    pub content: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Search {
    pub url: Option<String>,
    pub plugin: String,
    pub field: String,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            url: None,
            plugin: "word-highlight".into(),
            field: "ocr_text".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Canvas {
    pub naming: String,
    pub default_size: DefaultSize,
    pub profile: String,
    pub thumbnail_profile: String,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            naming: "Page".into(),
            default_size: DefaultSize::Fixed(Dimensions::FALLBACK),
            profile: LEVEL1.into(),
            thumbnail_profile: LEVEL0.into(),
        }
    }
}

/// What to do for a page image that carries no dimensions of its own
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSize")]
pub enum DefaultSize {
    /// Use this size (an item may override it)
    Fixed(Dimensions),

    /// Use the size probed for the first page, else a built-in constant
    Auto,

    /// Use the size probed for the first page, else fail the build
    Strict,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Keyword(String),
    Fixed { width: u32, height: u32 },
}

impl TryFrom<RawSize> for DefaultSize {
    type Error = String;

    fn try_from(raw: RawSize) -> std::result::Result<Self, String> {
        match raw {
            RawSize::Keyword(k) if k == "auto" => Ok(Self::Auto),
            RawSize::Keyword(k) if k == "strict" => Ok(Self::Strict),
            RawSize::Keyword(k) => Err(format!("unknown default-size {:?}", k)),
            RawSize::Fixed { width, height } => Dimensions::new(width, height)
                .map(Self::Fixed)
                .ok_or_else(|| "default-size must be positive".to_string()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Document {
    pub viewing_hint: String,
    pub logo: Option<String>,
    pub description_field: FieldName,
    pub license_field: FieldName,
    pub toc_separator: String,
    pub rendering_formats: Vec<String>,
    pub see_also_bundle: String,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            viewing_hint: "individuals".into(),
            logo: None,
            description_field: field("dc", "description", Some("abstract")),
            license_field: field("dc", "rights", Some("uri")),
            toc_separator: "|||".into(),
            rendering_formats: vec!["application/pdf".into()],
            see_also_bundle: "OtherContent".into(),
        }
    }
}

/// Where the values of a metadata entry come from
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum FieldKey {
    Literal(FieldName),
    Virtual(String),
}

impl TryFrom<String> for FieldKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        match value.strip_prefix(VIRTUAL_PREFIX) {
            Some("") => Err(Error::Config("virtual field without a name".into())),
            Some(name) => Ok(Self::Virtual(name.into())),
            None => Ok(Self::Literal(value.parse()?)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub field: FieldKey,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Metadata {
    pub item: Vec<FieldSpec>,
    pub bitstream: Vec<FieldSpec>,
}

impl Default for Metadata {
    fn default() -> Self {
        let literal = |schema, element, qualifier, label: &str| FieldSpec {
            field: FieldKey::Literal(field(schema, element, qualifier)),
            label: label.into(),
        };

        let computed = |name: &str, label: &str| FieldSpec {
            field: FieldKey::Virtual(name.into()),
            label: label.into(),
        };

        Self {
            item: vec![
                literal("dc", "title", None, "Title"),
                literal("dc", "date", Some("issued"), "Issue Date"),
                literal("dc", "contributor", Some("*"), "Authors"),
            ],
            bitstream: vec![
                literal("dc", "title", None, "File name"),
                computed("format", "Format"),
                computed("mimetype", "Mime Type"),
                computed("bytes", "File size"),
                computed("checksum", "Checksum"),
            ],
        }
    }
}

fn field(schema: &str, element: &str, qualifier: Option<&str>) -> FieldName {
    FieldName {
        schema: schema.into(),
        element: element.into(),
        qualifier: qualifier.map(Into::into),
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate(&Registry::standard())?;
        Ok(config)
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        text.parse()
    }

    /// Checks every virtual field against the suppliers in `registry`
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        for spec in &self.metadata.item {
            if let FieldKey::Virtual(name) = &spec.field {
                return Err(Error::Config(format!(
                    "virtual field {:?} is only available for bitstreams",
                    name
                )));
            }
        }

        for spec in &self.metadata.bitstream {
            if let FieldKey::Virtual(name) = &spec.field {
                if !registry.contains(name) {
                    return Err(Error::Config(format!("unknown virtual field {:?}", name)));
                }
            }
        }

        if self.document.toc_separator.is_empty() {
            return Err(Error::Config("toc-separator must not be empty".into()));
        }

        Ok(())
    }
}
