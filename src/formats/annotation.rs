// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::presentation::{ExternalLink, ImageContent, Type, PRESENTATION_CONTEXT};

use serde::de::IgnoredAny;
use serde::Serialize;
use serde_json::value::RawValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Motivation {
    #[serde(rename = "sc:painting")]
    Painting,

    #[serde(rename = "oa:linking")]
    Linking,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "@type")]
    pub kind: Type,

    pub chars: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Text(TextContent),
    Image(ImageContent),
    Link(ExternalLink),
}

impl Body {
    pub fn text(chars: &str) -> Self {
        Self::Text(TextContent {
            kind: Type::ContentAsText,
            chars: chars.into(),
        })
    }
}

/// Back-reference from an annotation to the manifest owning its target
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Within {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Annotation {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub motivation: Motivation,

    pub resource: Body,

    /// A canvas id, optionally followed by a `#xywh=` fragment
    pub on: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub within: Option<Within>,
}

impl Annotation {
    pub fn new(motivation: Motivation, resource: Body, on: String) -> Self {
        Self {
            id: None,
            kind: Type::Annotation,
            motivation,
            resource,
            on,
            within: None,
        }
    }
}

/// The contents of an annotation list
///
/// Lists authored outside this crate are carried through byte for byte.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Resources {
    Built(Vec<Annotation>),
    Stored(Box<RawValue>),
}

#[derive(Clone, Debug, Serialize)]
pub struct AnnotationList {
    #[serde(rename = "@context")]
    pub context: &'static str,

    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type")]
    pub kind: Type,

    pub resources: Resources,
}

impl AnnotationList {
    pub fn new(id: String) -> Self {
        Self {
            context: PRESENTATION_CONTEXT,
            id,
            kind: Type::AnnotationList,
            resources: Resources::Built(Vec::new()),
        }
    }

    /// Appends an annotation; a stored list is replaced by a built one
    pub fn push(&mut self, annotation: Annotation) {
        match &mut self.resources {
            Resources::Built(list) => list.push(annotation),
            Resources::Stored(..) => self.resources = Resources::Built(vec![annotation]),
        }
    }

    pub fn len(&self) -> usize {
        match &self.resources {
            Resources::Built(list) => list.len(),
            Resources::Stored(raw) => serde_json::from_str::<Vec<IgnoredAny>>(raw.get())
                .map(|list| list.len())
                .unwrap_or(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
