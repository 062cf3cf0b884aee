// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! The OCR highlighting section of a full-text index response

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Response {
    /// Per document, per field highlighting
    #[serde(rename = "ocrHighlighting")]
    pub ocr_highlighting: IndexMap<String, IndexMap<String, Field>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub snippets: Vec<Snippet>,

    #[serde(rename = "numTotal")]
    pub num_total: Option<u64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Each highlight may span several boxes (e.g. across a line break)
    #[serde(default)]
    pub highlights: Vec<Vec<Highlight>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Page {
    pub id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Highlight {
    pub text: Option<String>,

    pub ulx: Option<f64>,

    pub uly: Option<f64>,

    pub lrx: Option<f64>,

    pub lry: Option<f64>,

    /// The page this box lies on; falls back to the snippet's first page
    pub page: Option<String>,
}
