// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::SearchPlugin;
use crate::api::FullTextIndex;
use crate::builder::ids::Identifiers;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::highlight::{Highlight, Response, Snippet};
use crate::formats::{Annotation, AnnotationList, Body, Motivation, Type, Within};

use log::{debug, error, warn};

pub const NAME: &str = "word-highlight";

/// Wraps multi-word queries in parentheses
pub fn adjust_query(query: &str) -> String {
    if query.split_whitespace().count() > 1 {
        format!("({})", query)
    } else {
        query.to_string()
    }
}

/// Index parameters for a highlighting query scoped to one manifest
pub fn params(field: &str, query: &str, manifest: &str) -> Vec<(&'static str, String)> {
    let q = format!(
        "{}:{} AND manifest_url:\"{}\"",
        field,
        adjust_query(query),
        manifest
    );

    vec![
        ("q", q),
        ("fl", "id".into()),
        ("wt", "json".into()),
        ("hl", "true".into()),
        ("hl.ocr.fl", field.into()),
        ("hl.ocr.contextBlock", "line".into()),
        ("hl.ocr.contextSize", "2".into()),
        ("hl.snippets", "10".into()),
        ("hl.ocr.trackPages", "off".into()),
        ("hl.ocr.limitBlock", "page".into()),
        ("hl.ocr.absoluteHighlights", "true".into()),
    ]
}

/// Maps an index page id (`Page.3`) to a canvas name (`c3`)
pub fn canvas_name(page: &str) -> Result<String> {
    let number: u64 = page
        .split('.')
        .nth(1)
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::PageId(page.into()))?;

    Ok(format!("c{}", number))
}

fn annotation(ids: &Identifiers, snippet: &Snippet, hl: &Highlight) -> Result<Option<Annotation>> {
    let (text, ulx, uly, lrx, lry) = match (&hl.text, hl.ulx, hl.uly, hl.lrx, hl.lry) {
        (Some(text), Some(ulx), Some(uly), Some(lrx), Some(lry)) => (text, ulx, uly, lrx, lry),
        _ => return Ok(None),
    };
    if lrx <= ulx || lry <= uly {
        return Ok(None);
    }

    let page = match hl.page.as_deref() {
        Some(page) => page,
        None => match snippet.pages.first() {
            Some(page) => page.id.as_str(),
            None => return Ok(None),
        },
    };

    let canvas = canvas_name(page)?;
    let xywh = format!("{},{},{},{}", ulx, uly, lrx - ulx, lry - uly);

    let mut annotation = Annotation::new(
        Motivation::Painting,
        Body::text(text),
        format!("{}#xywh={}", ids.canvas_named(&canvas), xywh),
    );
    annotation.id = Some(ids.highlight(&canvas, &xywh));
    annotation.within = Some(Within {
        id: ids.manifest(),
        kind: Type::Manifest,
    });

    Ok(Some(annotation))
}

/// Turns a raw index response into highlight annotations
///
/// Highlights that cannot be placed on a canvas are left out.
pub fn translate(ids: &Identifiers, body: &str) -> Result<Vec<Annotation>> {
    let response: Response = serde_json::from_str(body)?;
    let mut annotations = Vec::new();

    for (doc, fields) in &response.ocr_highlighting {
        for (name, field) in fields {
            debug!("{}/{}: {:?} highlights in total", doc, name, field.num_total);

            for snippet in &field.snippets {
                for hl in snippet.highlights.iter().flatten() {
                    match annotation(ids, snippet, hl) {
                        Ok(Some(annotation)) => annotations.push(annotation),
                        Ok(None) => debug!("skipping incomplete or empty highlight {:?}", hl),
                        Err(e) => debug!("skipping highlight: {}", e),
                    }
                }
            }
        }
    }

    Ok(annotations)
}

/// Word-level highlighting against an OCR-aware full-text index
pub struct WordHighlight<'a> {
    config: &'a Config,
    index: &'a dyn FullTextIndex,
}

impl<'a> WordHighlight<'a> {
    pub fn new(config: &'a Config, index: &'a dyn FullTextIndex) -> Self {
        Self { config, index }
    }
}

impl SearchPlugin for WordHighlight<'_> {
    fn matches(&self, name: &str) -> bool {
        name == NAME
    }

    fn search(&self, item: &str, query: &str) -> AnnotationList {
        let ids = Identifiers::new(&self.config.endpoint, item);
        let mut list = AnnotationList::new(ids.search_results(query));

        let params = params(&self.config.search.field, query, &ids.manifest());
        let body = match self.index.select(&params) {
            Ok(body) => body,
            Err(e) => {
                error!("search within item {} failed: {}", item, e);
                return list;
            }
        };

        match translate(&ids, &body) {
            Ok(annotations) => {
                for annotation in annotations {
                    list.push(annotation);
                }
            }
            Err(e) => warn!("unable to parse index response for item {}: {}", item, e),
        }

        list
    }
}
