// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! Identifiers shared by manifests and search results

use crate::config::Links;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but the unreserved characters of RFC 3986
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const FULL: &str = "/full/full/0/default.jpg";
const THUMBNAIL: &str = "/full/90,/0/default.jpg";

/// Mints the identifiers of every document published for one item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifiers {
    base: String,
}

impl Identifiers {
    pub fn new(endpoint: &str, item: &str) -> Self {
        Self {
            base: format!("{}/{}", endpoint.trim_end_matches('/'), item),
        }
    }

    pub fn manifest(&self) -> String {
        format!("{}/manifest", self.base)
    }

    pub fn sequence(&self) -> String {
        format!("{}/sequence/s0", self.base)
    }

    pub fn canvas(&self, position: usize) -> String {
        self.canvas_named(&format!("c{}", position))
    }

    pub fn canvas_named(&self, name: &str) -> String {
        format!("{}/canvas/{}", self.base, name)
    }

    pub fn root_range(&self) -> String {
        format!("{}/manifest/range/r0", self.base)
    }

    pub fn search_service(&self) -> String {
        format!("{}/manifest/search", self.base)
    }

    pub fn see_also(&self) -> String {
        format!("{}/manifest/seeAlso", self.base)
    }

    pub fn image_annotations(&self, bitstream: &str) -> String {
        format!("{}/bitstream/{}/annotations", self.base, bitstream)
    }

    pub fn search_results(&self, query: &str) -> String {
        format!(
            "{}?q={}",
            self.search_service(),
            utf8_percent_encode(query, QUERY)
        )
    }

    /// A highlight box on a canvas, e.g. `c3` and `10,20,50,30`
    pub fn highlight(&self, canvas: &str, xywh: &str) -> String {
        format!("{}/annot/{}-{}", self.base, canvas, xywh)
    }
}

/// Request paths on the external image service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUris {
    base: String,
}

impl ImageUris {
    pub fn new(server: &str) -> Self {
        let mut base = server.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Self { base }
    }

    pub fn service(&self, bitstream: &str) -> String {
        format!("{}{}", self.base, bitstream)
    }

    pub fn full(&self, bitstream: &str) -> String {
        self.service(bitstream) + FULL
    }

    pub fn thumbnail(&self, bitstream: &str) -> String {
        self.service(bitstream) + THUMBNAIL
    }
}

pub fn related(links: &Links, item: &str) -> String {
    format!("{}/items/{}", links.ui.trim_end_matches('/'), item)
}

pub fn content(links: &Links, bitstream: &str) -> String {
    format!("{}/{}/content", links.content.trim_end_matches('/'), bitstream)
}
