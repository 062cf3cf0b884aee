// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! Search within a single manifest

pub mod highlight;

use crate::api::{ContentStore, FullTextIndex};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::AnnotationList;

use log::debug;

/// A way of answering "search within this manifest" queries
pub trait SearchPlugin {
    fn matches(&self, name: &str) -> bool;

    /// Never fails: an unusable index yields an empty list
    fn search(&self, item: &str, query: &str) -> AnnotationList;
}

/// Picks the registered plugin named in the configuration
pub fn select<'a>(
    config: &'a Config,
    index: &'a dyn FullTextIndex,
) -> Result<Box<dyn SearchPlugin + 'a>> {
    let registered: Vec<Box<dyn SearchPlugin + 'a>> =
        vec![Box::new(highlight::WordHighlight::new(config, index))];

    let name = &config.search.plugin;
    registered
        .into_iter()
        .find(|p| p.matches(name))
        .ok_or_else(|| Error::NotImplemented(format!("search plugin {:?}", name)))
}

/// Answers search requests for searchable items
pub struct Responder<'a> {
    store: &'a dyn ContentStore,
    plugin: Box<dyn SearchPlugin + 'a>,
}

impl<'a> Responder<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn ContentStore,
        index: &'a dyn FullTextIndex,
    ) -> Result<Self> {
        Ok(Self {
            store,
            plugin: select(config, index)?,
        })
    }

    pub fn search(&self, id: &str, query: &str) -> Result<AnnotationList> {
        let item = self.store.item(id)?;
        if !item.is_enabled() || !item.is_searchable() {
            return Err(Error::not_found(format!("search service for item {}", id)));
        }

        let list = self.plugin.search(&item.id, query);
        debug!("{} highlights for {:?} in item {}", list.len(), query, id);
        Ok(list)
    }
}
