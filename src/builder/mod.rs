// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

//! Assembly of presentation documents from repository items

pub mod annotations;
pub mod canvas;
pub mod dimensions;
pub mod ids;
pub mod manifest;
pub mod metadata;
pub mod ranges;
pub mod sequence;

#[cfg(test)]
pub mod testing;

use self::canvas::CanvasBuilder;
use self::ids::Identifiers;
use self::manifest::ManifestOrchestrator;
use self::metadata::Registry;
use crate::api::{ContentStore, DimensionProbe};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::{AnnotationList, Bitstream, Bundle, Canvas, Item, Manifest};

/// Bundles that never hold page images
const EXCLUDED: &[&str] = &[
    "LICENSE",
    "METADATA",
    "CC-LICENSE",
    "THUMBNAIL",
    "BRANDED_PREVIEW",
    "TEXT",
];

/// Bundles whose files become canvases, in stored order
pub fn qualifying_bundles<'a>(config: &'a Config, item: &'a Item) -> impl Iterator<Item = &'a Bundle> {
    item.bundles.iter().filter(move |b| {
        let see_also = &config.document.see_also_bundle;
        b.is_enabled()
            && !b.name.eq_ignore_ascii_case(see_also)
            && !EXCLUDED.iter().any(|x| b.name.eq_ignore_ascii_case(x))
    })
}

/// Files of a bundle that become canvases, in stored order
pub fn qualifying_files(bundle: &Bundle) -> impl Iterator<Item = &Bitstream> {
    bundle
        .bitstreams
        .iter()
        .filter(|b| b.is_image() && b.is_enabled())
}

/// Answers document requests against a content store
pub struct Assembler<'a> {
    config: &'a Config,
    store: &'a dyn ContentStore,
    probe: &'a dyn DimensionProbe,
    registry: Registry,
}

impl<'a> Assembler<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn ContentStore,
        probe: &'a dyn DimensionProbe,
    ) -> Result<Self> {
        let registry = Registry::standard();
        config.validate(&registry)?;

        Ok(Self {
            config,
            store,
            probe,
            registry,
        })
    }

    /// Loads an item that is published as a manifest
    pub fn item(&self, id: &str) -> Result<Item> {
        let item = self.store.item(id)?;
        if !item.is_enabled() {
            return Err(Error::not_found(format!("manifest for item {}", id)));
        }

        Ok(item)
    }

    pub fn manifest(&self, id: &str) -> Result<Manifest> {
        let item = self.item(id)?;
        ManifestOrchestrator::new(self.config, &self.registry, self.probe, &item).build()
    }

    /// The canvas named `c{position}`, identical to its manifest counterpart
    pub fn canvas(&self, id: &str, name: &str) -> Result<Canvas> {
        let item = self.item(id)?;
        let missing = || Error::not_found(format!("canvas {} of item {}", name, id));

        let position: usize = name
            .strip_prefix('c')
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .filter(|n| *n == "0" || !n.starts_with('0'))
            .and_then(|n| n.parse().ok())
            .ok_or_else(missing)?;

        let files: Vec<_> = qualifying_bundles(self.config, &item)
            .flat_map(qualifying_files)
            .collect();
        let file = files.get(position).ok_or_else(missing)?;

        let ids = Identifiers::new(&self.config.endpoint, &item.id);
        let mut builder = CanvasBuilder::new(self.config, &ids, &self.registry, self.probe, &item);

        // Replay what the manifest build does before reaching this page
        if let Some(first) = files.first() {
            builder.seed(first);
            if position > 0 {
                builder.resolve(first)?;
            }
        }

        builder.build(file, position)
    }

    pub fn see_also(&self, id: &str) -> Result<AnnotationList> {
        let item = self.item(id)?;
        let ids = Identifiers::new(&self.config.endpoint, &item.id);
        Ok(annotations::see_also_list(self.config, &ids, &item))
    }

    pub fn image_annotations(&self, id: &str, bitstream: &str) -> Result<AnnotationList> {
        let item = self.item(id)?;
        let file = item
            .bitstream(bitstream)
            .ok_or_else(|| Error::not_found(format!("bitstream {}", bitstream)))?;

        let ids = Identifiers::new(&self.config.endpoint, &item.id);
        annotations::image_annotations(&ids, file)
    }
}
