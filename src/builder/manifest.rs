// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::annotations;
use super::canvas::CanvasBuilder;
use super::ids::{self, Identifiers};
use super::metadata::{item_entries, Registry};
use super::ranges::TocRangeBuilder;
use super::sequence::SequenceBuilder;
use super::{qualifying_bundles, qualifying_files};
use crate::api::DimensionProbe;
use crate::config::Config;
use crate::error::Result;
use crate::formats::presentation::{SEARCH_CONTEXT, SEARCH_PROFILE};
use crate::formats::repository::fields;
use crate::formats::{Bitstream, ExternalLink, ImageContent, Item, Manifest, SearchService, Type};

use log::debug;

/// Assembles the manifest of one item
pub struct ManifestOrchestrator<'a> {
    config: &'a Config,
    registry: &'a Registry,
    probe: &'a dyn DimensionProbe,
    item: &'a Item,
    ids: Identifiers,
}

impl<'a> ManifestOrchestrator<'a> {
    pub fn new(
        config: &'a Config,
        registry: &'a Registry,
        probe: &'a dyn DimensionProbe,
        item: &'a Item,
    ) -> Self {
        Self {
            config,
            registry,
            probe,
            item,
            ids: Identifiers::new(&config.endpoint, &item.id),
        }
    }

    pub fn build(&self) -> Result<Manifest> {
        let (config, item, ids) = (self.config, self.item, &self.ids);

        let label = item.metadata.first(fields::TITLE).unwrap_or(item.id.as_str());
        let mut manifest = Manifest::new(ids.manifest(), label.into());

        manifest.logo = config.document.logo.as_ref().map(|logo| ImageContent {
            id: logo.clone(),
            kind: Type::Image,
            format: None,
            service: None,
        });

        manifest.related = Some(annotations::related(config, item));

        if item.is_searchable() {
            manifest.service = Some(SearchService {
                context: SEARCH_CONTEXT,
                id: ids.search_service(),
                profile: SEARCH_PROFILE,
            });
        }

        manifest.metadata = item_entries(&config.metadata.item, &item.metadata);
        manifest.description = item
            .metadata
            .values(&config.document.description_field)
            .find(|d| !d.trim().is_empty())
            .map(Into::into);
        manifest.license = item
            .metadata
            .values(&config.document.license_field)
            .next()
            .map(Into::into);

        let hint = item.metadata.first(fields::VIEWING_HINT);
        manifest.viewing_hint = Some(hint.unwrap_or(config.document.viewing_hint.as_str()).into());

        let first = qualifying_bundles(config, item)
            .flat_map(qualifying_files)
            .next();

        let mut builder = CanvasBuilder::new(config, ids, self.registry, self.probe, item);
        manifest.thumbnail = first.map(|file| builder.thumbnail(file));

        if let Some(file) = first {
            builder.seed(file);
        }

        let mut ranges = TocRangeBuilder::new(&config.document.toc_separator);
        ranges.set_root(ids.root_range());

        let bundles: Vec<_> = qualifying_bundles(config, item)
            .filter(|b| qualifying_files(b).next().is_some())
            .collect();

        let mut sequence = SequenceBuilder::new(builder);
        for bundle in &bundles {
            let prefix = match bundles.len() {
                1 => None,
                _ => Some(bundle.toc_prefix()),
            };

            for file in qualifying_files(bundle) {
                sequence.add_canvas(file, prefix, &mut ranges)?;
            }
        }

        debug!("item {} has {} canvases", item.id, sequence.position());
        manifest.sequences.push(sequence.finish(ids.sequence()));

        let (root, nodes) = ranges.finish();
        if !nodes.is_empty() {
            manifest.structures.push(root);
            manifest
                .structures
                .extend(nodes.into_values().filter(|r| !r.is_empty()));
        }

        manifest.rendering = self.rendering().map(|file| ExternalLink {
            id: ids::content(&config.links, &file.id),
            label: Some(file.name().into()),
            format: Some(file.mime_type.clone()),
        });

        if annotations::has_see_also(config, item) {
            manifest.see_also = Some(annotations::see_also_link(ids));
        }

        Ok(manifest)
    }

    /// The first whole-document file of the item
    fn rendering(&self) -> Option<&'a Bitstream> {
        let formats = &self.config.document.rendering_formats;

        self.item
            .bundles
            .iter()
            .filter(|b| b.is_enabled())
            .flat_map(|b| b.bitstreams.iter())
            .filter(|b| b.is_enabled())
            .find(|b| formats.iter().any(|f| f.eq_ignore_ascii_case(&b.mime_type)))
    }
}
