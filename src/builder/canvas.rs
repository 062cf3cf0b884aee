// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::dimensions::{DimensionResolver, Dimensions};
use super::ids::{Identifiers, ImageUris};
use super::metadata::{bitstream_entries, Registry};
use crate::api::DimensionProbe;
use crate::config::{Config, DefaultSize};
use crate::error::Result;
use crate::formats::presentation::IMAGE_CONTEXT;
use crate::formats::repository::fields;
use crate::formats::{Annotation, Bitstream, Body, Canvas, ImageContent, ImageService, Item};
use crate::formats::{Motivation, Type};

pub struct CanvasBuilder<'a> {
    config: &'a Config,
    ids: &'a Identifiers,
    registry: &'a Registry,
    images: ImageUris,
    naming: String,
    policy: DefaultSize,
    resolver: DimensionResolver<'a>,
}

impl<'a> CanvasBuilder<'a> {
    pub fn new(
        config: &'a Config,
        ids: &'a Identifiers,
        registry: &'a Registry,
        probe: &'a dyn DimensionProbe,
        item: &Item,
    ) -> Self {
        let naming = item
            .metadata
            .first(fields::CANVAS_NAMING)
            .unwrap_or(config.canvas.naming.as_str())
            .to_string();

        // An item may carry its own static default
        let policy = match config.canvas.default_size {
            DefaultSize::Fixed(size) => {
                DefaultSize::Fixed(Dimensions::stored(&item.metadata).unwrap_or(size))
            }
            policy => policy,
        };

        Self {
            config,
            ids,
            registry,
            images: ImageUris::new(&config.image_server),
            naming,
            policy,
            resolver: DimensionResolver::new(probe, policy),
        }
    }

    /// Seeds the build-wide default size unless a static one is configured
    pub fn seed(&mut self, first: &Bitstream) {
        if !matches!(self.policy, DefaultSize::Fixed(..)) {
            self.resolver.seed(first);
        }
    }

    pub fn resolve(&mut self, bitstream: &Bitstream) -> Result<Dimensions> {
        self.resolver.resolve(bitstream)
    }

    fn image(&self, bitstream: &Bitstream, id: String, profile: &str) -> ImageContent {
        ImageContent {
            id,
            kind: Type::Image,
            format: Some(bitstream.mime_type.clone()),
            service: Some(ImageService {
                context: IMAGE_CONTEXT,
                id: self.images.service(&bitstream.id),
                profile: profile.into(),
            }),
        }
    }

    pub fn thumbnail(&self, bitstream: &Bitstream) -> ImageContent {
        let id = self.images.thumbnail(&bitstream.id);
        self.image(bitstream, id, &self.config.canvas.thumbnail_profile)
    }

    pub fn build(&mut self, bitstream: &Bitstream, position: usize) -> Result<Canvas> {
        let Dimensions { width, height } = self.resolve(bitstream)?;

        let label = match bitstream.metadata.first(fields::LABEL) {
            Some(label) => label.to_string(),
            None => format!("{} {}", self.naming, position + 1),
        };

        let id = self.ids.canvas(position);
        let full = self.images.full(&bitstream.id);
        let image = self.image(bitstream, full, &self.config.canvas.profile);
        let painting = Annotation::new(Motivation::Painting, Body::Image(image), id.clone());

        Ok(Canvas {
            id,
            kind: Type::Canvas,
            label,
            width,
            height,
            images: vec![painting],
            thumbnail: self.thumbnail(bitstream),
            metadata: bitstream_entries(&self.config.metadata.bitstream, self.registry, bitstream),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::testing::{bitstream, config, item, metadata, sized, CountingProbe};
    use crate::error::Error;

    #[test]
    fn canvas_resources() {
        let config = config();
        let ids = Identifiers::new(&config.endpoint, "i1");
        let registry = Registry::standard();
        let probe = CountingProbe::answering(None);
        let item = item("i1", vec![]);

        let mut builder = CanvasBuilder::new(&config, &ids, &registry, &probe, &item);
        let canvas = builder.build(&sized("f1", 640, 480), 2).unwrap();

        assert_eq!(canvas.id, "http://localhost/iiif/i1/canvas/c2");
        assert_eq!(canvas.label, "Page 3");
        assert_eq!((canvas.width, canvas.height), (640, 480));

        let value = serde_json::to_value(&canvas).unwrap();
        assert_eq!(value["@type"], "sc:Canvas");
        assert_eq!(value["images"][0]["motivation"], "sc:painting");
        assert_eq!(value["images"][0]["on"], "http://localhost/iiif/i1/canvas/c2");
        assert_eq!(
            value["images"][0]["resource"]["@id"],
            "http://localhost:8182/iiif/2/f1/full/full/0/default.jpg"
        );
        assert_eq!(
            value["images"][0]["resource"]["service"]["@id"],
            "http://localhost:8182/iiif/2/f1"
        );
        assert_eq!(
            value["images"][0]["resource"]["service"]["profile"],
            "http://iiif.io/api/image/2/level1.json"
        );
        assert_eq!(
            value["thumbnail"]["@id"],
            "http://localhost:8182/iiif/2/f1/full/90,/0/default.jpg"
        );
        assert_eq!(
            value["thumbnail"]["service"]["profile"],
            "http://iiif.io/api/image/2/level0.json"
        );
    }

    #[test]
    fn labels() {
        let config = config();
        let ids = Identifiers::new(&config.endpoint, "i1");
        let registry = Registry::standard();
        let probe = CountingProbe::answering(None);

        let mut item = item("i1", vec![]);
        item.metadata.0.extend(metadata(&[("iiif.canvas.naming", "Global")]).0);
        let mut builder = CanvasBuilder::new(&config, &ids, &registry, &probe, &item);

        let mut custom = bitstream("f0");
        custom.metadata = metadata(&[("iiif.label", "Custom Label")]);
        assert_eq!(builder.build(&custom, 0).unwrap().label, "Custom Label");
        assert_eq!(builder.build(&bitstream("f1"), 1).unwrap().label, "Global 2");
    }

    #[test]
    fn item_overrides_the_static_default() {
        let config = config();
        let ids = Identifiers::new(&config.endpoint, "i1");
        let registry = Registry::standard();
        let probe = CountingProbe::answering(None);

        let mut item = item("i1", vec![]);
        item.metadata.0.extend(
            metadata(&[("iiif.image.width", "2000"), ("iiif.image.height", "3000")]).0,
        );

        let mut builder = CanvasBuilder::new(&config, &ids, &registry, &probe, &item);
        let canvas = builder.build(&bitstream("f0"), 0).unwrap();
        assert_eq!((canvas.width, canvas.height), (2000, 3000));
    }

    #[test]
    fn strict_failure_aborts() {
        let mut config = config();
        config.canvas.default_size = DefaultSize::Strict;
        let ids = Identifiers::new(&config.endpoint, "i1");
        let registry = Registry::standard();
        let probe = CountingProbe::answering(None);
        let item = item("i1", vec![]);

        let mut builder = CanvasBuilder::new(&config, &ids, &registry, &probe, &item);
        builder.seed(&bitstream("f0"));
        assert!(matches!(
            builder.build(&bitstream("f0"), 0),
            Err(Error::Resolution(..))
        ));
        assert_eq!(probe.calls(), 1);
    }
}
