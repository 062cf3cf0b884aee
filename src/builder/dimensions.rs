// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::api::DimensionProbe;
use crate::config::DefaultSize;
use crate::error::{Error, Result};
use crate::formats::{repository::fields, Bitstream, Metadata};

use log::{debug, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Used when nothing better is known
    pub const FALLBACK: Self = Self {
        width: 1200,
        height: 1600,
    };

    pub fn new(width: u32, height: u32) -> Option<Self> {
        match (width, height) {
            (0, _) | (_, 0) => None,
            _ => Some(Self { width, height }),
        }
    }

    /// Dimensions recorded in `iiif.image.width` and `iiif.image.height`
    pub fn stored(metadata: &Metadata) -> Option<Self> {
        let width = metadata.first(fields::WIDTH)?.trim().parse().ok()?;
        let height = metadata.first(fields::HEIGHT)?.trim().parse().ok()?;
        Self::new(width, height)
    }
}

/// Resolves page sizes for a single build
///
/// The first file handed over gets the only chance to query the probe; a
/// probed size becomes the default for every later file without its own.
pub struct DimensionResolver<'a> {
    probe: &'a dyn DimensionProbe,
    policy: DefaultSize,
    probed: bool,
    dynamic: Option<Dimensions>,
}

impl<'a> DimensionResolver<'a> {
    pub fn new(probe: &'a dyn DimensionProbe, policy: DefaultSize) -> Self {
        Self {
            probe,
            policy,
            probed: false,
            dynamic: None,
        }
    }

    /// Establishes the build-wide default from the first page
    pub fn seed(&mut self, first: &Bitstream) {
        if self.probed {
            return;
        }

        self.probed = true;
        self.dynamic = Dimensions::stored(&first.metadata).or_else(|| self.probe.probe(first));
        debug!("seeded default dimensions: {:?}", self.dynamic);
    }

    pub fn resolve(&mut self, bitstream: &Bitstream) -> Result<Dimensions> {
        let first = !self.probed;
        self.probed = true;

        if let Some(dimensions) = Dimensions::stored(&bitstream.metadata) {
            return Ok(dimensions);
        }

        if first {
            if let Some(dimensions) = self.probe.probe(bitstream) {
                self.dynamic = Some(dimensions);
                return Ok(dimensions);
            }
        }

        if let Some(dimensions) = self.dynamic {
            return Ok(dimensions);
        }

        match self.policy {
            DefaultSize::Fixed(dimensions) => Ok(dimensions),
            DefaultSize::Auto => {
                warn!(
                    "no dimensions for bitstream {}; using {}x{}",
                    bitstream.id,
                    Dimensions::FALLBACK.width,
                    Dimensions::FALLBACK.height
                );
                Ok(Dimensions::FALLBACK)
            }
            DefaultSize::Strict => Err(Error::Resolution(bitstream.id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::testing::{bitstream, sized, CountingProbe};

    #[test]
    fn stored_dimensions_must_be_positive_integers() {
        assert_eq!(
            Dimensions::stored(&sized("a", 640, 480).metadata),
            Dimensions::new(640, 480)
        );
        assert_eq!(Dimensions::stored(&sized("a", 0, 480).metadata), None);
        assert_eq!(Dimensions::stored(&bitstream("a").metadata), None);
    }

    #[test]
    fn explicit_dimensions_never_probe() {
        let probe = CountingProbe::answering(Dimensions::new(10, 20));
        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Auto);

        for n in 0..3 {
            let file = sized(&format!("f{}", n), 640, 480);
            assert_eq!(resolver.resolve(&file).unwrap(), Dimensions::new(640, 480).unwrap());
        }

        assert_eq!(probe.calls(), 0);
    }

    #[test]
    fn first_probe_becomes_the_default() {
        let probe = CountingProbe::answering(Dimensions::new(300, 400));
        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Strict);

        for n in 0..4 {
            let file = bitstream(&format!("f{}", n));
            assert_eq!(resolver.resolve(&file).unwrap(), Dimensions::new(300, 400).unwrap());
        }

        assert_eq!(probe.calls(), 1);
    }

    #[test]
    fn probe_only_for_the_first_file() {
        let probe = CountingProbe::answering(Dimensions::new(300, 400));
        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Fixed(Dimensions::FALLBACK));

        resolver.resolve(&sized("f0", 640, 480)).unwrap();
        assert_eq!(resolver.resolve(&bitstream("f1")).unwrap(), Dimensions::FALLBACK);
        assert_eq!(probe.calls(), 0);
    }

    #[test]
    fn policy_applies_when_the_probe_fails() {
        let fixed = Dimensions::new(800, 600).unwrap();
        let probe = CountingProbe::answering(None);

        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Fixed(fixed));
        assert_eq!(resolver.resolve(&bitstream("f0")).unwrap(), fixed);

        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Auto);
        assert_eq!(resolver.resolve(&bitstream("f0")).unwrap(), Dimensions::FALLBACK);

        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Strict);
        assert!(matches!(resolver.resolve(&bitstream("f0")), Err(Error::Resolution(..))));

        assert_eq!(probe.calls(), 3);
    }

    #[test]
    fn seeding_consumes_the_probe() {
        let probe = CountingProbe::answering(Dimensions::new(300, 400));
        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Auto);

        resolver.seed(&bitstream("f0"));
        resolver.seed(&bitstream("f0"));
        assert_eq!(resolver.resolve(&bitstream("f0")).unwrap(), Dimensions::new(300, 400).unwrap());
        assert_eq!(resolver.resolve(&bitstream("f1")).unwrap(), Dimensions::new(300, 400).unwrap());
        assert_eq!(probe.calls(), 1);

        let mut resolver = DimensionResolver::new(&probe, DefaultSize::Auto);
        resolver.seed(&sized("f0", 640, 480));
        assert_eq!(resolver.resolve(&bitstream("f1")).unwrap(), Dimensions::new(640, 480).unwrap());
        assert_eq!(probe.calls(), 1);
    }
}
