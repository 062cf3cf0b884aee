// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::builder::dimensions::Dimensions;
use crate::formats::Bitstream;

use log::{debug, warn};
use serde::Deserialize;
use ureq::Agent;

/// Asks an outside party for the pixel size of a page image
pub trait DimensionProbe {
    fn probe(&self, bitstream: &Bitstream) -> Option<Dimensions>;
}

/// A client for an IIIF image server
#[derive(Clone, Debug)]
pub struct ImageService {
    agent: Agent,
    base: String,
}

impl ImageService {
    pub fn new(base: &str) -> Self {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Self {
            agent: Agent::new(),
            base,
        }
    }

    fn info(&self, id: &str) -> Result<Info, String> {
        let url = format!("{}{}/info.json", self.base, id);
        debug!("probing {}", url);

        let rep = self.agent.get(&url).call().map_err(|e| e.to_string())?;
        rep.into_json().map_err(|e| e.to_string())
    }
}

#[derive(Deserialize)]
struct Info {
    width: u32,
    height: u32,
}

impl DimensionProbe for ImageService {
    fn probe(&self, bitstream: &Bitstream) -> Option<Dimensions> {
        let info = match self.info(&bitstream.id) {
            Ok(info) => info,
            Err(e) => {
                warn!("unable to probe bitstream {}: {}", bitstream.id, e);
                return None;
            }
        };

        let dimensions = Dimensions::new(info.width, info.height);
        if dimensions.is_none() {
            warn!(
                "image server reported {}x{} for bitstream {}",
                info.width, info.height, bitstream.id
            );
        }

        dimensions
    }
}
