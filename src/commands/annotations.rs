// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::{Command, Source};

use structopt::StructOpt;

/// Prints the annotations stored with a page image
#[derive(StructOpt, Debug)]
pub struct Annotations {
    #[structopt(flatten)]
    source: Source,

    /// The item id
    item: String,

    /// The bitstream id of the page image
    bitstream: String,
}

impl Command for Annotations {
    fn execute(self) -> anyhow::Result<()> {
        self.source
            .assemble(|a| a.image_annotations(&self.item, &self.bitstream))
    }
}
