// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::{Command, Source};

use structopt::StructOpt;

/// Prints a single canvas of an item
#[derive(StructOpt, Debug)]
pub struct Canvas {
    #[structopt(flatten)]
    source: Source,

    /// The item id
    item: String,

    /// The canvas name (format: c{position})
    canvas: String,
}

impl Command for Canvas {
    fn execute(self) -> anyhow::Result<()> {
        self.source.assemble(|a| a.canvas(&self.item, &self.canvas))
    }
}
