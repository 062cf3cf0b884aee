// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::{Command, Source};

use structopt::StructOpt;

/// Prints the links to the companion files of an item
#[derive(StructOpt, Debug)]
pub struct SeeAlso {
    #[structopt(flatten)]
    source: Source,

    /// The item id
    item: String,
}

impl Command for SeeAlso {
    fn execute(self) -> anyhow::Result<()> {
        self.source.assemble(|a| a.see_also(&self.item))
    }
}
