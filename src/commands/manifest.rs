// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::{Command, Source};

use structopt::StructOpt;

/// Prints the manifest of an item
#[derive(StructOpt, Debug)]
pub struct Manifest {
    #[structopt(flatten)]
    source: Source,

    /// The item id
    item: String,
}

impl Command for Manifest {
    fn execute(self) -> anyhow::Result<()> {
        self.source.assemble(|a| a.manifest(&self.item))
    }
}
