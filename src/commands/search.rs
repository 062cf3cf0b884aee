// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::{print, Command, Source};
use crate::api::Solr;
use crate::search::Responder;

use structopt::StructOpt;

/// Searches the text of an item and prints the highlights
#[derive(StructOpt, Debug)]
pub struct Search {
    #[structopt(flatten)]
    source: Source,

    /// The item id
    item: String,

    /// The query (several words are searched for together)
    query: String,
}

impl Command for Search {
    fn execute(self) -> anyhow::Result<()> {
        let (config, store) = self.source.load()?;
        let index = Solr::new(config.search.url.as_deref());
        let responder = Responder::new(&config, &store, &index)?;

        print(&responder.search(&self.item, &self.query)?)
    }
}
