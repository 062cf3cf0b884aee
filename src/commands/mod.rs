// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::api::{DirectoryStore, ImageService};
use crate::builder::Assembler;
use crate::config::Config;

use std::path::PathBuf;

use anyhow::Result;
use log::info;
use serde::Serialize;
use structopt::StructOpt;

mod annotations;
mod canvas;
mod manifest;
mod search;
mod see_also;

pub trait Command {
    fn execute(self) -> anyhow::Result<()>;
}

/// Where configuration and items come from
#[derive(StructOpt, Debug)]
pub struct Source {
    /// The configuration file
    #[structopt(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// The directory holding one `{id}.json` document per item
    #[structopt(short, long, default_value = ".")]
    store: PathBuf,
}

impl Source {
    fn load(&self) -> Result<(Config, DirectoryStore)> {
        let config = Config::load(&self.config)?;
        info!("using items from {}", self.store.display());
        Ok((config, DirectoryStore::new(self.store.clone())))
    }

    /// Runs `build` against a fresh assembler and prints the document
    fn assemble<T: Serialize>(
        &self,
        build: impl FnOnce(&Assembler) -> crate::error::Result<T>,
    ) -> Result<()> {
        let (config, store) = self.load()?;
        let probe = ImageService::new(&config.image_server);
        let assembler = Assembler::new(&config, &store, &probe)?;

        print(&build(&assembler)?)
    }
}

fn print(document: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

#[derive(StructOpt, Debug)]
#[structopt(about = "IIIF presentation documents for repository items")]
pub enum Main {
    Manifest(manifest::Manifest),
    Canvas(canvas::Canvas),
    SeeAlso(see_also::SeeAlso),
    Annotations(annotations::Annotations),
    Search(search::Search),
}

impl Command for Main {
    fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Manifest(cmd) => cmd.execute(),
            Self::Canvas(cmd) => cmd.execute(),
            Self::SeeAlso(cmd) => cmd.execute(),
            Self::Annotations(cmd) => cmd.execute(),
            Self::Search(cmd) => cmd.execute(),
        }
    }
}
