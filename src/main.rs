// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

mod api;
mod builder;
mod commands;
mod config;
mod error;
mod formats;
mod search;

use commands::Command;
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    commands::Main::from_args().execute()
}
