// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

mod image;
mod index;
mod store;

pub use self::image::{DimensionProbe, ImageService};
pub use self::index::{FullTextIndex, Solr};
pub use self::store::{ContentStore, DirectoryStore};
