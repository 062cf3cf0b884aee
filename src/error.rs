// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures while assembling presentation documents
///
/// Every variant except `Index` and `PageId` aborts a manifest build. Those
/// two only ever surface inside the search responder, which degrades them to
/// an empty result.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unable to resolve canvas dimensions for bitstream {0}")]
    Resolution(String),

    #[error("content store failure at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("full-text index unavailable: {0}")]
    Index(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("malformed page identifier: {0:?}")]
    PageId(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }
}
