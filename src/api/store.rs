// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::error::{Error, Result};
use crate::formats::Item;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;

/// Read access to repository items
pub trait ContentStore {
    fn item(&self, id: &str) -> Result<Item>;
}

/// A content store holding one `{id}.json` document per item
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn valid(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl ContentStore for DirectoryStore {
    fn item(&self, id: &str) -> Result<Item> {
        if !Self::valid(id) {
            return Err(Error::not_found(format!("item {:?}", id)));
        }

        let path = self.root.join(format!("{}.json", id));
        let storage = |source| Error::Storage {
            path: path.display().to_string(),
            source,
        };

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::not_found(format!("item {}", id)))
            }
            Err(e) => return Err(storage(e)),
        };

        log::debug!("reading item {} from {}", id, path.display());
        serde_json::from_reader(BufReader::new(file)).map_err(|e| storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_item_documents() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{"id": "abc-1", "bundles": [{"name": "ORIGINAL"}]}"#;
        std::fs::write(dir.path().join("abc-1.json"), json).unwrap();

        let store = DirectoryStore::new(dir.path());
        let item = store.item("abc-1").unwrap();
        assert_eq!(item.id, "abc-1");
        assert_eq!(item.bundles[0].name, "ORIGINAL");
    }

    #[test]
    fn missing_and_invalid_ids_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        assert!(matches!(store.item("nope"), Err(Error::NotFound(..))));
        assert!(matches!(store.item("../etc/passwd"), Err(Error::NotFound(..))));
        assert!(matches!(store.item(""), Err(Error::NotFound(..))));
    }

    #[test]
    fn corrupt_documents_are_storage_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert!(matches!(store.item("bad"), Err(Error::Storage { .. })));
    }
}
