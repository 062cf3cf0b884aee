// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::config::{FieldKey, FieldSpec};
use crate::formats::{Bitstream, Metadata, MetadataEntry};

use std::collections::HashMap;

/// A computed bitstream field
pub trait VirtualField {
    fn supply(&self, bitstream: &Bitstream) -> Vec<String>;
}

impl<F: Fn(&Bitstream) -> Vec<String>> VirtualField for F {
    fn supply(&self, bitstream: &Bitstream) -> Vec<String> {
        self(bitstream)
    }
}

/// Virtual fields by name
#[derive(Default)]
pub struct Registry {
    fields: HashMap<String, Box<dyn VirtualField>>,
}

impl Registry {
    /// The fields available to every configuration
    pub fn standard() -> Self {
        let mut registry = Self::default();

        registry.register("format", |b: &Bitstream| -> Vec<String> {
            b.format.iter().cloned().collect()
        });
        registry.register("mimetype", |b: &Bitstream| vec![b.mime_type.clone()]);
        registry.register("bytes", |b: &Bitstream| vec![format!("{} bytes", b.size_bytes)]);
        registry.register("checksum", |b: &Bitstream| -> Vec<String> {
            b.checksum
                .iter()
                .map(|c| format!("{} ({})", c.value, c.algorithm.to_uppercase()))
                .collect()
        });

        registry
    }

    pub fn register(&mut self, name: &str, field: impl VirtualField + 'static) {
        self.fields.insert(name.into(), Box::new(field));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn supply(&self, name: &str, bitstream: &Bitstream) -> Vec<String> {
        match self.fields.get(name) {
            Some(field) => field.supply(bitstream),
            None => Vec::new(),
        }
    }
}

fn stored(metadata: &Metadata, key: &FieldKey) -> Vec<String> {
    match key {
        FieldKey::Literal(name) => metadata.values(name).map(Into::into).collect(),
        FieldKey::Virtual(..) => Vec::new(),
    }
}

/// Metadata entries for an item, in configured order
pub fn item_entries(specs: &[FieldSpec], metadata: &Metadata) -> Vec<MetadataEntry> {
    specs
        .iter()
        .filter_map(|spec| MetadataEntry::new(&spec.label, stored(metadata, &spec.field)))
        .collect()
}

/// Metadata entries for a bitstream, in configured order
pub fn bitstream_entries(
    specs: &[FieldSpec],
    registry: &Registry,
    bitstream: &Bitstream,
) -> Vec<MetadataEntry> {
    specs
        .iter()
        .filter_map(|spec| {
            let values = match &spec.field {
                FieldKey::Virtual(name) => registry.supply(name, bitstream),
                key => stored(&bitstream.metadata, key),
            };

            MetadataEntry::new(&spec.label, values)
        })
        .collect()
}
