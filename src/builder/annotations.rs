// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::ids::{self, Identifiers};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::repository::fields;
use crate::formats::{Annotation, AnnotationList, Bitstream, Body, Bundle, ExternalLink, Item};
use crate::formats::{ListReference, Motivation, Resources, Type};

const SEE_ALSO_LABEL: &str = "Companion files";
const RELATED_LABEL: &str = "Item page";

/// Bundles holding companion files (e.g. METS/ALTO) of an item
pub fn see_also_bundles<'a>(config: &'a Config, item: &'a Item) -> impl Iterator<Item = &'a Bundle> {
    item.bundles.iter().filter(move |b| {
        b.is_enabled() && b.name.eq_ignore_ascii_case(&config.document.see_also_bundle)
    })
}

fn companions<'a>(config: &'a Config, item: &'a Item) -> impl Iterator<Item = &'a Bitstream> {
    see_also_bundles(config, item)
        .flat_map(|b| b.bitstreams.iter())
        .filter(|b| b.is_enabled())
}

pub fn has_see_also(config: &Config, item: &Item) -> bool {
    companions(config, item).next().is_some()
}

/// One linking annotation per companion file
pub fn see_also_list(config: &Config, ids: &Identifiers, item: &Item) -> AnnotationList {
    let mut list = AnnotationList::new(ids.see_also());

    for file in companions(config, item) {
        let link = ExternalLink {
            id: ids::content(&config.links, &file.id),
            label: Some(file.name().into()),
            format: Some(file.mime_type.clone()),
        };

        list.push(Annotation::new(
            Motivation::Linking,
            Body::Link(link),
            ids.manifest(),
        ));
    }

    list
}

pub fn see_also_link(ids: &Identifiers) -> ListReference {
    ListReference {
        id: ids.see_also(),
        kind: Type::AnnotationList,
        label: SEE_ALSO_LABEL.into(),
    }
}

pub fn related(config: &Config, item: &Item) -> ExternalLink {
    ExternalLink {
        id: ids::related(&config.links, &item.id),
        label: Some(RELATED_LABEL.into()),
        format: Some("text/html".into()),
    }
}

/// Annotations stored with a page image, passed through as they are
pub fn image_annotations(ids: &Identifiers, file: &Bitstream) -> Result<AnnotationList> {
    let stored = file
        .metadata
        .first(fields::ANNOTATIONS)
        .ok_or_else(|| Error::not_found(format!("annotations for bitstream {}", file.id)))?;

    let mut list = AnnotationList::new(ids.image_annotations(&file.id));
    list.resources = Resources::Stored(serde_json::from_str(stored)?);
    Ok(list)
}
