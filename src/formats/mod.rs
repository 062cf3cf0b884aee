// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

pub mod annotation;
pub mod highlight;
pub mod presentation;
pub mod repository;

pub use self::annotation::{Annotation, AnnotationList, Body, Motivation, Resources, Within};
pub use self::presentation::{
    Canvas, ExternalLink, ImageContent, ImageService, ListReference, Manifest, MetadataEntry,
    Range, SearchService, Sequence, Type,
};
pub use self::repository::{Bitstream, Bundle, FieldName, Item, Metadata};
