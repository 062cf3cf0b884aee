// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use crate::formats::{repository::fields, Bitstream, Range};

use indexmap::IndexMap;

const ROOT_LABEL: &str = "Table of Contents";

/// Grows the table of contents one file at a time
///
/// Nodes are keyed by their joined segment path, so a path seen twice always
/// lands on the same node.
#[derive(Clone, Debug)]
pub struct TocRangeBuilder {
    separator: String,
    root: Range,
    nodes: IndexMap<String, Range>,
}

impl TocRangeBuilder {
    pub fn new(separator: &str) -> Self {
        Self {
            separator: separator.into(),
            root: Self::top(String::new()),
            nodes: IndexMap::new(),
        }
    }

    fn top(id: String) -> Range {
        let mut root = Range::new(id, ROOT_LABEL);
        root.viewing_hint = Some("top".into());
        root
    }

    /// Starts a fresh tree below a root with the given id
    pub fn set_root(&mut self, id: String) {
        self.root = Self::top(id);
        self.nodes.clear();
    }

    /// Files this canvas under each of the file's labels
    ///
    /// With a bundle prefix, labels are placed below the prefix node and a
    /// file without any label is attached to the prefix node itself.
    pub fn update(&mut self, file: &Bitstream, prefix: Option<&str>, canvas: &str) {
        let labels: Vec<&str> = file.metadata.all(fields::TOC).collect();

        match (prefix, labels.is_empty()) {
            (None, _) => {
                for label in labels {
                    self.attach(label, canvas);
                }
            }

            (Some(prefix), true) => self.attach(prefix, canvas),

            (Some(prefix), false) => {
                for label in labels {
                    let label = format!("{}{}{}", prefix, self.separator, label);
                    self.attach(&label, canvas);
                }
            }
        }
    }

    fn node(&mut self, path: &str) -> &mut Range {
        match self.nodes.get_mut(path) {
            Some(node) => node,
            None => &mut self.root,
        }
    }

    fn attach(&mut self, label: &str, canvas: &str) {
        let separator = self.separator.clone();
        let mut path = String::new();

        for segment in label.split(separator.as_str()).filter(|s| !s.is_empty()) {
            let parent = path.clone();
            if !path.is_empty() {
                path.push_str(&separator);
            }
            path.push_str(segment);

            if self.nodes.contains_key(&path) {
                continue;
            }

            let parent = self.node(&parent);
            let id = format!("{}-{}", parent.id, parent.ranges.len());
            parent.ranges.push(id.clone());
            self.nodes.insert(path.clone(), Range::new(id, segment));
        }

        if path.is_empty() {
            return;
        }

        let node = self.node(&path);
        if !node.canvases.iter().any(|c| c == canvas) {
            node.canvases.push(canvas.into());
        }
    }

    /// The root and every other node by id, in creation order
    pub fn finish(self) -> (Range, IndexMap<String, Range>) {
        let nodes = self
            .nodes
            .into_values()
            .map(|node| (node.id.clone(), node))
            .collect();

        (self.root, nodes)
    }
}
