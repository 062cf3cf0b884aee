// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2021 Profian, Inc.

use super::canvas::CanvasBuilder;
use super::ranges::TocRangeBuilder;
use crate::error::Result;
use crate::formats::{Bitstream, Canvas, Sequence, Type};

/// Numbers canvases in the order their files are handed over
pub struct SequenceBuilder<'a> {
    builder: CanvasBuilder<'a>,
    canvases: Vec<Canvas>,
}

impl<'a> SequenceBuilder<'a> {
    pub fn new(builder: CanvasBuilder<'a>) -> Self {
        Self {
            builder,
            canvases: Vec::new(),
        }
    }

    /// The position the next canvas will take
    pub fn position(&self) -> usize {
        self.canvases.len()
    }

    /// Builds the next canvas and files it in the table of contents
    pub fn add_canvas(
        &mut self,
        file: &Bitstream,
        prefix: Option<&str>,
        ranges: &mut TocRangeBuilder,
    ) -> Result<&Canvas> {
        let position = self.position();
        let canvas = self.builder.build(file, position)?;
        ranges.update(file, prefix, &canvas.id);

        self.canvases.push(canvas);
        Ok(&self.canvases[position])
    }

    pub fn finish(self, id: String) -> Sequence {
        Sequence {
            id,
            kind: Type::Sequence,
            canvases: self.canvases,
        }
    }
}
