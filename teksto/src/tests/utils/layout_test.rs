// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{Layout, VisualCursor};
use crate::model::{ModelCursor, TextModel};
use crate::style::{Alignment, StyleOverride};

use super::FixedMeasure;

/// A model/layout pair built with [`FixedMeasure`], with assertion
/// helpers that print the offending block and line on failure rather
/// than leaving the reader to decode raw indices.
pub(crate) struct LayoutTest {
    model: TextModel,
    layout: Layout,
}

impl LayoutTest {
    pub(crate) fn new(model: TextModel, width: f32) -> Self {
        let layout = Layout::build(&model, width, &mut FixedMeasure);
        Self { model, layout }
    }

    pub(crate) fn from_text(text: &str, width: f32) -> Self {
        Self::new(TextModel::from_text(text), width)
    }

    pub(crate) fn model(&self) -> &TextModel {
        &self.model
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The lines of one block, each as its concatenated span text.
    pub(crate) fn block_lines(&self, block: usize) -> Vec<String> {
        self.layout
            .get(block)
            .map(|block| {
                block
                    .lines
                    .iter()
                    .map(|line| {
                        line.spans
                            .iter()
                            .map(|span| span.text.as_str())
                            .collect::<String>()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every laid-out char in order, blocks joined with `'\n'`. Equal to
    /// the model's text whenever wrapping dropped nothing.
    pub(crate) fn visual_text(&self) -> String {
        let blocks: Vec<String> = (0..self.layout.len())
            .map(|block| self.block_lines(block).concat())
            .collect();
        blocks.join("\n")
    }

    #[track_caller]
    pub(crate) fn assert_lines(&self, block: usize, expected: &[&str]) {
        let actual = self.block_lines(block);
        assert_eq!(
            actual, expected,
            "block {block} wrapped differently than expected"
        );
    }

    /// Maps every canonical model position into the layout and back,
    /// asserting everything resolves and nothing drifts.
    #[track_caller]
    pub(crate) fn assert_round_trip(&self) {
        for (block_index, block) in self.model.blocks.iter().enumerate() {
            for (span_index, span) in block.spans.iter().enumerate() {
                for offset in 0..=span.char_len() {
                    let cursor = ModelCursor::new(block_index, span_index, offset)
                        .canonical(&self.model);
                    let Some(visual) = VisualCursor::from_model(&self.layout, cursor) else {
                        panic!("{cursor:?} did not resolve against its own layout");
                    };
                    let back = visual.to_model(&self.layout, &self.model);
                    assert_eq!(
                        back,
                        Some(cursor),
                        "round trip drifted for {cursor:?} via {visual:?}"
                    );
                }
            }
        }
    }
}

/// Override that pins the alignment to the left edge, so horizontal
/// positions in tests start at zero.
pub(crate) fn left_aligned() -> StyleOverride {
    StyleOverride {
        alignment: Some(Alignment::Left),
        ..Default::default()
    }
}

/// Override carrying only a font size.
pub(crate) fn sized(font_size: f32) -> StyleOverride {
    StyleOverride {
        font_size: Some(font_size),
        ..Default::default()
    }
}
