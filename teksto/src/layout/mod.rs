// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual layout.
//!
//! [`Layout`] is the word-wrapped rendering of a [`TextModel`] at one
//! container width: blocks, their wrapped lines, and the visual spans on
//! each line with geometry and per-character offset tables. It is derived,
//! disposable state — rebuilt from the model on every layout-affecting
//! change, never mutated in place — and every coordinate is local to the
//! container; placing the container in a wider scene is the renderer's
//! business.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::measure::Measure;
use crate::model::{Block, TextModel};
use crate::style::{StyleOverride, TextStyle, resolve};

mod cursor;
mod wrap;

pub use cursor::{VisualCursor, VisualSelection};

/// Vertical gap between consecutive blocks.
pub const BLOCK_GAP: f32 = 16.0;

/// A word-wrapped rendering of a text model at one container width.
#[derive(Clone, Default, Debug)]
pub struct Layout {
    blocks: Vec<VisualBlock>,
    width: f32,
    height: f32,
}

impl Layout {
    /// Builds the layout for `model` at container width `width`,
    /// measuring text through `measure`.
    pub fn build<M: Measure>(model: &TextModel, width: f32, measure: &mut M) -> Self {
        let none = StyleOverride::new();
        let mut blocks = Vec::with_capacity(model.blocks.len());
        let mut y = 0.0;
        for block in &model.blocks {
            let style = resolve(&model.style, &block.style, &none);
            let visual = VisualBlock::build(block, style, y, width, measure);
            y += visual.height + BLOCK_GAP;
            blocks.push(visual);
        }
        let height = blocks
            .last()
            .map(|block| block.y + block.height)
            .unwrap_or(0.0);
        Self {
            blocks,
            width,
            height,
        }
    }

    /// Container width the layout was built for.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Bottom edge of the last block.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the layout has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block at `index`.
    pub fn get(&self, index: usize) -> Option<&VisualBlock> {
        self.blocks.get(index)
    }

    /// Iterator over the blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &VisualBlock> + '_ + Clone {
        self.blocks.iter()
    }
}

/// One paragraph of the layout.
#[derive(Clone, Debug)]
pub struct VisualBlock {
    /// Top edge in document space.
    pub y: f32,
    /// Content height; the inter-block gap is not included.
    pub height: f32,
    /// The block's resolved style.
    pub style: TextStyle,
    /// The wrapped lines, top to bottom. Never empty.
    pub lines: Vec<VisualLine>,
}

impl VisualBlock {
    fn build<M: Measure>(
        block: &Block,
        style: TextStyle,
        y: f32,
        width: f32,
        measure: &mut M,
    ) -> Self {
        let mut lines = wrap::break_spans(&block.spans, &style, width, measure);
        if lines.is_empty() {
            // A block that yields no lines still occupies one empty line,
            // so its vertical extent is never zero.
            lines.push(VisualLine {
                y: 0.0,
                height: style.font_size * style.line_height,
                offset: 0.0,
                advance: 0.0,
                spans: vec![VisualSpan::empty(style.clone())],
            });
        }
        let height = lines
            .last()
            .map(|line| line.y + line.height)
            .unwrap_or(0.0);
        Self {
            y,
            height,
            style,
            lines,
        }
    }
}

/// One wrapped line of a block.
#[derive(Clone, Debug)]
pub struct VisualLine {
    /// Top edge relative to the block.
    pub y: f32,
    /// Line box height: the block's line-height multiplier times the
    /// largest font size on the line.
    pub height: f32,
    /// Alignment shift from the container's left edge. May be negative
    /// when a single word overflows the container.
    pub offset: f32,
    /// Summed width of the line's spans, before alignment.
    pub advance: f32,
    /// The line's visual spans, left to right.
    pub spans: Vec<VisualSpan>,
}

/// A contiguous, non-wrapping slice of one model span's text.
#[derive(Clone, Debug)]
pub struct VisualSpan {
    /// The slice's text.
    pub text: String,
    /// The resolved style it renders with.
    pub style: TextStyle,
    /// Left edge relative to the line's alignment offset.
    pub x: f32,
    /// Measured width.
    pub width: f32,
    /// `char_offsets[i]` is the measured width of `text[0..i)` in chars;
    /// one entry per char boundary, so always `char_len() + 1` entries.
    pub char_offsets: Vec<f32>,
    /// Index of the model span this slice came from.
    pub parent_span: usize,
    /// Char offset of the slice's first char within the parent span.
    pub start_in_parent: usize,
}

impl VisualSpan {
    fn empty(style: TextStyle) -> Self {
        Self {
            text: String::new(),
            style,
            x: 0.0,
            width: 0.0,
            char_offsets: vec![0.0],
            parent_span: 0,
            start_in_parent: 0,
        }
    }

    /// Number of chars in the slice.
    pub fn char_len(&self) -> usize {
        self.char_offsets.len().saturating_sub(1)
    }

    /// The char range this slice covers within its parent model span.
    pub fn parent_range(&self) -> Range<usize> {
        self.start_in_parent..self.start_in_parent + self.char_len()
    }
}
