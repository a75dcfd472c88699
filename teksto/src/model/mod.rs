// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editable text model.
//!
//! [`TextModel`] is the authoritative document: ordered [`Block`]s
//! (paragraphs), each an ordered list of styled [`Span`]s. Mutations keep
//! the model normalized — every block holds at least one span, a span is
//! empty only when it is alone in its block, and adjacent spans with equal
//! overrides are merged — so span count stays bounded by the number of
//! distinct style runs rather than by edit history.
//!
//! All mutations are total: cursor arguments are canonicalized (and
//! clamped) on entry, results are canonical, and operations at the
//! document boundaries are defined no-ops.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::style::StyleOverride;
use crate::util;

mod cursor;

pub use cursor::{ModelCursor, ModelSelection};

/// A run of text sharing one style override.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// The span's text. Paragraph breaks are block boundaries, never
    /// characters in a span.
    pub text: String,
    /// Style layered over the block's and the document's.
    pub style: StyleOverride,
}

impl Span {
    /// Creates a span with no style override.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleOverride::default(),
        }
    }

    /// Creates a span with the given style override.
    pub fn styled(text: impl Into<String>, style: StyleOverride) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Number of `char`s in the span's text.
    pub fn char_len(&self) -> usize {
        util::char_len(&self.text)
    }
}

/// A paragraph: a style override plus an ordered list of spans.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// Style layered over the document's for every span in the block.
    pub style: StyleOverride,
    /// The block's spans. At least one after normalization.
    pub spans: Vec<Span>,
}

impl Block {
    /// A block holding the given spans, with no block-level override.
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            style: StyleOverride::default(),
            spans,
        }
    }

    /// An empty paragraph: a single span with empty text.
    pub fn empty() -> Self {
        Self::new(vec![Span::default()])
    }

    /// The block's text, concatenated across spans.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            out.push_str(&span.text);
        }
        out
    }

    /// Number of `char`s across all spans.
    pub fn char_len(&self) -> usize {
        self.spans.iter().map(Span::char_len).sum()
    }
}

/// The authoritative rich text document.
///
/// Plain nested data, suitable for direct inclusion in a larger scene
/// document. The engine mutates it in place through the methods below and
/// never retains references into it across operations.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextModel {
    /// Document-level style override, the lowest cascade layer above the
    /// built-in fallback.
    pub style: StyleOverride,
    /// The document's blocks, in order.
    pub blocks: Vec<Block>,
}

impl TextModel {
    /// An empty document: one empty block.
    pub fn new() -> Self {
        Self {
            style: StyleOverride::default(),
            blocks: vec![Block::empty()],
        }
    }

    /// Builds a document from plain text, splitting blocks on `'\n'`.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| Block::new(vec![Span::plain(line)]))
            .collect();
        Self {
            style: StyleOverride::default(),
            blocks,
        }
    }

    /// The full document text, blocks joined with `'\n'`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for span in &block.spans {
                out.push_str(&span.text);
            }
        }
        out
    }

    /// The canonical position at the very end of the document.
    pub fn end(&self) -> ModelCursor {
        let block = self.blocks.len().saturating_sub(1);
        let span = self
            .blocks
            .last()
            .map(|block| block.spans.len().saturating_sub(1))
            .unwrap_or(0);
        let offset = self
            .blocks
            .last()
            .and_then(|block| block.spans.last())
            .map(Span::char_len)
            .unwrap_or(0);
        ModelCursor::new(block, span, offset)
    }

    /// Restores the model invariants after a structural mutation.
    ///
    /// Per block: drops empty spans, merges adjacent spans whose overrides
    /// compare equal, and re-inserts a single empty span (carrying the
    /// last span's override) if the block ends up with none. Blocks are
    /// never dropped here. Idempotent.
    pub fn normalize(&mut self) {
        for block in &mut self.blocks {
            let placeholder_style = block.spans.last().map(|span| span.style.clone());
            let mut merged: Vec<Span> = Vec::with_capacity(block.spans.len());
            for span in block.spans.drain(..) {
                if span.text.is_empty() {
                    continue;
                }
                match merged.last_mut() {
                    Some(last) if last.style == span.style => last.text.push_str(&span.text),
                    _ => merged.push(span),
                }
            }
            if merged.is_empty() {
                merged.push(Span {
                    text: String::new(),
                    style: placeholder_style.unwrap_or_default(),
                });
            }
            block.spans = merged;
        }
    }

    /// Splices `ch` into the span text under `cursor` and returns the
    /// cursor advanced by one step of horizontal motion, so the result is
    /// canonical at span and block boundaries.
    pub fn insert_char(&mut self, cursor: ModelCursor, ch: char) -> ModelCursor {
        let cursor = cursor.canonical(self);
        let Some(span) = self
            .blocks
            .get_mut(cursor.block)
            .and_then(|block| block.spans.get_mut(cursor.span))
        else {
            return cursor;
        };
        let at = util::byte_index(&span.text, cursor.offset);
        span.text.insert(at, ch);
        cursor.move_by(self, 1)
    }

    /// Removes the character before `cursor` (backspace) and returns the
    /// position the cursor lands on.
    ///
    /// At the document start this is a no-op returning the input. When the
    /// preceding position sits in the previous block, the two blocks are
    /// joined: the current block's spans are appended onto the previous
    /// block and the block goes away. The returned cursor is computed
    /// before the mutation, so it stays correct when re-normalization
    /// merges or drops spans around the join.
    pub fn delete_char(&mut self, cursor: ModelCursor) -> ModelCursor {
        let cursor = cursor.canonical(self);
        if cursor == ModelCursor::default() {
            return cursor;
        }
        let target = cursor.move_by(self, -1);
        if target.block == cursor.block && target.span == cursor.span {
            // Both ends of the deleted character sit in one span.
            if let Some(span) = self
                .blocks
                .get_mut(cursor.block)
                .and_then(|block| block.spans.get_mut(cursor.span))
            {
                if cursor.offset > 0 {
                    let at = util::byte_index(&span.text, cursor.offset - 1);
                    span.text.remove(at);
                }
            }
        } else if target.block == cursor.block {
            // The cursor sits just past the first character of a later
            // span; that character is the one logically before it.
            if let Some(span) = self
                .blocks
                .get_mut(cursor.block)
                .and_then(|block| block.spans.get_mut(cursor.span))
            {
                if !span.text.is_empty() {
                    span.text.remove(0);
                }
            }
        } else {
            // Block start: fold this block into the previous one.
            let removed = self.blocks.remove(cursor.block);
            if let Some(prev) = self.blocks.get_mut(cursor.block - 1) {
                prev.spans.extend(removed.spans);
            }
        }
        self.normalize();
        target.canonical(self)
    }

    /// Splits the block at `cursor` into two (the Enter key).
    ///
    /// Spans before the split stay; spans after move to a new following
    /// block. A side left with zero spans receives an empty placeholder
    /// span inheriting the split span's override, so typing continues with
    /// the same formatting. Both halves keep the block-level override.
    /// Returns the start of the new block.
    pub fn split_block(&mut self, cursor: ModelCursor) -> ModelCursor {
        let cursor = cursor.canonical(self);
        let Some(block) = self.blocks.get_mut(cursor.block) else {
            return cursor;
        };
        let placeholder_style = block
            .spans
            .get(cursor.span)
            .map(|span| span.style.clone())
            .unwrap_or_default();

        let mut before: Vec<Span> = Vec::with_capacity(cursor.span + 1);
        let mut after: Vec<Span> = Vec::new();
        for (i, span) in block.spans.drain(..).enumerate() {
            if i < cursor.span {
                before.push(span);
            } else if i == cursor.span {
                let (left, right) = util::split_at_char(&span.text, cursor.offset);
                if !left.is_empty() {
                    before.push(Span::styled(String::from(left), span.style.clone()));
                }
                if !right.is_empty() {
                    after.push(Span::styled(String::from(right), span.style.clone()));
                }
            } else {
                after.push(span);
            }
        }
        if before.is_empty() {
            before.push(Span {
                text: String::new(),
                style: placeholder_style.clone(),
            });
        }
        if after.is_empty() {
            after.push(Span {
                text: String::new(),
                style: placeholder_style,
            });
        }

        let style = block.style.clone();
        block.spans = before;
        self.blocks
            .insert(cursor.block + 1, Block { style, spans: after });
        ModelCursor::new(cursor.block + 1, 0, 0)
    }

    /// Deletes everything between the selection's endpoints and returns
    /// the canonical collapsed position.
    ///
    /// The endpoints' spans are split exactly at their offsets so the
    /// range aligns with span boundaries; the start block keeps its prefix
    /// and gains the end block's suffix; interior blocks collapse. The
    /// merged block keeps the start block's override. A collapsed
    /// selection deletes nothing.
    pub fn delete_selection(&mut self, selection: &ModelSelection) -> ModelCursor {
        let anchor = selection.anchor.canonical(self);
        let caret = selection.caret().canonical(self);
        let (start, mut end) = if caret < anchor {
            (caret, anchor)
        } else {
            (anchor, caret)
        };
        if start == end {
            return start;
        }

        // Split the later endpoint first; splitting the earlier one then
        // shifts the end's span index when both share a block.
        end = self.split_span_at(end);
        let start = self.split_span_at(start);
        if end.block == start.block {
            end.span += 1;
        }

        let Some(end_block) = self.blocks.get(end.block) else {
            return start;
        };
        let suffix: Vec<Span> = end_block
            .spans
            .get(end.span + 1..)
            .unwrap_or_default()
            .to_vec();
        let Some(start_block) = self.blocks.get(start.block) else {
            return start;
        };
        let mut spans: Vec<Span> = start_block
            .spans
            .get(..=start.span)
            .unwrap_or_default()
            .to_vec();
        spans.extend(suffix);
        let style = start_block.style.clone();

        self.blocks
            .splice(start.block..=end.block, [Block { style, spans }]);
        self.normalize();
        start.canonical(self)
    }

    /// Deletes the selection, then inserts `ch` at the collapsed position.
    pub fn replace_selection(&mut self, selection: &ModelSelection, ch: char) -> ModelCursor {
        let cursor = self.delete_selection(selection);
        self.insert_char(cursor, ch)
    }

    /// Splits the span under `cursor` into two at its offset, keeping
    /// both halves in place (either may be empty, pending normalization).
    /// The returned cursor addresses the end of the left half and equals
    /// the input numerically.
    fn split_span_at(&mut self, cursor: ModelCursor) -> ModelCursor {
        let Some(block) = self.blocks.get_mut(cursor.block) else {
            return cursor;
        };
        let Some(span) = block.spans.get(cursor.span) else {
            return cursor;
        };
        let (left, right) = util::split_at_char(&span.text, cursor.offset);
        let left_span = Span::styled(String::from(left), span.style.clone());
        let right_span = Span::styled(String::from(right), span.style.clone());
        block.spans[cursor.span] = left_span;
        block.spans.insert(cursor.span + 1, right_span);
        cursor
    }
}
