// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor and selection positions in model coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Span, TextModel};

/// A position in the text model, independent of wrapping.
///
/// `offset` counts `char`s and ranges over `[0, span length]`, so a span
/// boundary can be addressed from either side. The canonical form always
/// expresses it as the end of the earlier span: see
/// [`canonical`](Self::canonical). The derived ordering is document order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelCursor {
    /// Index of the block.
    pub block: usize,
    /// Index of the span within the block.
    pub span: usize,
    /// `char` offset within the span.
    pub offset: usize,
}

impl ModelCursor {
    /// Creates a cursor from its raw parts.
    pub fn new(block: usize, span: usize, offset: usize) -> Self {
        Self {
            block,
            span,
            offset,
        }
    }

    /// Re-expresses the cursor in canonical form against `model`.
    ///
    /// A cursor at offset 0 of a later span becomes the end of the
    /// previous span, so "start of span N" and "end of span N−1" have one
    /// representation. Out-of-range indices are clamped into the model
    /// first; they are a caller contract violation, not an error state.
    pub fn canonical(&self, model: &TextModel) -> Self {
        if model.blocks.is_empty() {
            return Self::default();
        }
        let block_index = self.block.min(model.blocks.len() - 1);
        let block = &model.blocks[block_index];
        if block.spans.is_empty() {
            return Self::new(block_index, 0, 0);
        }
        let span_index = self.span.min(block.spans.len() - 1);
        let offset = self.offset.min(block.spans[span_index].char_len());
        if offset == 0 && span_index > 0 {
            let prev = &block.spans[span_index - 1];
            return Self::new(block_index, span_index - 1, prev.char_len());
        }
        Self::new(block_index, span_index, offset)
    }

    /// Moves the cursor by `delta` character steps and returns the
    /// canonical result, saturating at the document boundaries.
    ///
    /// One step crosses one logical position: within a span it shifts the
    /// offset, at a span end it consumes the next span's first character,
    /// and at a block end it lands on the next block's start (the
    /// paragraph break costs one step).
    pub fn move_by(&self, model: &TextModel, delta: isize) -> Self {
        let mut cursor = self.canonical(model);
        let mut remaining = delta;
        while remaining != 0 {
            let Some(block) = model.blocks.get(cursor.block) else {
                break;
            };
            let Some(span) = block.spans.get(cursor.span) else {
                break;
            };
            if remaining > 0 {
                if cursor.offset < span.char_len() {
                    cursor.offset += 1;
                } else if cursor.span + 1 < block.spans.len() {
                    cursor.span += 1;
                    cursor.offset = 1;
                } else if cursor.block + 1 < model.blocks.len() {
                    cursor.block += 1;
                    cursor.span = 0;
                    cursor.offset = 0;
                } else {
                    break;
                }
                remaining -= 1;
            } else {
                if cursor.offset > 0 {
                    cursor.offset -= 1;
                } else if cursor.span > 0 {
                    cursor.span -= 1;
                    cursor.offset = block.spans[cursor.span].char_len().saturating_sub(1);
                } else if cursor.block > 0 {
                    cursor.block -= 1;
                    let prev = &model.blocks[cursor.block];
                    cursor.span = prev.spans.len().saturating_sub(1);
                    cursor.offset = prev.spans.last().map(Span::char_len).unwrap_or(0);
                } else {
                    break;
                }
                remaining += 1;
            }
        }
        cursor.canonical(model)
    }
}

/// An anchor/focus pair in model coordinates.
///
/// `focus == None` is a collapsed caret at the anchor. The stored pair is
/// deliberately unordered so an ongoing drag keeps extending from its
/// original anchor; [`normalized`](Self::normalized) gives the
/// document-ordered view without touching the stored endpoints.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelSelection {
    /// The fixed end, where the selection began.
    pub anchor: ModelCursor,
    /// The moving end, or `None` for a caret.
    pub focus: Option<ModelCursor>,
}

impl ModelSelection {
    /// A caret at `cursor`.
    pub fn collapsed(cursor: ModelCursor) -> Self {
        Self {
            anchor: cursor,
            focus: None,
        }
    }

    /// A selection from `anchor` to `focus`.
    pub fn new(anchor: ModelCursor, focus: ModelCursor) -> Self {
        Self {
            anchor,
            focus: Some(focus),
        }
    }

    /// Returns `true` if the selection is a caret or both ends coincide.
    pub fn is_collapsed(&self) -> bool {
        match self.focus {
            None => true,
            Some(focus) => focus == self.anchor,
        }
    }

    /// The moving end if present, otherwise the anchor.
    pub fn caret(&self) -> ModelCursor {
        self.focus.unwrap_or(self.anchor)
    }

    /// The endpoints in document order, as `(first, last)`.
    pub fn normalized(&self) -> (ModelCursor, ModelCursor) {
        let (anchor, caret) = (self.anchor, self.caret());
        if caret < anchor {
            (caret, anchor)
        } else {
            (anchor, caret)
        }
    }

    /// Moves the focus to `cursor`, or collapses onto it when `extend` is
    /// `false`.
    pub fn maybe_extend(&self, cursor: ModelCursor, extend: bool) -> Self {
        if extend {
            Self {
                anchor: self.anchor,
                focus: Some(cursor),
            }
        } else {
            Self::collapsed(cursor)
        }
    }
}

impl From<ModelCursor> for ModelSelection {
    fn from(cursor: ModelCursor) -> Self {
        Self::collapsed(cursor)
    }
}
