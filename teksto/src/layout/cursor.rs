// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor positions and selections in visual coordinates.

use alloc::vec::Vec;
use peniko::kurbo::Rect;

use super::{Layout, VisualBlock, VisualLine, VisualSpan};
use crate::model::{ModelCursor, ModelSelection, TextModel};

/// A position within a [`Layout`]: a char boundary inside one visual span
/// of one wrapped line.
///
/// Visual cursors address a particular layout and go stale when the
/// layout is rebuilt; convert through [`VisualCursor::to_model`] to carry
/// a position across edits. The derived ordering is visual document
/// order, top to bottom and left to right.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
pub struct VisualCursor {
    /// Block index in the layout.
    pub block: usize,
    /// Line index within the block.
    pub line: usize,
    /// Visual span index within the line.
    pub span: usize,
    /// Char offset within the visual span.
    pub offset: usize,
}

impl VisualCursor {
    /// Creates a cursor from raw indices.
    pub fn new(block: usize, line: usize, span: usize, offset: usize) -> Self {
        Self {
            block,
            line,
            span,
            offset,
        }
    }

    /// Maps a model position into `layout`.
    ///
    /// Scans the block's lines for the visual span that carries the
    /// cursor's parent span and covers its offset; where the offset sits
    /// on the seam between two slices of a span the earlier slice wins
    /// and normalization settles the result.
    ///
    /// Returns `None` when the position does not resolve, which means
    /// the layout is stale with respect to the cursor; the caller should
    /// rebuild it and re-derive, never treat this as fatal.
    pub fn from_model(layout: &Layout, cursor: ModelCursor) -> Option<Self> {
        let block = layout.get(cursor.block)?;
        for (line_index, line) in block.lines.iter().enumerate() {
            for (span_index, span) in line.spans.iter().enumerate() {
                if span.parent_span != cursor.span {
                    continue;
                }
                let start = span.start_in_parent;
                if cursor.offset >= start && cursor.offset <= start + span.char_len() {
                    return Some(
                        Self {
                            block: cursor.block,
                            line: line_index,
                            span: span_index,
                            offset: cursor.offset - start,
                        }
                        .normalize(layout),
                    );
                }
            }
        }
        None
    }

    /// Maps this position back to model coordinates, in canonical form.
    ///
    /// Returns `None` when the visual indices are out of range for
    /// `layout`, the symmetric staleness signal to
    /// [`from_model`](Self::from_model).
    pub fn to_model(&self, layout: &Layout, model: &TextModel) -> Option<ModelCursor> {
        let span = layout
            .get(self.block)?
            .lines
            .get(self.line)?
            .spans
            .get(self.span)?;
        Some(
            ModelCursor::new(
                self.block,
                span.parent_span,
                span.start_in_parent + self.offset,
            )
            .canonical(model),
        )
    }

    /// Resolves the position under a point in container coordinates.
    ///
    /// Total: every point maps to some position. Points above, below, or
    /// beside the laid-out text clamp to the nearest block, line, and
    /// span; a point in the gap between two blocks resolves to the
    /// following block.
    pub fn from_point(layout: &Layout, x: f32, y: f32) -> Self {
        let block_index = block_for_y(layout, y);
        let Some(block) = layout.get(block_index) else {
            return Self::default();
        };
        let line_index = line_for_y(block, y - block.y);
        let Some(line) = block.lines.get(line_index) else {
            return Self::default();
        };
        let line_x = x - line.offset;
        let span_index = span_for_x(line, line_x);
        let Some(span) = line.spans.get(span_index) else {
            return Self::default();
        };
        Self {
            block: block_index,
            line: line_index,
            span: span_index,
            offset: offset_for_x(span, line_x - span.x),
        }
        .normalize(layout)
    }

    /// Reseats a position that rests at the very end of a non-final line
    /// onto the start of the next line, so that every position between
    /// two wrapped lines has exactly one representation.
    pub fn normalize(&self, layout: &Layout) -> Self {
        let Some(line) = self.line_in(layout) else {
            return *self;
        };
        let at_line_end = line
            .spans
            .last()
            .is_some_and(|span| self.span + 1 == line.spans.len() && self.offset == span.char_len());
        let has_next_line = layout
            .get(self.block)
            .is_some_and(|block| self.line + 1 < block.lines.len());
        if at_line_end && has_next_line {
            return Self {
                block: self.block,
                line: self.line + 1,
                span: 0,
                offset: 0,
            };
        }
        *self
    }

    /// Moves to char 0 of the current line.
    pub fn line_start(&self) -> Self {
        Self {
            block: self.block,
            line: self.line,
            span: 0,
            offset: 0,
        }
    }

    /// Moves to the last addressable position of the current line: past
    /// the final char on the block's last line, before it otherwise (the
    /// position past it belongs to the next line).
    pub fn line_end(&self, layout: &Layout) -> Self {
        let Some(block) = layout.get(self.block) else {
            return *self;
        };
        let Some(line) = block.lines.get(self.line) else {
            return *self;
        };
        let is_final = self.line + 1 == block.lines.len();
        let offset = line
            .spans
            .last()
            .map(|span| {
                if is_final {
                    span.char_len()
                } else {
                    span.char_len().saturating_sub(1)
                }
            })
            .unwrap_or(0);
        Self {
            block: self.block,
            line: self.line,
            span: line.spans.len().saturating_sub(1),
            offset,
        }
    }

    /// Moves the position `delta` lines through the layout, negative
    /// values moving toward previous lines and positive ones toward next
    /// lines, crossing block boundaries as needed. The char position on
    /// the target line is re-resolved from `desired_x`.
    ///
    /// Returns `None` when the movement runs past either end of the
    /// layout; the caller decides whether to saturate.
    pub fn move_line(&self, layout: &Layout, delta: isize, desired_x: f32) -> Option<Self> {
        if delta == 0 {
            return Some(*self);
        }
        let mut block = self.block;
        let mut line = self.line;
        let mut remaining = delta;
        while remaining < 0 {
            if line > 0 {
                line -= 1;
            } else if block > 0 {
                block -= 1;
                line = layout.get(block)?.lines.len().saturating_sub(1);
            } else {
                return None;
            }
            remaining += 1;
        }
        while remaining > 0 {
            if line + 1 < layout.get(block)?.lines.len() {
                line += 1;
            } else if block + 1 < layout.len() {
                block += 1;
                line = 0;
            } else {
                return None;
            }
            remaining -= 1;
        }
        let target = layout.get(block)?.lines.get(line)?;
        let line_x = desired_x - target.offset;
        let span = span_for_x(target, line_x);
        let offset = target
            .spans
            .get(span)
            .map(|target_span| offset_for_x(target_span, line_x - target_span.x))
            .unwrap_or(0);
        Some(
            Self {
                block,
                line,
                span,
                offset,
            }
            .normalize(layout),
        )
    }

    /// Returns the caret rectangle for this position: `size` wide, one
    /// line high, positioned at the char boundary.
    pub fn geometry(&self, layout: &Layout, size: f32) -> Option<Rect> {
        let block = layout.get(self.block)?;
        let line = block.lines.get(self.line)?;
        let span = line.spans.get(self.span)?;
        let offset = span.char_offsets.get(self.offset).copied()?;
        let x = (line.offset + span.x + offset) as f64;
        let y = (block.y + line.y) as f64;
        Some(Rect::new(x, y, x + size as f64, y + line.height as f64))
    }

    fn line_in<'a>(&self, layout: &'a Layout) -> Option<&'a VisualLine> {
        layout.get(self.block)?.lines.get(self.line)
    }
}

/// A selection over one [`Layout`], derived from a model selection for
/// hit testing and rendering.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct VisualSelection {
    anchor: VisualCursor,
    focus: VisualCursor,
}

impl VisualSelection {
    /// Creates a selection between two positions. `anchor` is where the
    /// selection started and stays put; `focus` is the moving end.
    pub fn new(anchor: VisualCursor, focus: VisualCursor) -> Self {
        Self { anchor, focus }
    }

    /// Projects a model selection into `layout`, or `None` when either
    /// endpoint no longer resolves against it.
    pub fn from_model(layout: &Layout, selection: &ModelSelection) -> Option<Self> {
        Some(Self {
            anchor: VisualCursor::from_model(layout, selection.anchor)?,
            focus: VisualCursor::from_model(layout, selection.caret())?,
        })
    }

    /// The fixed end of the selection.
    pub fn anchor(&self) -> VisualCursor {
        self.anchor
    }

    /// The moving end of the selection.
    pub fn focus(&self) -> VisualCursor {
        self.focus
    }

    /// Returns `true` when both ends are the same position.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The selection's endpoints in visual document order, regardless of
    /// the direction it was made in.
    pub fn normalized(&self) -> (VisualCursor, VisualCursor) {
        if self.focus < self.anchor {
            (self.focus, self.anchor)
        } else {
            (self.anchor, self.focus)
        }
    }

    /// Returns the rectangles that represent the visual geometry of this
    /// selection, one per covered line.
    ///
    /// This is a convenience method built on [`geometry_with`](Self::geometry_with).
    pub fn geometry(&self, layout: &Layout) -> Vec<Rect> {
        let mut rects = Vec::new();
        self.geometry_with(layout, |rect| rects.push(rect));
        rects
    }

    /// Invokes `f` with the rectangles that represent the visual geometry
    /// of this selection, one per covered line, top to bottom.
    ///
    /// This avoids allocation if the intent is to render the rectangles
    /// immediately.
    pub fn geometry_with(&self, layout: &Layout, mut f: impl FnMut(Rect)) {
        // Ensure we add some visual indicator for selected empty lines.
        const MIN_RECT_WIDTH: f32 = 4.0;
        if self.is_collapsed() {
            return;
        }
        let (start, end) = self.normalized();
        for block_index in start.block..=end.block {
            let Some(block) = layout.get(block_index) else {
                break;
            };
            let first_line = if block_index == start.block {
                start.line
            } else {
                0
            };
            let last_line = if block_index == end.block {
                end.line.min(block.lines.len().saturating_sub(1))
            } else {
                block.lines.len().saturating_sub(1)
            };
            for line_index in first_line..=last_line {
                let Some(line) = block.lines.get(line_index) else {
                    break;
                };
                let at_start = block_index == start.block && line_index == start.line;
                let at_end = block_index == end.block && line_index == end.line;
                let x0 = if at_start {
                    caret_x(line, start.span, start.offset)
                } else {
                    line.offset
                };
                let x1 = if at_end {
                    caret_x(line, end.span, end.offset)
                } else {
                    line.offset + line.advance
                };
                // Boundary lines may contribute nothing; fully covered
                // lines always get a rect, even when empty.
                if x1 > x0 || !(at_start || at_end) {
                    let width = (x1 - x0).max(MIN_RECT_WIDTH);
                    let y = (block.y + line.y) as f64;
                    f(Rect::new(
                        x0 as f64,
                        y,
                        (x0 + width) as f64,
                        y + line.height as f64,
                    ));
                }
            }
        }
    }
}

/// X coordinate of a char boundary on a line, in container coordinates.
/// Out-of-range indices clamp to the line's far edge.
fn caret_x(line: &VisualLine, span_index: usize, offset: usize) -> f32 {
    let Some(span) = line.spans.get(span_index) else {
        return line.offset + line.advance;
    };
    let within = span
        .char_offsets
        .get(offset)
        .copied()
        .unwrap_or(span.width);
    line.offset + span.x + within
}

/// First block whose bottom edge is at or below `y`; the last block when
/// `y` is below everything. A point in the gap between two blocks thus
/// resolves to the following block.
fn block_for_y(layout: &Layout, y: f32) -> usize {
    layout
        .blocks()
        .position(|block| y <= block.y + block.height)
        .unwrap_or(layout.len().saturating_sub(1))
}

/// First line whose bottom edge is below `y` (block-local); the last line
/// when `y` is below everything.
fn line_for_y(block: &VisualBlock, y: f32) -> usize {
    block
        .lines
        .iter()
        .position(|line| y < line.y + line.height)
        .unwrap_or(block.lines.len().saturating_sub(1))
}

/// First span whose right edge is past `x` (line-local, alignment shift
/// already removed); the last span when `x` is past everything.
fn span_for_x(line: &VisualLine, x: f32) -> usize {
    line.spans
        .iter()
        .position(|span| x < span.x + span.width)
        .unwrap_or(line.spans.len().saturating_sub(1))
}

/// Char boundary nearest to `x` within a span: the first boundary whose
/// char's midpoint lies past `x` (span-local).
fn offset_for_x(span: &VisualSpan, x: f32) -> usize {
    for (index, pair) in span.char_offsets.windows(2).enumerate() {
        if (pair[0] + pair[1]) / 2.0 > x {
            return index;
        }
    }
    span.char_len()
}
