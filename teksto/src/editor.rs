// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-to-use block text editor driven by [`EditOp`]s.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::kurbo::Rect;

use crate::layout::{Layout, VisualCursor, VisualSelection};
use crate::measure::Measure;
use crate::model::{ModelCursor, ModelSelection, TextModel};
use crate::style::StyleOverride;

/// Opaque representation of a generation.
///
/// Obtained from [`Editor::generation`].
// Overflow handling: the generations are only compared, so wrapping is
// fine. This could only fail if exactly `u32::MAX` generations happen
// between drawing operations. This is implausible and so can be ignored.
#[derive(PartialEq, Eq, Default, Clone, Copy, Debug)]
pub struct Generation(u32);

impl Generation {
    /// Make it not what it currently is.
    fn nudge(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Operations on an [`Editor`] for [`Editor::transact`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum EditOp {
    /// Set the container width text wraps to.
    SetWidth(f32),
    /// Replace the document-level style overrides.
    SetDefaultStyle(StyleOverride),
    /// Insert a char at the caret, replacing the selection if there is
    /// one.
    InsertChar(char),
    /// Delete the selection, or the char before the caret (typical
    /// 'backspace' behavior). Deleting at a block start merges the block
    /// into the previous one.
    Backdelete,
    /// Split the caret's block in two at the caret (typical 'enter'
    /// behavior), deleting the selection first if there is one.
    SplitBlock,
    /// Move the caret one char left; a selection collapses to its start.
    MoveLeft,
    /// Move the caret one char right; a selection collapses to its end.
    MoveRight,
    /// Move up to the nearest position on the previous line, preserving
    /// the horizontal position for repeated movements.
    MoveUp,
    /// Move down to the nearest position on the next line, preserving
    /// the horizontal position for repeated movements.
    MoveDown,
    /// Move the caret to the start of the visual line it is on.
    MoveToLineStart,
    /// Move the caret to the end of the visual line it is on.
    MoveToLineEnd,
    /// Move the caret to the position nearest this point in the layout.
    MoveToPoint(f32, f32),
    /// Move the selection focus one char left.
    SelectLeft,
    /// Move the selection focus one char right.
    SelectRight,
    /// Move the selection focus up one line, preserving the horizontal
    /// position for repeated movements.
    SelectUp,
    /// Move the selection focus down one line, preserving the horizontal
    /// position for repeated movements.
    SelectDown,
    /// Move the selection focus to the start of the visual line.
    SelectToLineStart,
    /// Move the selection focus to the end of the visual line.
    SelectToLineEnd,
    /// Move the selection focus to the position nearest this point.
    ExtendToPoint(f32, f32),
    /// Select the whole document.
    SelectAll,
    /// Collapse the selection into a caret at its focus.
    CollapseSelection,
}

/// Block text editor over a [`TextModel`].
///
/// The editor owns the document, the current selection, and the layout
/// derived from them. All changes go through [`Editor::transact`], which
/// leaves the layout up to date; the accessor methods then read it
/// without needing a measurer.
#[derive(Clone, Debug)]
pub struct Editor {
    model: TextModel,
    selection: ModelSelection,
    layout: Layout,
    width: f32,
    desired_x: Option<f32>,
    // Tracks when the layout must be rebuilt before it can be used for
    // cursor mapping or drawing. Model-only operations don't need a
    // clean layout and just set this.
    layout_dirty: bool,
    generation: Generation,
}

impl Editor {
    /// Creates an editor over `model` wrapping at `width`.
    pub fn new(model: TextModel, width: f32) -> Self {
        Self {
            model,
            selection: ModelSelection::default(),
            layout: Layout::default(),
            width,
            desired_x: None,
            layout_dirty: true,
            // We don't use the `default` generation to start with, so
            // consumers which use that as their initial value will
            // redraw on first observation.
            generation: Generation(1),
        }
    }

    /// Runs a series of [`EditOp`]s, rebuilding the layout as necessary.
    pub fn transact<M: Measure>(&mut self, measure: &mut M, ops: impl IntoIterator<Item = EditOp>) {
        for op in ops.into_iter() {
            let vertical = matches!(
                &op,
                EditOp::MoveUp | EditOp::MoveDown | EditOp::SelectUp | EditOp::SelectDown
            );
            match op {
                EditOp::SetWidth(width) => {
                    self.width = width;
                    self.layout_dirty = true;
                }
                EditOp::SetDefaultStyle(style) => {
                    self.model.style = style;
                    self.layout_dirty = true;
                }
                EditOp::InsertChar(ch) => {
                    let cursor = if self.selection.is_collapsed() {
                        self.model.insert_char(self.selection.caret(), ch)
                    } else {
                        self.model.replace_selection(&self.selection, ch)
                    };
                    self.set_selection(cursor.into());
                    self.layout_dirty = true;
                }
                EditOp::Backdelete => {
                    let cursor = if self.selection.is_collapsed() {
                        self.model.delete_char(self.selection.caret())
                    } else {
                        self.model.delete_selection(&self.selection)
                    };
                    self.set_selection(cursor.into());
                    self.layout_dirty = true;
                }
                EditOp::SplitBlock => {
                    if !self.selection.is_collapsed() {
                        let start = self.model.delete_selection(&self.selection);
                        self.selection = start.into();
                    }
                    let cursor = self.model.split_block(self.selection.caret());
                    self.set_selection(cursor.into());
                    self.layout_dirty = true;
                }
                EditOp::MoveLeft => self.move_horizontal(-1, false),
                EditOp::MoveRight => self.move_horizontal(1, false),
                EditOp::MoveUp => self.move_vertical(measure, -1, false),
                EditOp::MoveDown => self.move_vertical(measure, 1, false),
                EditOp::MoveToLineStart => self.move_line_start(measure, false),
                EditOp::MoveToLineEnd => self.move_line_end(measure, false),
                EditOp::MoveToPoint(x, y) => {
                    self.refresh_layout(measure);
                    if let Some(cursor) = VisualCursor::from_point(&self.layout, x, y)
                        .to_model(&self.layout, &self.model)
                    {
                        self.set_selection(cursor.into());
                    }
                }
                EditOp::SelectLeft => self.move_horizontal(-1, true),
                EditOp::SelectRight => self.move_horizontal(1, true),
                EditOp::SelectUp => self.move_vertical(measure, -1, true),
                EditOp::SelectDown => self.move_vertical(measure, 1, true),
                EditOp::SelectToLineStart => self.move_line_start(measure, true),
                EditOp::SelectToLineEnd => self.move_line_end(measure, true),
                EditOp::ExtendToPoint(x, y) => {
                    self.refresh_layout(measure);
                    if let Some(cursor) = VisualCursor::from_point(&self.layout, x, y)
                        .to_model(&self.layout, &self.model)
                    {
                        self.set_selection(self.selection.maybe_extend(cursor, true));
                    }
                }
                EditOp::SelectAll => {
                    let end = self.model.end();
                    self.set_selection(ModelSelection::new(ModelCursor::default(), end));
                }
                EditOp::CollapseSelection => {
                    self.set_selection(ModelSelection::collapsed(self.selection.caret()));
                }
            }
            if !vertical {
                // The remembered column only survives runs of vertical
                // movement.
                self.desired_x = None;
            }
        }
        self.refresh_layout(measure);
    }

    /// Moves or extends by whole chars in reading order. A plain move
    /// over an active selection collapses it to the matching edge
    /// instead of moving.
    fn move_horizontal(&mut self, delta: isize, extend: bool) {
        if !extend && !self.selection.is_collapsed() {
            let (start, end) = self.selection.normalized();
            let edge = if delta < 0 { start } else { end };
            self.set_selection(edge.into());
            return;
        }
        let cursor = self.selection.caret().move_by(&self.model, delta);
        self.set_selection(self.selection.maybe_extend(cursor, extend));
    }

    /// Moves or extends by one visual line, keeping the remembered
    /// horizontal position across consecutive vertical movements. At the
    /// layout's edge the selection is left untouched.
    fn move_vertical<M: Measure>(&mut self, measure: &mut M, delta: isize, extend: bool) {
        self.refresh_layout(measure);
        let Some(focus) = VisualCursor::from_model(&self.layout, self.selection.caret()) else {
            return;
        };
        let desired_x = self.desired_x.unwrap_or_else(|| {
            focus
                .geometry(&self.layout, 0.0)
                .map(|rect| rect.x0 as f32)
                .unwrap_or(0.0)
        });
        self.desired_x = Some(desired_x);
        let Some(cursor) = focus
            .move_line(&self.layout, delta, desired_x)
            .and_then(|moved| moved.to_model(&self.layout, &self.model))
        else {
            return;
        };
        self.set_selection(self.selection.maybe_extend(cursor, extend));
    }

    fn move_line_start<M: Measure>(&mut self, measure: &mut M, extend: bool) {
        self.refresh_layout(measure);
        let cursor = VisualCursor::from_model(&self.layout, self.selection.caret())
            .and_then(|focus| focus.line_start().to_model(&self.layout, &self.model));
        if let Some(cursor) = cursor {
            self.set_selection(self.selection.maybe_extend(cursor, extend));
        }
    }

    fn move_line_end<M: Measure>(&mut self, measure: &mut M, extend: bool) {
        self.refresh_layout(measure);
        let cursor = VisualCursor::from_model(&self.layout, self.selection.caret())
            .and_then(|focus| focus.line_end(&self.layout).to_model(&self.layout, &self.model));
        if let Some(cursor) = cursor {
            self.set_selection(self.selection.maybe_extend(cursor, extend));
        }
    }

    /// Updates the selection, nudging the generation if it changed.
    fn set_selection(&mut self, new: ModelSelection) {
        if new.anchor != self.selection.anchor || new.caret() != self.selection.caret() {
            self.generation.nudge();
        }
        self.selection = new;
    }

    /// Rebuilds the layout if it is out of date.
    fn refresh_layout<M: Measure>(&mut self, measure: &mut M) {
        if self.layout_dirty {
            self.update_layout(measure);
        }
    }

    /// Rebuilds the layout.
    fn update_layout<M: Measure>(&mut self, measure: &mut M) {
        self.layout = Layout::build(&self.model, self.width, measure);
        self.layout_dirty = false;
        self.generation.nudge();
    }

    /// The document being edited.
    pub fn model(&self) -> &TextModel {
        &self.model
    }

    /// Consumes the editor, returning the document.
    pub fn into_model(self) -> TextModel {
        self.model
    }

    /// The current selection, in model coordinates.
    pub fn selection(&self) -> ModelSelection {
        self.selection
    }

    /// The caret position: the selection's moving end.
    pub fn cursor(&self) -> ModelCursor {
        self.selection.caret()
    }

    /// A copy of the document's text, blocks joined with `'\n'`.
    pub fn text(&self) -> String {
        self.model.text()
    }

    /// Container width text wraps to.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The layout as of the last [`transact`](Self::transact).
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get rectangles representing the selected portions of text.
    pub fn selection_geometry(&self) -> Vec<Rect> {
        VisualSelection::from_model(&self.layout, &self.selection)
            .map(|selection| selection.geometry(&self.layout))
            .unwrap_or_default()
    }

    /// Get a rectangle representing the current caret position.
    pub fn cursor_geometry(&self, size: f32) -> Option<Rect> {
        VisualCursor::from_model(&self.layout, self.selection.caret())?
            .geometry(&self.layout, size)
    }

    /// Get the current `Generation` of the editor, to decide whether to
    /// draw.
    ///
    /// You should store the generation the editor was at when you last
    /// drew it, and then redraw when the generation is different
    /// (`Generation` is [`PartialEq`], so supports the equality `==`
    /// operation).
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(TextModel::new(), f32::MAX)
    }
}
