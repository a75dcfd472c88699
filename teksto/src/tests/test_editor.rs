// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::editor::{EditOp, Editor};
use crate::model::{ModelCursor, TextModel};
use crate::style::StyleOverride;

use super::utils::{FixedMeasure, assert_near, left_aligned};

/// Editor over a left-aligned model with an exact 2.0 line height, so
/// blocks are 32px tall and chars 8px wide under the fixed measurer.
fn editor_with(text: &str, width: f32) -> Editor {
    let mut model = TextModel::from_text(text);
    model.style = StyleOverride {
        line_height: Some(2.0),
        ..left_aligned()
    };
    Editor::new(model, width)
}

#[test]
fn typing_builds_blocks() {
    let mut editor = Editor::default();
    editor.transact(
        &mut FixedMeasure,
        [
            EditOp::InsertChar('h'),
            EditOp::InsertChar('i'),
            EditOp::SplitBlock,
            EditOp::InsertChar('x'),
        ],
    );
    assert_eq!(editor.text(), "hi\nx");
    assert_eq!(editor.cursor(), ModelCursor::new(1, 0, 1));
    assert_eq!(editor.into_model().text(), "hi\nx");
}

#[test]
fn backdelete_merges_blocks() {
    let mut editor = editor_with("ab\ncd", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [
            EditOp::MoveRight,
            EditOp::MoveRight,
            EditOp::MoveRight,
            EditOp::Backdelete,
        ],
    );
    assert_eq!(editor.text(), "abcd");
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 2));
}

#[test]
fn backdelete_at_document_start_is_a_noop() {
    let mut editor = editor_with("ab", 1000.0);
    editor.transact(&mut FixedMeasure, [EditOp::Backdelete]);
    assert_eq!(editor.text(), "ab");
    assert_eq!(editor.cursor(), ModelCursor::default());
}

#[test]
fn inserting_replaces_the_selection() {
    let mut editor = editor_with("hello", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [
            EditOp::SelectRight,
            EditOp::SelectRight,
            EditOp::InsertChar('X'),
        ],
    );
    assert_eq!(editor.text(), "Xllo");
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 1));
    assert!(editor.selection().is_collapsed());
}

#[test]
fn splitting_deletes_the_selection_first() {
    let mut editor = editor_with("hello", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [
            EditOp::MoveRight,
            EditOp::SelectRight,
            EditOp::SelectRight,
            EditOp::SplitBlock,
        ],
    );
    assert_eq!(editor.text(), "h\nlo");
    assert_eq!(editor.cursor(), ModelCursor::new(1, 0, 0));
}

#[test]
fn plain_moves_collapse_a_selection_to_its_edge() {
    let mut editor = editor_with("hello", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [EditOp::MoveRight, EditOp::SelectRight, EditOp::SelectRight],
    );
    assert!(!editor.selection().is_collapsed());

    editor.transact(&mut FixedMeasure, [EditOp::MoveLeft]);
    assert!(editor.selection().is_collapsed());
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 1), "start edge");

    editor.transact(
        &mut FixedMeasure,
        [EditOp::SelectRight, EditOp::SelectRight, EditOp::MoveRight],
    );
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 3), "end edge");

    // A backwards selection still collapses to its document-order start.
    editor.transact(&mut FixedMeasure, [EditOp::SelectLeft, EditOp::MoveLeft]);
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 2));
}

#[test]
fn vertical_moves_remember_the_column() {
    let mut editor = editor_with("aaaa\nbb\ncccc", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [EditOp::MoveToLineEnd, EditOp::MoveDown, EditOp::MoveDown],
    );
    // "bb" is too short for column 4, but the column survives crossing
    // it.
    assert_eq!(editor.cursor(), ModelCursor::new(2, 0, 4));

    // Any horizontal movement resets the remembered column.
    editor.transact(
        &mut FixedMeasure,
        [EditOp::MoveUp, EditOp::MoveLeft, EditOp::MoveDown],
    );
    assert_eq!(editor.cursor(), ModelCursor::new(2, 0, 1));
}

#[test]
fn vertical_moves_saturate_at_the_document_edges() {
    let mut editor = editor_with("ab\ncd", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [EditOp::MoveDown, EditOp::MoveDown, EditOp::MoveDown],
    );
    assert_eq!(editor.cursor(), ModelCursor::new(1, 0, 0));

    // Extending past the top keeps the selection rather than collapsing.
    let mut editor = editor_with("ab\ncd", 1000.0);
    editor.transact(&mut FixedMeasure, [EditOp::SelectRight, EditOp::SelectUp]);
    let selection = editor.selection();
    assert!(!selection.is_collapsed());
    assert_eq!(selection.anchor, ModelCursor::new(0, 0, 0));
    assert_eq!(selection.caret(), ModelCursor::new(0, 0, 1));
}

#[test]
fn select_down_extends_by_a_visual_line() {
    let mut editor = editor_with("hello world", 80.0);
    editor.transact(&mut FixedMeasure, [EditOp::SelectDown, EditOp::SelectDown]);

    // The second step runs off the layout and leaves the selection at
    // one full line.
    let selection = editor.selection();
    assert_eq!(selection.anchor, ModelCursor::new(0, 0, 0));
    assert_eq!(selection.caret(), ModelCursor::new(0, 0, 6));

    let rects = editor.selection_geometry();
    assert_eq!(rects.len(), 1);
    assert_near(rects[0].x0 as f32, 0.0, "selection x0");
    assert_near(rects[0].x1 as f32, 48.0, "selection x1");
}

#[test]
fn select_all_then_type_replaces_everything() {
    let mut editor = editor_with("ab\ncd", 1000.0);
    editor.transact(&mut FixedMeasure, [EditOp::SelectAll, EditOp::InsertChar('z')]);
    assert_eq!(editor.text(), "z");
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 1));
    assert_eq!(editor.model().blocks.len(), 1);
}

#[test]
fn collapse_selection_keeps_the_caret() {
    let mut editor = editor_with("hello", 1000.0);
    editor.transact(
        &mut FixedMeasure,
        [
            EditOp::SelectRight,
            EditOp::SelectRight,
            EditOp::CollapseSelection,
        ],
    );
    assert!(editor.selection().is_collapsed());
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 2));
}

#[test]
fn point_ops_place_and_extend() {
    let mut editor = editor_with("hello world", 80.0);
    editor.transact(&mut FixedMeasure, [EditOp::MoveToPoint(5.0, 8.0)]);
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 1));

    // (20, 40) is on the wrapped second line, between "wor" and "ld".
    editor.transact(&mut FixedMeasure, [EditOp::ExtendToPoint(20.0, 40.0)]);
    let selection = editor.selection();
    assert_eq!(selection.anchor, ModelCursor::new(0, 0, 1));
    assert_eq!(selection.caret(), ModelCursor::new(0, 0, 9));
}

#[test]
fn line_ops_use_visual_lines() {
    let mut editor = editor_with("hello world", 80.0);
    editor.transact(&mut FixedMeasure, [EditOp::MoveToPoint(5.0, 40.0)]);
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 7));

    editor.transact(&mut FixedMeasure, [EditOp::MoveToLineEnd]);
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 11));

    editor.transact(&mut FixedMeasure, [EditOp::MoveToLineStart]);
    assert_eq!(editor.cursor(), ModelCursor::new(0, 0, 6), "start of line 1");

    editor.transact(&mut FixedMeasure, [EditOp::SelectToLineEnd]);
    assert_eq!(editor.selection().caret(), ModelCursor::new(0, 0, 11));
    let rects = editor.selection_geometry();
    assert_eq!(rects.len(), 1);
    assert_near(rects[0].x0 as f32, 0.0, "selection x0");
    assert_near(rects[0].x1 as f32, 40.0, "selection x1");
    assert_near(rects[0].y0 as f32, 32.0, "selection y");

    // Shift+Home from a fresh caret at the line end selects back to the
    // line start.
    editor.transact(
        &mut FixedMeasure,
        [EditOp::CollapseSelection, EditOp::SelectToLineStart],
    );
    assert_eq!(editor.selection().anchor, ModelCursor::new(0, 0, 11));
    assert_eq!(editor.selection().caret(), ModelCursor::new(0, 0, 6));
}

#[test]
fn width_changes_reflow() {
    let mut editor = editor_with("hello world", 200.0);
    editor.transact(&mut FixedMeasure, []);
    assert_eq!(editor.layout().get(0).unwrap().lines.len(), 1);

    editor.transact(&mut FixedMeasure, [EditOp::SetWidth(80.0)]);
    assert_near(editor.width(), 80.0, "width");
    assert_eq!(editor.layout().get(0).unwrap().lines.len(), 2);
}

#[test]
fn default_style_changes_reflow() {
    let mut editor = editor_with("ab", 100.0);
    editor.transact(&mut FixedMeasure, []);
    assert_near(editor.layout().height(), 32.0, "height");

    editor.transact(
        &mut FixedMeasure,
        [EditOp::SetDefaultStyle(StyleOverride {
            line_height: Some(2.0),
            font_size: Some(32.0),
            ..left_aligned()
        })],
    );
    assert_near(editor.layout().height(), 64.0, "doubled height");
}

#[test]
fn cursor_geometry_tracks_the_caret() {
    let mut editor = editor_with("ab", 100.0);
    editor.transact(&mut FixedMeasure, []);
    let rect = editor.cursor_geometry(2.0).unwrap();
    assert_near(rect.x0 as f32, 0.0, "caret x");
    assert_near(rect.y1 as f32, 32.0, "caret bottom");

    editor.transact(&mut FixedMeasure, [EditOp::MoveRight]);
    let rect = editor.cursor_geometry(2.0).unwrap();
    assert_near(rect.x0 as f32, 8.0, "caret x after move");
}

#[test]
fn generation_tracks_observable_changes() {
    let mut editor = editor_with("ab", 1000.0);
    let fresh = editor.generation();

    // The first transaction builds the layout.
    editor.transact(&mut FixedMeasure, []);
    let built = editor.generation();
    assert_ne!(fresh, built);

    // Nothing changed, nothing to redraw.
    editor.transact(&mut FixedMeasure, []);
    assert_eq!(editor.generation(), built);

    editor.transact(&mut FixedMeasure, [EditOp::MoveRight]);
    let moved = editor.generation();
    assert_ne!(built, moved);

    editor.transact(&mut FixedMeasure, [EditOp::MoveLeft]);
    let back = editor.generation();
    assert_ne!(moved, back);

    // Left at the document start saturates: still nothing to redraw.
    editor.transact(&mut FixedMeasure, [EditOp::MoveLeft]);
    assert_eq!(editor.generation(), back);
}
