// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy whitespace-preserving line breaking.

use alloc::string::String;
use alloc::vec::Vec;

use super::{VisualLine, VisualSpan};
use crate::measure::Measure;
use crate::model::Span;
use crate::style::{Alignment, TextStyle};
use crate::util;

/// Breaks a block's spans into wrapped lines at `max_width`.
///
/// Whitespace runs always land on the current line and never force a
/// break. Non-whitespace runs, joined across span boundaries, form words
/// that wrap as a unit; a word wider than the container goes on a line of
/// its own rather than being split or dropped. A block whose only span is
/// empty still produces one line carrying a single empty visual span.
pub(super) fn break_spans<M: Measure>(
    spans: &[Span],
    block_style: &TextStyle,
    max_width: f32,
    measure: &mut M,
) -> Vec<VisualLine> {
    let styles: Vec<TextStyle> = spans
        .iter()
        .map(|span| {
            let mut style = block_style.clone();
            span.style.apply_to(&mut style);
            style
        })
        .collect();

    let mut breaker = Breaker::new(&styles, block_style, max_width);
    for (index, span) in spans.iter().enumerate() {
        let mut start = 0;
        for (token, is_whitespace) in Tokens::new(&span.text) {
            if is_whitespace {
                breaker.whitespace(measure, token, index, start);
            } else {
                breaker.word_part(token, index, start);
            }
            start += util::char_len(token);
        }
    }
    if spans.len() == 1 && spans[0].text.is_empty() {
        // Sole empty span: emit it anyway so the line is never left
        // without content to anchor a cursor on.
        breaker.word_part("", 0, 0);
    }
    breaker.flush_word(measure);
    breaker.finish()
}

/// A word fragment: the part of one word that falls within one span.
struct WordPart {
    text: String,
    span_index: usize,
    start: usize,
}

/// Accumulated state for the line under construction.
struct LineState {
    spans: Vec<VisualSpan>,
    advance: f32,
    y: f32,
    max_font_size: f32,
}

impl LineState {
    fn new(y: f32) -> Self {
        Self {
            spans: Vec::new(),
            advance: 0.0,
            y,
            max_font_size: 0.0,
        }
    }
}

/// Greedy breaker over one block's token stream.
struct Breaker<'a> {
    styles: &'a [TextStyle],
    alignment: Alignment,
    line_height: f32,
    max_width: f32,
    lines: Vec<VisualLine>,
    line: LineState,
    word: Vec<WordPart>,
}

impl<'a> Breaker<'a> {
    fn new(styles: &'a [TextStyle], block_style: &TextStyle, max_width: f32) -> Self {
        Self {
            styles,
            alignment: block_style.alignment,
            line_height: block_style.line_height,
            max_width,
            lines: Vec::new(),
            line: LineState::new(0.0),
            word: Vec::new(),
        }
    }

    /// Places a whitespace token on the current line after flushing any
    /// pending word.
    fn whitespace<M: Measure>(
        &mut self,
        measure: &mut M,
        text: &str,
        span_index: usize,
        start: usize,
    ) {
        self.flush_word(measure);
        self.append(measure, String::from(text), span_index, start);
    }

    /// Buffers a word fragment; the whole word is placed on the next
    /// flush so it wraps as a unit.
    fn word_part(&mut self, text: &str, span_index: usize, start: usize) {
        self.word.push(WordPart {
            text: String::from(text),
            span_index,
            start,
        });
    }

    /// Measures the buffered word and places it, committing the current
    /// line first when the word would overflow a non-empty line.
    fn flush_word<M: Measure>(&mut self, measure: &mut M) {
        if self.word.is_empty() {
            return;
        }
        let word_width: f32 = self
            .word
            .iter()
            .map(|part| measure.text_width(&part.text, &self.styles[part.span_index]))
            .sum();
        if self.line.advance + word_width > self.max_width && !util::nearly_zero(self.line.advance)
        {
            self.commit_line();
        }
        let parts = core::mem::take(&mut self.word);
        for part in parts {
            self.append(measure, part.text, part.span_index, part.start);
        }
    }

    /// Appends one measured slice to the current line. Contiguous text
    /// from the same model span extends the line's last visual span
    /// rather than opening another, so an unbroken run of one span is a
    /// single slice per line.
    fn append<M: Measure>(
        &mut self,
        measure: &mut M,
        text: String,
        span_index: usize,
        start: usize,
    ) {
        let style = &self.styles[span_index];
        if style.font_size > self.line.max_font_size {
            self.line.max_font_size = style.font_size;
        }
        if let Some(last) = self.line.spans.last_mut() {
            if last.parent_span == span_index && last.start_in_parent + last.char_len() == start {
                last.text.push_str(&text);
                extend_offsets(measure, &last.text, style, &mut last.char_offsets);
                let width = last.char_offsets.last().copied().unwrap_or(0.0);
                last.width = width;
                self.line.advance = last.x + width;
                return;
            }
        }
        let char_offsets = char_offsets(measure, &text, style);
        let width = char_offsets.last().copied().unwrap_or(0.0);
        self.line.spans.push(VisualSpan {
            text,
            style: style.clone(),
            x: self.line.advance,
            width,
            char_offsets,
            parent_span: span_index,
            start_in_parent: start,
        });
        self.line.advance += width;
    }

    /// Finalizes the line under construction and starts the next one
    /// directly below it.
    fn commit_line(&mut self) {
        let height = self.line_height * self.line.max_font_size;
        let next_y = self.line.y + height;
        self.lines.push(VisualLine {
            y: self.line.y,
            height,
            offset: align_offset(self.alignment, self.max_width, self.line.advance),
            advance: self.line.advance,
            spans: core::mem::take(&mut self.line.spans),
        });
        self.line = LineState::new(next_y);
    }

    /// Commits any trailing line content and returns the block's lines.
    fn finish(mut self) -> Vec<VisualLine> {
        if !self.line.spans.is_empty() {
            self.commit_line();
        }
        self.lines
    }
}

/// Horizontal shift of a line within the container. Unclamped, so an
/// overflowing line shifts left of the container edge for non-left
/// alignments.
fn align_offset(alignment: Alignment, max_width: f32, advance: f32) -> f32 {
    match alignment {
        Alignment::Left => 0.0,
        Alignment::Middle => (max_width - advance) / 2.0,
        Alignment::Right => max_width - advance,
    }
}

/// Prefix widths of `text` at every char boundary. The first entry is
/// always `0.0` and the last is the width of the whole slice.
fn char_offsets<M: Measure>(measure: &mut M, text: &str, style: &TextStyle) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(util::char_len(text) + 1);
    offsets.push(0.0);
    extend_offsets(measure, text, style, &mut offsets);
    offsets
}

/// Grows a prefix-width table to cover all of `text`. Entry `i` is the
/// width of `text[0..i)` in chars, so widths already in the table stay
/// valid when the text has only been appended to.
fn extend_offsets<M: Measure>(
    measure: &mut M,
    text: &str,
    style: &TextStyle,
    offsets: &mut Vec<f32>,
) {
    for (byte, ch) in text.char_indices().skip(offsets.len() - 1) {
        let end = byte + ch.len_utf8();
        offsets.push(measure.text_width(&text[..end], style));
    }
}

/// Iterator over maximal whitespace and non-whitespace runs of a string.
/// Yields `(token, is_whitespace)` pairs; tokens are never empty.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (&'a str, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_whitespace = first.is_whitespace();
        let end = self
            .rest
            .char_indices()
            .find(|&(_, ch)| ch.is_whitespace() != is_whitespace)
            .map(|(index, _)| index)
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some((token, is_whitespace))
    }
}
