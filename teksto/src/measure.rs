// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement.
//!
//! The layout engine consumes width measurement through the [`Measure`]
//! capability; this crate never touches fonts itself. [`MeasureContext`]
//! wraps any measurer with a cache keyed by (resolved style, text), which
//! keeps the per-prefix calls the layout engine makes cheap.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use hashbrown::{Equivalent, HashMap};

use crate::style::TextStyle;

/// Width measurement of styled text, supplied by the embedder.
///
/// `text_width` must be deterministic for a given (text, style) pair; the
/// engine treats it as pure and may cache results until the surrounding
/// context is cleared.
pub trait Measure {
    /// Returns the advance width of `text` rendered in `style`.
    fn text_width(&mut self, text: &str, style: &TextStyle) -> f32;
}

impl<M: Measure + ?Sized> Measure for &mut M {
    fn text_width(&mut self, text: &str, style: &TextStyle) -> f32 {
        (**self).text_width(text, style)
    }
}

/// Entry budget after which the width table is dumped and rebuilt.
const MAX_WIDTHS: usize = 16 * 1024;

/// A caching wrapper around a [`Measure`] implementation.
///
/// Styles are interned by a linear scan, since a document resolves to few
/// distinct styles; widths live in a hash map over (style id, text) with
/// borrowed-key lookups, so a cache hit allocates nothing. A changed
/// style interns to a different id, which makes stale widths impossible.
/// The width table is cleared wholesale when it outgrows its budget.
#[derive(Debug)]
pub struct MeasureContext<M> {
    measurer: M,
    styles: Vec<TextStyle>,
    widths: HashMap<WidthKey, f32>,
}

impl<M: Measure> MeasureContext<M> {
    /// Wraps `measurer` with an empty cache.
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            styles: Vec::new(),
            widths: HashMap::new(),
        }
    }

    /// Drops every cached width and interned style.
    pub fn clear(&mut self) {
        self.styles.clear();
        self.widths.clear();
    }

    /// Gives back the wrapped measurer.
    pub fn into_inner(self) -> M {
        self.measurer
    }

    fn style_id(&mut self, style: &TextStyle) -> usize {
        if let Some(id) = self.styles.iter().position(|interned| interned == style) {
            id
        } else {
            self.styles.push(style.clone());
            self.styles.len() - 1
        }
    }
}

impl<M: Measure> Measure for MeasureContext<M> {
    fn text_width(&mut self, text: &str, style: &TextStyle) -> f32 {
        let style_id = self.style_id(style);
        let key = WidthKeyRef { style_id, text };
        if let Some(width) = self.widths.get(&key) {
            return *width;
        }
        let width = self.measurer.text_width(text, style);
        if self.widths.len() >= MAX_WIDTHS {
            self.widths.clear();
        }
        self.widths.insert(key.to_key(), width);
        width
    }
}

/// Owned key of the width table.
#[derive(PartialEq, Eq, Hash, Debug)]
struct WidthKey {
    style_id: usize,
    text: String,
}

/// Borrowed view of [`WidthKey`] for allocation-free lookups.
struct WidthKeyRef<'a> {
    style_id: usize,
    text: &'a str,
}

impl WidthKeyRef<'_> {
    fn to_key(&self) -> WidthKey {
        WidthKey {
            style_id: self.style_id,
            text: String::from(self.text),
        }
    }
}

// Must hash exactly like the derived impl on `WidthKey`.
impl Hash for WidthKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.style_id.hash(state);
        self.text.hash(state);
    }
}

impl Equivalent<WidthKey> for WidthKeyRef<'_> {
    fn equivalent(&self, key: &WidthKey) -> bool {
        self.style_id == key.style_id && self.text == key.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingMeasure {
        calls: usize,
    }

    impl Measure for CountingMeasure {
        fn text_width(&mut self, text: &str, style: &TextStyle) -> f32 {
            self.calls += 1;
            text.chars().count() as f32 * style.font_size * 0.5
        }
    }

    #[test]
    fn hits_by_text_and_style() {
        let mut cx = MeasureContext::new(CountingMeasure { calls: 0 });
        let style = TextStyle::default();
        let first = cx.text_width("hello", &style);
        let second = cx.text_width("hello", &style);
        assert_eq!(first, second);
        assert_eq!(cx.measurer.calls, 1, "repeat lookup must hit the cache");
    }

    #[test]
    fn distinguishes_styles() {
        let mut cx = MeasureContext::new(CountingMeasure { calls: 0 });
        let small = TextStyle::default();
        let large = TextStyle {
            font_size: 32.0,
            ..Default::default()
        };
        let narrow = cx.text_width("hi", &small);
        let wide = cx.text_width("hi", &large);
        assert!(wide > narrow, "size must flow through the cache key");
        assert_eq!(cx.measurer.calls, 2, "distinct styles are distinct keys");
    }

    #[test]
    fn clear_forgets() {
        let mut cx = MeasureContext::new(CountingMeasure { calls: 0 });
        let style = TextStyle::default();
        cx.text_width("x", &style);
        cx.clear();
        cx.text_width("x", &style);
        assert_eq!(cx.measurer.calls, 2, "clear must drop cached widths");
    }
}
