// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::measure::Measure;
use crate::style::TextStyle;

/// Deterministic measurer for tests: every char is half the font size
/// wide, so the default 16px style gives 8px per char and all geometry
/// in tests works out to simple numbers.
pub(crate) struct FixedMeasure;

impl Measure for FixedMeasure {
    fn text_width(&mut self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.font_size * 0.5
    }
}
