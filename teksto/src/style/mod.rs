// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.
//!
//! Styles cascade over three partial layers: document default, block and
//! span. Each layer is a [`StyleOverride`] whose set fields win over the
//! layers below; [`resolve`] folds them over the built-in fallback into a
//! [`TextStyle`]. The cascade is pure and recomputed on demand — resolved
//! styles are never stored in the text model.

use alloc::string::String;

use peniko::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a block's lines within the container.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// Lines start at the left edge.
    Left,
    /// Lines are centered in the container.
    #[default]
    Middle,
    /// Lines end at the right edge.
    Right,
}

/// Visual weight class of a font, typically on a scale from 1.0 to 1000.0.
///
/// This uses an `f32` so that it can represent the full range of values
/// possible with variable fonts.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Visual style or "slope" of a font.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontStyle {
    /// The face's upright style.
    #[default]
    Normal,
    /// The face's italic style.
    Italic,
    /// An oblique style with an optional angle in degrees.
    Oblique(Option<f32>),
}

/// Decoration drawn with a run of text.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextDecoration {
    /// No decoration.
    #[default]
    None,
    /// A line under the text.
    Underline,
    /// A line through the text.
    Strikethrough,
}

/// A fully resolved set of text attributes.
///
/// The `Default` impl is the built-in fallback at the bottom of the
/// cascade; every field's fallback value is enumerated there and nowhere
/// else.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextStyle {
    /// Horizontal alignment of the block's lines.
    pub alignment: Alignment,
    /// Line height as a multiplier of the largest font size on the line.
    pub line_height: f32,
    /// Font family name, opaque to this crate.
    pub font_family: String,
    /// Font size in layout units.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Decoration drawn with the text.
    pub text_decoration: TextDecoration,
    /// Text foreground color.
    pub text_color: Color,
    /// Background highlight color. Transparent means no highlight.
    pub highlight_color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Middle,
            line_height: 1.1,
            font_family: String::from("sans-serif"),
            font_size: 16.0,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::None,
            text_color: Color::BLACK,
            highlight_color: Color::TRANSPARENT,
        }
    }
}

/// A partial set of text attributes forming one cascade layer.
///
/// All fields are optional; an override with every field `None` has no
/// effect, so "no override" needs no separate representation. Documents,
/// blocks and spans each carry one.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleOverride {
    /// Overrides [`TextStyle::alignment`].
    pub alignment: Option<Alignment>,
    /// Overrides [`TextStyle::line_height`].
    pub line_height: Option<f32>,
    /// Overrides [`TextStyle::font_family`].
    pub font_family: Option<String>,
    /// Overrides [`TextStyle::font_size`].
    pub font_size: Option<f32>,
    /// Overrides [`TextStyle::font_weight`].
    pub font_weight: Option<FontWeight>,
    /// Overrides [`TextStyle::font_style`].
    pub font_style: Option<FontStyle>,
    /// Overrides [`TextStyle::text_decoration`].
    pub text_decoration: Option<TextDecoration>,
    /// Overrides [`TextStyle::text_color`].
    pub text_color: Option<Color>,
    /// Overrides [`TextStyle::highlight_color`].
    pub highlight_color: Option<Color>,
}

impl StyleOverride {
    /// An override with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every set field into `style`.
    pub fn apply_to(&self, style: &mut TextStyle) {
        if let Some(alignment) = self.alignment {
            style.alignment = alignment;
        }
        if let Some(line_height) = self.line_height {
            style.line_height = line_height;
        }
        if let Some(font_family) = &self.font_family {
            style.font_family.clone_from(font_family);
        }
        if let Some(font_size) = self.font_size {
            style.font_size = font_size;
        }
        if let Some(font_weight) = self.font_weight {
            style.font_weight = font_weight;
        }
        if let Some(font_style) = self.font_style {
            style.font_style = font_style;
        }
        if let Some(text_decoration) = self.text_decoration {
            style.text_decoration = text_decoration;
        }
        if let Some(text_color) = self.text_color {
            style.text_color = text_color;
        }
        if let Some(highlight_color) = self.highlight_color {
            style.highlight_color = highlight_color;
        }
    }

    /// Combines two layers into one; fields set in `other` win.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            alignment: other.alignment.or(self.alignment),
            line_height: other.line_height.or(self.line_height),
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: other.font_size.or(self.font_size),
            font_weight: other.font_weight.or(self.font_weight),
            font_style: other.font_style.or(self.font_style),
            text_decoration: other.text_decoration.or(self.text_decoration),
            text_color: other.text_color.or(self.text_color),
            highlight_color: other.highlight_color.or(self.highlight_color),
        }
    }
}

/// Resolves the effective style for one span of text.
///
/// Folds the document, block and span layers, in that order, over the
/// built-in fallback ([`TextStyle::default`]); later layers win field by
/// field. Pure, with no failure modes.
pub fn resolve(doc: &StyleOverride, block: &StyleOverride, span: &StyleOverride) -> TextStyle {
    let mut style = TextStyle::default();
    doc.apply_to(&mut style);
    block.apply_to(&mut style);
    span.apply_to(&mut style);
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layers_win() {
        let doc = StyleOverride {
            font_size: Some(20.0),
            font_weight: Some(FontWeight::LIGHT),
            alignment: Some(Alignment::Left),
            ..Default::default()
        };
        let block = StyleOverride {
            font_weight: Some(FontWeight::BOLD),
            ..Default::default()
        };
        let span = StyleOverride {
            font_size: Some(32.0),
            ..Default::default()
        };
        let style = resolve(&doc, &block, &span);
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.font_weight, FontWeight::BOLD);
        assert_eq!(style.alignment, Alignment::Left);
        // Untouched fields come from the fallback.
        assert_eq!(style.line_height, 1.1);
    }

    #[test]
    fn empty_layers_are_identity() {
        let empty = StyleOverride::new();
        assert!(empty.is_empty());
        assert_eq!(resolve(&empty, &empty, &empty), TextStyle::default());
    }

    #[test]
    fn merge_prefers_right() {
        let a = StyleOverride {
            font_size: Some(10.0),
            line_height: Some(1.5),
            ..Default::default()
        };
        let b = StyleOverride {
            font_size: Some(12.0),
            ..Default::default()
        };
        let merged = a.merge(&b);
        assert_eq!(merged.font_size, Some(12.0));
        assert_eq!(merged.line_height, Some(1.5));
    }
}
