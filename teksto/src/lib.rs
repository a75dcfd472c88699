// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich text modeling, word-wrapped layout, and cursor mapping for text
//! embedded in composite graphics scenes.
//!
//! The crate is split along the derivation chain:
//!
//! - [`style`]: style overrides and the cascade that resolves them.
//! - [`model`]: the editable document, blocks of styled spans, and
//!   positions within it.
//! - [`measure`]: the [`Measure`] trait host applications implement to
//!   supply text widths, plus a memoizing wrapper.
//! - [`layout`]: the derived word-wrapped [`Layout`] and positions,
//!   movement, and geometry within it.
//! - [`editor`]: an [`Editor`] tying the above together behind a small
//!   operation vocabulary.
//!
//! Text measurement stays behind [`Measure`] so the crate never touches
//! fonts or rasterization itself; whatever measures text for rendering
//! also measures it for layout, and the two always agree.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("teksto requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod util;

pub mod editor;
pub mod layout;
pub mod measure;
pub mod model;
pub mod style;

#[cfg(test)]
mod tests;

pub use editor::{EditOp, Editor};
pub use layout::{Layout, VisualCursor, VisualSelection};
pub use measure::{Measure, MeasureContext};
pub use model::{ModelCursor, ModelSelection, TextModel};
pub use style::{StyleOverride, TextStyle};
