// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod fixed_measure;
mod layout_test;

pub(crate) use asserts::assert_near;
pub(crate) use fixed_measure::FixedMeasure;
pub(crate) use layout_test::{LayoutTest, left_aligned, sized};
