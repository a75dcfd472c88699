// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Asserts two measured values are equal up to float noise, with a label
/// naming what was measured.
#[track_caller]
pub(crate) fn assert_near(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{what} mismatch: got {actual}, expected {expected}"
    );
}
