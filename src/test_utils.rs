// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use iced_core::{Point, Rectangle, Size};

/// Default epsilon for geometry comparisons, in pixels.
pub const PX_EPSILON: f32 = 1e-3;

/// Builds a rectangle from its origin and size components.
#[must_use]
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(width, height))
}
