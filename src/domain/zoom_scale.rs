// SPDX-License-Identifier: MPL-2.0
//! Zoom scale domain type.

use crate::config::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE};

/// Zoom scale, guaranteed to be within the valid range (1×–8×).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
///
/// # Example
///
/// ```
/// use iced_lightbox::domain::ZoomScale;
///
/// assert_eq!(ZoomScale::new(0.5).value(), 1.0);
/// assert_eq!(ZoomScale::new(20.0).value(), 8.0);
/// assert!(ZoomScale::default().is_min());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Fitted content, no magnification.
    pub const FIT: Self = Self(MIN_ZOOM_SCALE);

    /// Creates a new zoom scale, clamping to the default bounds.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self::with_max(scale, MAX_ZOOM_SCALE)
    }

    /// Creates a new zoom scale clamped to `[1, max]`.
    ///
    /// A `max` below 1 is treated as 1. Non-finite input falls back to 1.
    #[must_use]
    pub fn with_max(scale: f32, max: f32) -> Self {
        let max = max.max(MIN_ZOOM_SCALE);
        if !scale.is_finite() {
            return Self::FIT;
        }
        Self(scale.clamp(MIN_ZOOM_SCALE, max))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether content is at the fitted scale.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM_SCALE
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self::FIT
    }
}
