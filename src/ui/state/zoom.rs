// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! This module owns the viewer's zoom scale and scroll position:
//! - Double-tap toggling between fitted and magnified content
//! - Pinch scaling clamped to the configured bounds
//! - Native pan/scroll while magnified
//! - The settle lockout that follows every zoom animation

use crate::config::ZoomConfig;
use crate::domain::ZoomScale;
use crate::geometry;
use iced_core::{Padding, Point, Rectangle, Size, Vector};

/// Result of a double tap: the scale to animate to and the region of the
/// content that should fill the container afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTarget {
    pub scale: ZoomScale,
    pub rect: Rectangle,
}

/// Manages all zoom-related state for the presented content.
#[derive(Debug, Clone)]
pub struct ZoomController {
    scale: ZoomScale,

    /// Translation of the centered, fitted frame (scroll position).
    pan: Vector,

    /// Whether a zoom animation is in flight; gestures are ignored until
    /// the owner calls [`ZoomController::finish_animation`].
    animating: bool,

    /// Scale when the current pinch began; pinch scales are relative to it.
    pinch_start: Option<ZoomScale>,

    config: ZoomConfig,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomController {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            scale: ZoomScale::FIT,
            pan: Vector::new(0.0, 0.0),
            animating: false,
            pinch_start: None,
            config,
        }
    }

    #[must_use]
    pub fn scale(&self) -> ZoomScale {
        self.scale
    }

    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Returns whether content is exactly at the fitted scale.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.scale.is_min()
    }

    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    fn clamp_scale(&self, scale: f32) -> ZoomScale {
        ZoomScale::with_max(scale, self.config.max_scale)
    }

    /// Toggles between fitted and magnified content around `tap`.
    ///
    /// From the fitted scale the target is the configured double-tap zoom,
    /// otherwise the target is the fitted scale. Returns `None` while a zoom
    /// animation is still settling.
    pub fn double_tap(
        &mut self,
        tap: Point,
        container: Rectangle,
        natural: Size,
    ) -> Option<ZoomTarget> {
        if self.animating {
            return None;
        }
        self.pinch_start = None;

        let target = if self.is_fitted() {
            let scale = self.clamp_scale(self.config.double_tap_target);
            let center = geometry::center_of(container);
            let factor = scale.value() / self.scale.value();
            self.pan = Vector::new(-(tap.x - center.x) * factor, -(tap.y - center.y) * factor);
            ZoomTarget {
                scale,
                rect: geometry::zoom_rect(container, tap, scale.value()),
            }
        } else {
            self.pan = Vector::new(0.0, 0.0);
            ZoomTarget {
                scale: ZoomScale::FIT,
                rect: container,
            }
        };

        self.scale = target.scale;
        self.clamp_pan(container, natural);
        self.animating = true;
        tracing::debug!(scale = target.scale.value(), "double-tap zoom");
        Some(target)
    }

    /// Applies a cumulative pinch scale, relative to the zoom at the start
    /// of the pinch. Ignored while a zoom animation is settling.
    pub fn pinch(&mut self, scale: f32, container: Rectangle, natural: Size) -> bool {
        if self.animating {
            return false;
        }
        let start = *self.pinch_start.get_or_insert(self.scale);
        let previous = self.scale.value();
        self.scale = self.clamp_scale(start.value() * scale);
        let ratio = self.scale.value() / previous;
        self.pan = Vector::new(self.pan.x * ratio, self.pan.y * ratio);
        self.clamp_pan(container, natural);
        true
    }

    /// Scrolls magnified content by `delta`. Ignored while settling or when
    /// content is fitted.
    pub fn scroll_by(&mut self, delta: Vector, container: Rectangle, natural: Size) -> bool {
        if self.animating || self.is_fitted() {
            return false;
        }
        self.pan = self.pan + delta;
        self.clamp_pan(container, natural);
        true
    }

    fn clamp_pan(&mut self, container: Rectangle, natural: Size) {
        let size = geometry::fitted_size(container.size(), natural, self.scale.value());
        let max_x = ((size.width - container.width) / 2.0).max(0.0);
        let max_y = ((size.height - container.height) / 2.0).max(0.0);
        self.pan = Vector::new(
            self.pan.x.clamp(-max_x, max_x),
            self.pan.y.clamp(-max_y, max_y),
        );
    }

    /// Ends the current pinch; the next pinch starts from the current scale.
    pub fn end_pinch(&mut self) {
        self.pinch_start = None;
    }

    /// Ends the settle lockout.
    pub fn finish_animation(&mut self) {
        self.animating = false;
    }

    /// Returns to fitted content without animation.
    pub fn reset(&mut self) {
        self.scale = ZoomScale::FIT;
        self.pan = Vector::new(0.0, 0.0);
        self.animating = false;
        self.pinch_start = None;
    }

    /// Content frame for the current scale and scroll position.
    #[must_use]
    pub fn content_frame(&self, container: Rectangle, natural: Size) -> Rectangle {
        geometry::translate(
            geometry::fit_frame(container, natural, self.scale.value()),
            self.pan,
        )
    }

    /// Insets centering undersized content at the current scale.
    #[must_use]
    pub fn insets(&self, container: Rectangle, natural: Size) -> Padding {
        geometry::content_insets(container, natural, self.scale.value())
    }
}
