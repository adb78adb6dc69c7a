// SPDX-License-Identifier: MPL-2.0
//! Host presentation port.
//!
//! The host owns the real view hierarchy. The controller asks it to put the
//! overlay on screen, to capture the background it animates, and about the
//! environment (orientation, status bar) it has to restore afterwards.

use crate::domain::{Orientation, OverlayBarStyle, ReferenceView, SurfaceHandle};
use iced_core::Rectangle;

/// Port for the application hosting the viewer.
///
/// All methods are called on the UI loop.
pub trait Host {
    /// Puts the overlay on screen. Returns `false` if the presenting context
    /// is gone, in which case the presentation is abandoned.
    fn present_overlay(&mut self, animated: bool) -> bool;

    /// Removes the overlay.
    fn dismiss_overlay(&mut self, animated: bool);

    /// Captures the visible host content. `None` if nothing can be captured.
    fn capture_snapshot(&mut self) -> Option<SurfaceHandle>;

    /// Captures the visible host content blurred by `radius`.
    fn capture_blurred_snapshot(&mut self, radius: f32) -> Option<SurfaceHandle>;

    fn current_orientation(&self) -> Orientation;

    fn overlay_bar_visible(&self) -> bool;

    fn overlay_bar_style(&self) -> OverlayBarStyle;

    /// Shows or hides the overlay bar with the given style.
    fn set_overlay_bar(&mut self, visible: bool, style: OverlayBarStyle);

    /// Bounds of the overlay container in host coordinates.
    fn container_bounds(&self) -> Rectangle;

    /// Converts `rect` from `view`'s coordinates into host coordinates.
    ///
    /// Returns `None` once `view` has left the visible hierarchy.
    fn locate_reference(&self, view: ReferenceView, rect: Rectangle) -> Option<Rectangle>;
}
