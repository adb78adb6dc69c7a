// SPDX-License-Identifier: MPL-2.0
//! Pure layout math for the viewer: fitted frames, centering insets and
//! orientation re-projection.
//!
//! Every function here is stateless and tolerant of degenerate input: a
//! natural size or container with a non-positive dimension falls back to the
//! container bounds instead of producing NaN or zero-sized frames.

use crate::domain::{rotation_delta_degrees, Orientation};
use iced_core::{Padding, Point, Rectangle, Size, Vector};

fn is_degenerate(size: Size) -> bool {
    !(size.width > 0.0 && size.height > 0.0) || !size.width.is_finite() || !size.height.is_finite()
}

/// Returns true when the rectangle has no usable area.
#[must_use]
pub fn is_degenerate_rect(rect: Rectangle) -> bool {
    is_degenerate(rect.size())
}

/// Returns the center of `rect`.
#[must_use]
pub fn center_of(rect: Rectangle) -> Point {
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

/// Builds a rectangle of `size` centered on `center`.
#[must_use]
pub fn centered_rect(center: Point, size: Size) -> Rectangle {
    Rectangle::new(
        Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

/// Multiplier that fits `natural` inside `container` without cropping.
///
/// Content smaller than the container is never upscaled, so the factor is
/// at most 1.
fn fit_factor(container: Size, natural: Size) -> f32 {
    (container.width / natural.width)
        .min(container.height / natural.height)
        .min(1.0)
}

/// Size of `natural` fitted to `container` and multiplied by `zoom_scale`.
///
/// Degenerate natural sizes resolve to the container size times the zoom.
#[must_use]
pub fn fitted_size(container: Size, natural: Size, zoom_scale: f32) -> Size {
    let zoom = if zoom_scale.is_finite() && zoom_scale > 0.0 {
        zoom_scale
    } else {
        1.0
    };

    if is_degenerate(natural) || is_degenerate(container) {
        return Size::new(container.width * zoom, container.height * zoom);
    }

    let factor = fit_factor(container, natural) * zoom;
    Size::new(natural.width * factor, natural.height * factor)
}

/// Aspect-preserving "fit" frame for content inside `container`, centered on
/// the container.
///
/// Falls back to the container's own bounds when `natural` is degenerate.
#[must_use]
pub fn fit_frame(container: Rectangle, natural: Size, zoom_scale: f32) -> Rectangle {
    if is_degenerate(natural) || is_degenerate(container.size()) {
        return container;
    }
    centered_rect(
        center_of(container),
        fitted_size(container.size(), natural, zoom_scale),
    )
}

/// Symmetric insets that center undersized content inside `container`.
///
/// Each axis is zero once the zoomed content meets or exceeds the container
/// along that axis.
#[must_use]
pub fn content_insets(container: Rectangle, natural: Size, zoom_scale: f32) -> Padding {
    let size = fitted_size(container.size(), natural, zoom_scale);
    let horizontal = ((container.width - size.width) / 2.0).max(0.0);
    let vertical = ((container.height - size.height) / 2.0).max(0.0);

    Padding {
        top: vertical,
        right: horizontal,
        bottom: vertical,
        left: horizontal,
    }
}

/// Size of `bounds` after a rotation of `degrees` (quarter turns only).
#[must_use]
pub fn rotated_bounds(bounds: Size, degrees: i16) -> Size {
    if degrees.rem_euclid(180) == 90 {
        Size::new(bounds.height, bounds.width)
    } else {
        bounds
    }
}

/// Re-expresses `rect`, given inside a `bounds`-sized space, in the space
/// obtained by rotating that space by `degrees` (a multiple of 90).
///
/// The center is rotated and the extent swapped for quarter turns; the
/// result always lies inside [`rotated_bounds`].
#[must_use]
pub fn reproject_rect(rect: Rectangle, bounds: Size, degrees: i16) -> Rectangle {
    debug_assert!(degrees % 90 == 0, "reprojection only supports quarter turns");

    let w = bounds.width;
    let h = bounds.height;
    match degrees.rem_euclid(360) {
        90 => Rectangle::new(
            Point::new(h - (rect.y + rect.height), rect.x),
            Size::new(rect.height, rect.width),
        ),
        180 => Rectangle::new(
            Point::new(w - (rect.x + rect.width), h - (rect.y + rect.height)),
            rect.size(),
        ),
        270 => Rectangle::new(
            Point::new(rect.y, w - (rect.x + rect.width)),
            Size::new(rect.height, rect.width),
        ),
        _ => rect,
    }
}

/// Re-projects a frame captured at `start` into the coordinate space of
/// `current`, using the orientation rotation table.
#[must_use]
pub fn reproject_between(
    rect: Rectangle,
    start_bounds: Size,
    start: Orientation,
    current: Orientation,
) -> Rectangle {
    reproject_rect(rect, start_bounds, rotation_delta_degrees(start, current))
}

/// Axis-aligned bounding box of `rect` rotated by `angle` radians about its
/// center.
#[must_use]
pub fn rotated_bounding_box(rect: Rectangle, angle: f32) -> Rectangle {
    let (sin, cos) = angle.sin_cos();
    let width = rect.width * cos.abs() + rect.height * sin.abs();
    let height = rect.width * sin.abs() + rect.height * cos.abs();
    centered_rect(center_of(rect), Size::new(width, height))
}

/// Returns true when the two rectangles share some area.
#[must_use]
pub fn intersects(a: Rectangle, b: Rectangle) -> bool {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    right > left && bottom > top
}

/// Returns true once the rotated content no longer overlaps the viewport.
#[must_use]
pub fn is_offscreen(content: Rectangle, angle: f32, viewport: Rectangle) -> bool {
    !intersects(rotated_bounding_box(content, angle), viewport)
}

/// Rectangle of `container / target_scale` size centered on `focus`, the
/// region a zoom to `target_scale` should bring into view.
#[must_use]
pub fn zoom_rect(container: Rectangle, focus: Point, target_scale: f32) -> Rectangle {
    let scale = if target_scale > 0.0 { target_scale } else { 1.0 };
    centered_rect(
        focus,
        Size::new(container.width / scale, container.height / scale),
    )
}

/// Translates `rect` by `offset`.
#[must_use]
pub fn translate(rect: Rectangle, offset: Vector) -> Rectangle {
    Rectangle::new(Point::new(rect.x + offset.x, rect.y + offset.y), rect.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, rect, PX_EPSILON};

    #[test]
    fn fit_frame_keeps_small_content_at_natural_size() {
        let container = rect(0.0, 0.0, 400.0, 800.0);
        let frame = fit_frame(container, Size::new(300.0, 300.0), 1.0);

        assert_abs_diff_eq!(frame.width, 300.0);
        assert_abs_diff_eq!(frame.height, 300.0);
        let center = center_of(frame);
        assert_abs_diff_eq!(center.x, 200.0);
        assert_abs_diff_eq!(center.y, 400.0);
    }

    #[test]
    fn fit_frame_letterboxes_wide_content() {
        let container = rect(0.0, 0.0, 400.0, 800.0);
        let frame = fit_frame(container, Size::new(2000.0, 1000.0), 1.0);

        assert_abs_diff_eq!(frame.width, 400.0, epsilon = PX_EPSILON);
        assert_abs_diff_eq!(frame.height, 200.0, epsilon = PX_EPSILON);
        assert_abs_diff_eq!(frame.y, 300.0, epsilon = PX_EPSILON);
    }

    #[test]
    fn fit_frame_preserves_aspect_ratio() {
        let containers = [(320.0, 480.0), (1024.0, 768.0), (50.0, 900.0)];
        let naturals = [(1.0, 1.0), (4000.0, 3000.0), (123.0, 987.0), (640.0, 20.0)];
        for (cw, ch) in containers {
            for (nw, nh) in naturals {
                for zoom in [1.0, 2.0, 8.0] {
                    let frame = fit_frame(rect(0.0, 0.0, cw, ch), Size::new(nw, nh), zoom);
                    let natural_ratio = nw / nh;
                    let frame_ratio = frame.width / frame.height;
                    assert!(
                        (natural_ratio - frame_ratio).abs() / natural_ratio < 1e-4,
                        "{cw}x{ch} {nw}x{nh} @{zoom}"
                    );
                }
            }
        }
    }

    #[test]
    fn fit_frame_scales_with_zoom() {
        let container = rect(0.0, 0.0, 400.0, 400.0);
        let frame = fit_frame(container, Size::new(800.0, 800.0), 3.0);
        assert_abs_diff_eq!(frame.width, 1200.0, epsilon = PX_EPSILON);
    }

    #[test]
    fn fit_frame_degenerate_natural_size_uses_container() {
        let container = rect(10.0, 20.0, 400.0, 800.0);
        assert_eq!(fit_frame(container, Size::new(0.0, 300.0), 1.0), container);
        assert_eq!(fit_frame(container, Size::new(-5.0, 300.0), 1.0), container);
    }

    #[test]
    fn insets_center_undersized_content() {
        let container = rect(0.0, 0.0, 400.0, 800.0);
        let insets = content_insets(container, Size::new(300.0, 300.0), 1.0);
        assert_abs_diff_eq!(insets.left, 50.0);
        assert_abs_diff_eq!(insets.right, 50.0);
        assert_abs_diff_eq!(insets.top, 250.0);
        assert_abs_diff_eq!(insets.bottom, 250.0);
    }

    #[test]
    fn insets_vanish_when_content_covers_container() {
        let container = rect(0.0, 0.0, 400.0, 800.0);
        let insets = content_insets(container, Size::new(400.0, 400.0), 4.0);
        assert_eq!(insets, Padding::ZERO);
    }

    #[test]
    fn reprojection_round_trips() {
        let bounds = Size::new(400.0, 800.0);
        let original = rect(50.0, 60.0, 100.0, 30.0);
        for degrees in [0_i16, 90, 180, 270, -90] {
            let projected = reproject_rect(original, bounds, degrees);
            let back = reproject_rect(projected, rotated_bounds(bounds, degrees), -degrees);
            assert_abs_diff_eq!(back.x, original.x, epsilon = PX_EPSILON);
            assert_abs_diff_eq!(back.y, original.y, epsilon = PX_EPSILON);
            assert_abs_diff_eq!(back.width, original.width, epsilon = PX_EPSILON);
            assert_abs_diff_eq!(back.height, original.height, epsilon = PX_EPSILON);
        }
    }

    #[test]
    fn quarter_turn_swaps_extent_and_stays_in_bounds() {
        let bounds = Size::new(400.0, 800.0);
        let projected = reproject_rect(rect(50.0, 60.0, 100.0, 30.0), bounds, 90);
        assert_abs_diff_eq!(projected.width, 30.0);
        assert_abs_diff_eq!(projected.height, 100.0);
        let rotated = rotated_bounds(bounds, 90);
        assert!(projected.x >= 0.0 && projected.x + projected.width <= rotated.width);
        assert!(projected.y >= 0.0 && projected.y + projected.height <= rotated.height);
    }

    #[test]
    fn reproject_between_same_orientation_is_identity() {
        let original = rect(5.0, 6.0, 7.0, 8.0);
        let projected = reproject_between(
            original,
            Size::new(100.0, 200.0),
            Orientation::LandscapeLeft,
            Orientation::LandscapeLeft,
        );
        assert_eq!(projected, original);
    }

    #[test]
    fn offscreen_detection_accounts_for_rotation() {
        let viewport = rect(0.0, 0.0, 400.0, 800.0);
        let inside = rect(100.0, 100.0, 100.0, 100.0);
        assert!(!is_offscreen(inside, 0.0, viewport));

        let beyond = rect(410.0, 100.0, 100.0, 100.0);
        assert!(is_offscreen(beyond, 0.0, viewport));

        // Rotated 45° the corner pokes back into the viewport.
        let grazing = rect(405.0, 100.0, 100.0, 100.0);
        assert!(is_offscreen(grazing, 0.0, viewport));
        assert!(!is_offscreen(grazing, std::f32::consts::FRAC_PI_4, viewport));
    }

    #[test]
    fn zoom_rect_is_centered_on_focus() {
        let container = rect(0.0, 0.0, 300.0, 600.0);
        let zoomed = zoom_rect(container, Point::new(100.0, 200.0), 3.0);
        assert_abs_diff_eq!(zoomed.width, 100.0);
        assert_abs_diff_eq!(zoomed.height, 200.0);
        let center = center_of(zoomed);
        assert_abs_diff_eq!(center.x, 100.0);
        assert_abs_diff_eq!(center.y, 200.0);
    }
}
