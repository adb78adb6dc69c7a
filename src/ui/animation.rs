// SPDX-License-Identifier: MPL-2.0
//! Interpolation and easing used by the transition phases and snap-back.

use iced_core::{Point, Rectangle, Size};

/// Envelope decay (in e-folds) reached at the end of a spring animation,
/// leaving about 1% of the initial displacement before the final snap.
const SPRING_SETTLE_EFOLDS: f32 = 4.6;

/// Smooth ease-in-out curve over `t ∈ [0, 1]`.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Step response of an under-damped spring over normalized time `t ∈ [0, 1]`.
///
/// Returns 0 at `t = 0` and exactly 1 at `t >= 1`; in between it may
/// overshoot slightly, as a damped spring does.
#[must_use]
pub fn spring(t: f32, damping_ratio: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }

    let zeta = damping_ratio.clamp(0.05, 0.99);
    let omega = SPRING_SETTLE_EFOLDS / zeta;
    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let envelope = (-zeta * omega * t).exp();
    1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
}

#[must_use]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[must_use]
pub fn lerp_point(from: Point, to: Point, t: f32) -> Point {
    Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

/// Interpolates a frame by center and size so that content grows from and
/// shrinks into its anchor symmetrically.
#[must_use]
pub fn lerp_rect(from: Rectangle, to: Rectangle, t: f32) -> Rectangle {
    let from_center = crate::geometry::center_of(from);
    let to_center = crate::geometry::center_of(to);
    let center = lerp_point(from_center, to_center, t);
    let size = Size::new(
        lerp(from.width, to.width, t),
        lerp(from.height, to.height, t),
    );
    crate::geometry::centered_rect(center, size)
}
