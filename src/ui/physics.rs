// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss physics.
//!
//! While the user drags fitted content, the grabbed point is attached to
//! the pointer and the content twists around it, resisted more strongly the
//! smaller the content is. On release the content either snaps back to the
//! container center on a damped spring or, when released fast enough, is
//! pushed by an instantaneous impulse and flies until its bounding box has
//! left the viewport.

use crate::config::{PhysicsConfig, PHYSICS_STEP_SECS};
use crate::geometry;
use crate::ui::animation;
use crate::ui::state::DragState;
use iced_core::{Point, Rectangle, Size, Vector};
use std::time::Duration;

/// Velocity gained by a unit push on a 100×100 item of density 1.
const PUSH_UNIT_SPEED: f32 = 100.0;

/// Area of the item the push unit is defined for.
const PUSH_REFERENCE_AREA: f32 = 10_000.0;

/// Largest tilt a drag can give the content, in radians.
const MAX_DRAG_TILT: f32 = 0.35;

fn area(size: Size) -> f32 {
    size.width * size.height
}

fn cross(a: Vector, b: Vector) -> f32 {
    a.x * b.y - a.y * b.x
}

fn magnitude(v: Vector) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

fn rotate(v: Vector, angle: f32) -> Vector {
    let (sin, cos) = angle.sin_cos();
    Vector::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Scale factor `(reference / device) × (reference / content)` shared by
/// the resistance and density formulas. Degenerate sizes count as the
/// reference area.
fn area_scaling(config: &PhysicsConfig, content: Size, device: Size) -> f32 {
    let reference = config.reference_area();
    let ratio = |size: Size| {
        let a = area(size);
        if a > 0.0 && a.is_finite() {
            reference / a
        } else {
            1.0
        }
    };
    ratio(device) * ratio(content)
}

/// Angular resistance for `content` on a `device`-sized screen.
///
/// `base × (reference area / device area) × (reference area / content area)`.
#[must_use]
pub fn angular_resistance(config: &PhysicsConfig, content: Size, device: Size) -> f32 {
    config.base_angular_resistance * area_scaling(config, content, device)
}

/// Density for `content` on a `device`-sized screen, scaled like the
/// angular resistance.
#[must_use]
pub fn density(config: &PhysicsConfig, content: Size, device: Size) -> f32 {
    config.base_density * area_scaling(config, content, device)
}

/// Content bound to the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub center: Point,
    pub angle: f32,
    pub size: Size,
    pub velocity: Vector,
    pub angular_velocity: f32,
    pub angular_resistance: f32,
    pub density: f32,

    /// Pointer anchor the content is attached to while dragging.
    pub attachment: Option<Point>,

    /// Impulse applied at release, kept for inspection.
    pub impulse: Option<Vector>,
}

impl PhysicsBody {
    #[must_use]
    pub fn frame(&self) -> Rectangle {
        geometry::centered_rect(self.center, self.size)
    }
}

/// What a pan release turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Content was pushed away; keep stepping until it is offscreen.
    Flick,
    /// Fast release without grabbing the content: dismiss right away.
    Dismiss,
    /// Content springs back to the container center.
    SnapBack,
    /// Slow release that never grabbed the content.
    Ignored,
}

/// Progress reported by [`PhysicsDismissal::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Idle,
    Moving,
    SnapBackFinished,
    /// Reported once, on the step the flicked content left the viewport.
    Offscreen,
}

#[derive(Debug, Clone)]
struct SnapBack {
    from_center: Point,
    from_angle: f32,
    to_center: Point,
    size: Size,
    elapsed: Duration,
    duration: Duration,
    damping: f32,
}

impl SnapBack {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        animation::spring(
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32(),
            self.damping,
        )
    }

    fn center(&self) -> Point {
        animation::lerp_point(self.from_center, self.to_center, self.progress())
    }

    fn angle(&self) -> f32 {
        animation::lerp(self.from_angle, 0.0, self.progress())
    }
}

/// Owns the drag state and physics body for one pan gesture at a time.
#[derive(Debug, Clone)]
pub struct PhysicsDismissal {
    config: PhysicsConfig,
    drag: DragState,
    dragging_content: bool,
    body: Option<PhysicsBody>,
    flicking: bool,
    offscreen: bool,
    snap: Option<SnapBack>,
    step_accumulator: f32,
}

impl Default for PhysicsDismissal {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsDismissal {
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            drag: DragState::default(),
            dragging_content: false,
            body: None,
            flicking: false,
            offscreen: false,
            snap: None,
            step_accumulator: 0.0,
        }
    }

    #[must_use]
    pub fn is_dragging_content(&self) -> bool {
        self.dragging_content
    }

    #[must_use]
    pub fn is_flicking(&self) -> bool {
        self.flicking
    }

    #[must_use]
    pub fn is_snapping_back(&self) -> bool {
        self.snap.is_some()
    }

    /// Returns true while the simulation, not the layout, positions content.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dragging_content || self.flicking || self.snap.is_some()
    }

    #[must_use]
    pub fn body(&self) -> Option<&PhysicsBody> {
        self.body.as_ref()
    }

    /// Frame and rotation of the content while the simulation owns it.
    #[must_use]
    pub fn content_pose(&self) -> Option<(Rectangle, f32)> {
        if let Some(snap) = &self.snap {
            return Some((geometry::centered_rect(snap.center(), snap.size), snap.angle()));
        }
        self.body.as_ref().map(|body| (body.frame(), body.angle))
    }

    /// Starts a pan at `pointer`. Returns whether the content was grabbed.
    ///
    /// A pointer outside `content` still starts a gesture, which can only
    /// end in a velocity dismissal.
    pub fn begin(&mut self, pointer: Point, content: Rectangle, device: Size) -> bool {
        if self.flicking {
            return false;
        }

        let (frame, angle) = match self.snap.take() {
            Some(snap) => (
                geometry::centered_rect(snap.center(), snap.size),
                snap.angle(),
            ),
            None => (content, 0.0),
        };

        let center = geometry::center_of(frame);
        self.drag.start(pointer, center);
        self.dragging_content = frame.contains(pointer);

        if self.dragging_content {
            let size = frame.size();
            self.body = Some(PhysicsBody {
                center,
                angle,
                size,
                velocity: Vector::new(0.0, 0.0),
                angular_velocity: 0.0,
                angular_resistance: angular_resistance(&self.config, size, device),
                density: density(&self.config, size, device),
                attachment: Some(pointer),
                impulse: None,
            });
            tracing::debug!(?pointer, "content drag started");
        } else {
            self.body = None;
        }
        self.dragging_content
    }

    /// Moves the attachment anchor by the cumulative `translation`.
    pub fn update(&mut self, translation: Vector) -> Option<(Rectangle, f32)> {
        let anchor = self.drag.update(translation)?;
        if !self.dragging_content {
            return None;
        }
        let offset = self.drag.offset_from_center;
        let body = self.body.as_mut()?;

        let size = body.size;
        let lever = (size.width * size.width + size.height * size.height) / 4.0;
        let twist = if lever > 0.0 {
            cross(offset, translation) / (lever * (1.0 + body.angular_resistance))
        } else {
            0.0
        };
        body.angle = twist.clamp(-MAX_DRAG_TILT, MAX_DRAG_TILT);
        body.attachment = Some(anchor);
        body.center = anchor - rotate(offset, body.angle);

        Some((body.frame(), body.angle))
    }

    /// Ends the pan with the given release `velocity` (px/s).
    pub fn release(&mut self, velocity: Vector, container: Rectangle) -> ReleaseOutcome {
        let speed = magnitude(velocity);
        let fast = speed >= self.config.flick_velocity_threshold;
        let offset = self.drag.offset_from_center;
        self.drag.stop();

        let grabbed = std::mem::replace(&mut self.dragging_content, false);

        if fast && grabbed {
            if let Some(body) = self.body.as_mut() {
                let impulse = Vector::new(
                    velocity.x * self.config.flick_impulse_scale,
                    velocity.y * self.config.flick_impulse_scale,
                );
                let mass = (area(body.size) * body.density).max(f32::EPSILON);
                let gain = PUSH_UNIT_SPEED * PUSH_REFERENCE_AREA / mass;
                body.velocity = Vector::new(impulse.x * gain, impulse.y * gain);

                let inertia = (body.size.width * body.size.width
                    + body.size.height * body.size.height)
                    / 12.0;
                if inertia > 0.0 {
                    body.angular_velocity =
                        cross(rotate(offset, body.angle), body.velocity) / inertia;
                }
                body.attachment = None;
                body.impulse = Some(impulse);
                self.flicking = true;
                self.offscreen = false;
                self.step_accumulator = 0.0;
                tracing::debug!(speed, "flicking content away");
                return ReleaseOutcome::Flick;
            }
        }

        if fast {
            self.body = None;
            tracing::debug!(speed, "fast release outside content");
            return ReleaseOutcome::Dismiss;
        }

        match self.body.take() {
            Some(body) if grabbed => {
                self.snap = Some(SnapBack {
                    from_center: body.center,
                    from_angle: body.angle,
                    to_center: geometry::center_of(container),
                    size: body.size,
                    elapsed: Duration::ZERO,
                    duration: self.config.snap_back(),
                    damping: self.config.snap_back_damping,
                });
                ReleaseOutcome::SnapBack
            }
            _ => ReleaseOutcome::Ignored,
        }
    }

    /// Abandons the gesture, snapping grabbed content back.
    pub fn cancel(&mut self, container: Rectangle) {
        if self.flicking {
            return;
        }
        self.release(Vector::new(0.0, 0.0), container);
    }

    /// Advances the simulation by `elapsed`.
    pub fn step(&mut self, elapsed: Duration, viewport: Rectangle) -> StepOutcome {
        if let Some(snap) = self.snap.as_mut() {
            snap.elapsed += elapsed;
            if snap.elapsed >= snap.duration {
                self.snap = None;
                return StepOutcome::SnapBackFinished;
            }
            return StepOutcome::Moving;
        }

        if !self.flicking || self.offscreen {
            return StepOutcome::Idle;
        }
        let Some(body) = self.body.as_mut() else {
            return StepOutcome::Idle;
        };

        self.step_accumulator += elapsed.as_secs_f32();
        while self.step_accumulator >= PHYSICS_STEP_SECS {
            self.step_accumulator -= PHYSICS_STEP_SECS;
            let dt = PHYSICS_STEP_SECS;
            body.center = body.center + Vector::new(body.velocity.x * dt, body.velocity.y * dt);
            body.angle += body.angular_velocity * dt;
            body.angular_velocity *= (1.0 - body.angular_resistance * dt).max(0.0);

            if geometry::is_offscreen(body.frame(), body.angle, viewport) {
                self.offscreen = true;
                tracing::debug!("flicked content left the viewport");
                return StepOutcome::Offscreen;
            }
        }
        StepOutcome::Moving
    }

    /// Drops all physics state.
    pub fn reset(&mut self) {
        self.drag.stop();
        self.dragging_content = false;
        self.body = None;
        self.flicking = false;
        self.offscreen = false;
        self.snap = None;
        self.step_accumulator = 0.0;
    }
}
