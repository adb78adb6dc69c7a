// SPDX-License-Identifier: MPL-2.0
//! Explicit sequencing of the presentation and dismissal animations.
//!
//! Each [`Phase`] goes through begin, animate and complete in order. The
//! queue only starts the next phase after the previous one completed, so a
//! completion always sees the state its own begin step set up.

use crate::domain::{PhaseKind, ZoomScale};
use crate::ui::animation;
use iced_core::{Padding, Point, Rectangle, Size};
use std::collections::VecDeque;
use std::time::Duration;

/// Everything a renderer needs to draw the viewer for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub content_frame: Rectangle,
    /// Content rotation about its center, in radians.
    pub content_rotation: f32,
    pub content_alpha: f32,
    /// Extra scale applied about the content center.
    pub content_scale: f32,
    pub background_scale: f32,
    pub dimming_alpha: f32,
    pub blur_alpha: f32,
    pub thumbnail_alpha: f32,
    pub overlay_bar_hidden: bool,
    pub insets: Padding,
    pub zoom: ZoomScale,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            content_frame: Rectangle::new(Point::ORIGIN, Size::ZERO),
            content_rotation: 0.0,
            content_alpha: 0.0,
            content_scale: 1.0,
            background_scale: 1.0,
            dimming_alpha: 0.0,
            blur_alpha: 0.0,
            thumbnail_alpha: 1.0,
            overlay_bar_hidden: false,
            insets: Padding::ZERO,
            zoom: ZoomScale::FIT,
        }
    }
}

impl Presentation {
    /// Interpolates between two presentations at eased progress `t`.
    #[must_use]
    pub fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        if t >= 1.0 {
            return *to;
        }
        Self {
            content_frame: animation::lerp_rect(from.content_frame, to.content_frame, t),
            content_rotation: animation::lerp(from.content_rotation, to.content_rotation, t),
            content_alpha: animation::lerp(from.content_alpha, to.content_alpha, t),
            content_scale: animation::lerp(from.content_scale, to.content_scale, t),
            background_scale: animation::lerp(from.background_scale, to.background_scale, t),
            dimming_alpha: animation::lerp(from.dimming_alpha, to.dimming_alpha, t),
            blur_alpha: animation::lerp(from.blur_alpha, to.blur_alpha, t),
            thumbnail_alpha: animation::lerp(from.thumbnail_alpha, to.thumbnail_alpha, t),
            // The bar stays hidden for as long as either end hides it.
            overlay_bar_hidden: from.overlay_bar_hidden || to.overlay_bar_hidden,
            insets: to.insets,
            zoom: to.zoom,
        }
    }
}

/// One step of a transition sequence.
#[derive(Debug, Clone)]
pub struct Phase {
    pub kind: PhaseKind,
    pub duration: Duration,
    elapsed: Duration,
    began: bool,
    pub from: Presentation,
    pub to: Presentation,
}

impl Phase {
    #[must_use]
    pub fn new(kind: PhaseKind, duration: Duration) -> Self {
        Self {
            kind,
            duration,
            elapsed: Duration::ZERO,
            began: false,
            from: Presentation::default(),
            to: Presentation::default(),
        }
    }

    #[must_use]
    pub fn has_begun(&self) -> bool {
        self.began
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        animation::ease_in_out(self.elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn current(&self) -> Presentation {
        Presentation::interpolate(&self.from, &self.to, self.progress())
    }

    /// Advances by `elapsed` and returns the time left over past completion.
    fn advance(&mut self, elapsed: Duration) -> Duration {
        let remaining = self.duration.saturating_sub(self.elapsed);
        if elapsed >= remaining {
            self.elapsed = self.duration;
            elapsed - remaining
        } else {
            self.elapsed += elapsed;
            Duration::ZERO
        }
    }
}

/// Progress reported by [`PhaseQueue::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    /// The front phase needs its begin step.
    Begin(PhaseKind),
    /// The front phase finished and was removed.
    Completed(PhaseKind),
    /// Time ran out with the front phase still animating.
    Animating,
    Empty,
}

/// Ordered queue of phases driven by the controller's clock.
#[derive(Debug, Clone, Default)]
pub struct PhaseQueue {
    phases: VecDeque<Phase>,
    completed: Option<Phase>,
}

impl PhaseQueue {
    pub fn push(&mut self, phase: Phase) {
        self.phases.push_back(phase);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Phase> {
        self.phases.front()
    }

    pub fn current_mut(&mut self) -> Option<&mut Phase> {
        self.phases.front_mut()
    }

    /// Marks the front phase as begun with the given endpoints.
    pub fn begin(&mut self, from: Presentation, to: Presentation) {
        if let Some(phase) = self.phases.front_mut() {
            phase.from = from;
            phase.to = to;
            phase.began = true;
        }
    }

    /// Moves the sequence forward by at most `budget`.
    ///
    /// Returns the next step to handle and the unused time. Callers loop
    /// until [`PhaseStep::Animating`] or [`PhaseStep::Empty`].
    pub fn step(&mut self, budget: Duration) -> (PhaseStep, Duration) {
        let Some(phase) = self.phases.front_mut() else {
            return (PhaseStep::Empty, budget);
        };
        if !phase.began {
            return (PhaseStep::Begin(phase.kind), budget);
        }

        let left = phase.advance(budget);
        if phase.is_complete() {
            let kind = phase.kind;
            self.completed = self.phases.pop_front();
            (PhaseStep::Completed(kind), left)
        } else {
            (PhaseStep::Animating, Duration::ZERO)
        }
    }

    /// Last phase removed by [`PhaseQueue::step`].
    #[must_use]
    pub fn last_completed(&self) -> Option<&Phase> {
        self.completed.as_ref()
    }

    pub fn clear(&mut self) {
        self.phases.clear();
        self.completed = None;
    }
}
