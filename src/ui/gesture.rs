// SPDX-License-Identifier: MPL-2.0
//! Gesture recognition and routing for the presented viewer.
//!
//! [`Recognizer`] turns raw pointer samples into taps, long presses, pans
//! and pinches. Single taps are only reported once the double-tap window has
//! lapsed, so a double tap is never seen as two single taps.
//!
//! [`Coordinator`] decides which part of the viewer handles each gesture:
//! pans go to drag-to-dismiss physics only while content is fitted and no
//! zoom animation is settling, and to the zoom scroller otherwise.

use crate::config::GestureConfig;
use crate::ui::state::timer::Deferred;
use iced_core::{Point, Vector};
use std::collections::VecDeque;
use std::time::Duration;

/// Window of pointer samples used to estimate release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Moved(Point),
    Up(Point),
    Cancelled,
    /// Cumulative pinch scale around `center`.
    Pinch { scale: f32, center: Point },
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    SingleTap(Point),
    DoubleTap(Point),
    LongPress(Point),
    PanBegan(Point),
    PanChanged { translation: Vector },
    PanEnded { translation: Vector, velocity: Vector },
    PanCancelled,
    Pinch { scale: f32, center: Point },
    PinchEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    LongPress,
    TapWindow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { origin: Point },
    Panning { origin: Point },
    LongPressed,
    Pinching,
}

/// Turns pointer samples into gestures on the UI loop's clock.
#[derive(Debug, Clone)]
pub struct Recognizer {
    config: GestureConfig,
    phase: Phase,
    now: Duration,
    timers: Deferred<Timer>,
    pending_tap: Option<Point>,
    samples: VecDeque<(Duration, Point)>,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

fn distance(a: Point, b: Point) -> f32 {
    let d = b - a;
    (d.x * d.x + d.y * d.y).sqrt()
}

impl Recognizer {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            now: Duration::ZERO,
            timers: Deferred::default(),
            pending_tap: None,
            samples: VecDeque::new(),
        }
    }

    /// Returns true while a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.phase, Phase::Panning { .. })
    }

    /// Feeds one pointer sample.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Gesture> {
        let mut gestures = Vec::new();
        match (event, self.phase) {
            (PointerEvent::Down(position), Phase::Idle) => {
                self.phase = Phase::Pressed { origin: position };
                self.timers
                    .schedule(Timer::LongPress, self.config.long_press_delay());
                self.samples.clear();
                self.record(position);
            }
            (PointerEvent::Down(_), _) => {}

            (PointerEvent::Moved(position), Phase::Pressed { origin }) => {
                if distance(origin, position) > self.config.touch_slop {
                    self.timers.cancel(Timer::LongPress);
                    self.flush_pending_tap(&mut gestures);
                    self.phase = Phase::Panning { origin };
                    self.record(position);
                    gestures.push(Gesture::PanBegan(origin));
                    gestures.push(Gesture::PanChanged {
                        translation: position - origin,
                    });
                }
            }
            (PointerEvent::Moved(position), Phase::Panning { origin }) => {
                self.record(position);
                gestures.push(Gesture::PanChanged {
                    translation: position - origin,
                });
            }
            (PointerEvent::Moved(_), _) => {}

            (PointerEvent::Up(position), Phase::Pressed { .. }) => {
                self.timers.cancel(Timer::LongPress);
                self.phase = Phase::Idle;
                if self.pending_tap.take().is_some() {
                    self.timers.cancel(Timer::TapWindow);
                    gestures.push(Gesture::DoubleTap(position));
                } else {
                    self.pending_tap = Some(position);
                    self.timers
                        .schedule(Timer::TapWindow, self.config.double_tap_interval());
                }
            }
            (PointerEvent::Up(position), Phase::Panning { origin }) => {
                self.record(position);
                gestures.push(Gesture::PanEnded {
                    translation: position - origin,
                    velocity: self.velocity(),
                });
                self.phase = Phase::Idle;
                self.samples.clear();
            }
            (PointerEvent::Up(_) | PointerEvent::Cancelled, Phase::Pinching) => {
                self.phase = Phase::Idle;
                gestures.push(Gesture::PinchEnded);
            }
            (PointerEvent::Up(_), _) => {
                self.phase = Phase::Idle;
            }

            (PointerEvent::Cancelled, phase) => {
                self.timers.cancel(Timer::LongPress);
                if matches!(phase, Phase::Panning { .. }) {
                    gestures.push(Gesture::PanCancelled);
                }
                self.phase = Phase::Idle;
                self.samples.clear();
            }

            (PointerEvent::Pinch { scale, center }, phase) => {
                self.timers.cancel(Timer::LongPress);
                self.timers.cancel(Timer::TapWindow);
                self.pending_tap = None;
                if matches!(phase, Phase::Panning { .. }) {
                    gestures.push(Gesture::PanCancelled);
                }
                self.phase = Phase::Pinching;
                gestures.push(Gesture::Pinch { scale, center });
            }
        }
        gestures
    }

    /// Advances the recognizer clock, firing long presses and lapsed taps.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Gesture> {
        self.now += elapsed;
        let mut gestures = Vec::new();
        for timer in self.timers.advance(elapsed) {
            match (timer, self.phase) {
                (Timer::LongPress, Phase::Pressed { origin }) => {
                    self.flush_pending_tap(&mut gestures);
                    self.phase = Phase::LongPressed;
                    gestures.push(Gesture::LongPress(origin));
                }
                // A press still down when the window lapses starts a new tap.
                (Timer::TapWindow, _) => {
                    self.flush_pending_tap(&mut gestures);
                }
                (Timer::LongPress, _) => {}
            }
        }
        gestures
    }

    /// Drops any in-progress recognition.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.timers.clear();
        self.pending_tap = None;
        self.samples.clear();
    }

    fn flush_pending_tap(&mut self, gestures: &mut Vec<Gesture>) {
        if let Some(tap) = self.pending_tap.take() {
            self.timers.cancel(Timer::TapWindow);
            gestures.push(Gesture::SingleTap(tap));
        }
    }

    fn record(&mut self, position: Point) {
        self.samples.push_back((self.now, position));
        while let Some(&(at, _)) = self.samples.front() {
            if self.now.saturating_sub(at) > VELOCITY_WINDOW && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    fn velocity(&self) -> Vector {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back())
        else {
            return Vector::new(0.0, 0.0);
        };
        let dt = t1.saturating_sub(t0).as_secs_f32();
        if dt <= 0.0 {
            return Vector::new(0.0, 0.0);
        }
        Vector::new((p1.x - p0.x) / dt, (p1.y - p0.y) / dt)
    }
}

/// Viewer state the coordinator routes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteContext {
    pub interactive: bool,
    pub zoom_fitted: bool,
    pub zoom_animating: bool,
    pub flicking: bool,
    pub ignore_touches: bool,
}

/// Where a gesture should go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    Ignore,
    Dismiss,
    ToggleZoom(Point),
    Pinch { scale: f32, center: Point },
    PinchEnded,
    LongPress(Point),
    DragBegan(Point),
    DragMoved(Vector),
    DragEnded(Vector),
    DragCancelled,
    Scroll(Vector),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanOwner {
    Physics,
    Scroller,
}

/// Routes recognized gestures to zoom, physics or dismissal.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    pan_owner: Option<PanOwner>,
    last_translation: Vector,
}

impl Coordinator {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pan_owner == Some(PanOwner::Physics)
    }

    pub fn route(&mut self, gesture: Gesture, context: &RouteContext) -> Route {
        // Pans that already started are always finished by their owner.
        match (gesture, self.pan_owner) {
            (Gesture::PanChanged { translation }, Some(owner)) => {
                return self.continue_pan(owner, translation, context);
            }
            (Gesture::PanEnded { translation, velocity }, Some(owner)) => {
                self.pan_owner = None;
                return match owner {
                    PanOwner::Physics => Route::DragEnded(velocity),
                    PanOwner::Scroller => self.scroll_delta(translation),
                };
            }
            (Gesture::PanCancelled, Some(owner)) => {
                self.pan_owner = None;
                return match owner {
                    PanOwner::Physics => Route::DragCancelled,
                    PanOwner::Scroller => Route::Ignore,
                };
            }
            (Gesture::PinchEnded, _) => return Route::PinchEnded,
            _ => {}
        }

        if context.ignore_touches || !context.interactive || context.flicking {
            return Route::Ignore;
        }

        match gesture {
            Gesture::SingleTap(_) if context.zoom_animating => Route::Ignore,
            Gesture::SingleTap(_) => Route::Dismiss,
            Gesture::DoubleTap(_) | Gesture::Pinch { .. } if context.zoom_animating => {
                Route::Ignore
            }
            Gesture::DoubleTap(position) => Route::ToggleZoom(position),
            Gesture::Pinch { scale, center } => Route::Pinch { scale, center },
            Gesture::LongPress(position) => Route::LongPress(position),
            Gesture::PanBegan(origin) => {
                self.last_translation = Vector::new(0.0, 0.0);
                if context.zoom_animating {
                    Route::Ignore
                } else if context.zoom_fitted {
                    self.pan_owner = Some(PanOwner::Physics);
                    Route::DragBegan(origin)
                } else {
                    self.pan_owner = Some(PanOwner::Scroller);
                    Route::Ignore
                }
            }
            Gesture::PanChanged { .. }
            | Gesture::PanEnded { .. }
            | Gesture::PanCancelled
            | Gesture::PinchEnded => {
                Route::Ignore
            }
        }
    }

    fn continue_pan(&mut self, owner: PanOwner, translation: Vector, context: &RouteContext) -> Route {
        match owner {
            PanOwner::Physics => Route::DragMoved(translation),
            PanOwner::Scroller if context.zoom_animating => {
                self.last_translation = translation;
                Route::Ignore
            }
            PanOwner::Scroller => self.scroll_delta(translation),
        }
    }

    fn scroll_delta(&mut self, translation: Vector) -> Route {
        let delta = translation - self.last_translation;
        self.last_translation = translation;
        Route::Scroll(delta)
    }

    pub fn reset(&mut self) {
        self.pan_owner = None;
        self.last_translation = Vector::new(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(recognizer: &mut Recognizer, at: Point) -> Vec<Gesture> {
        let mut gestures = recognizer.handle(PointerEvent::Down(at));
        gestures.extend(recognizer.handle(PointerEvent::Up(at)));
        gestures
    }

    fn interactive() -> RouteContext {
        RouteContext {
            interactive: true,
            zoom_fitted: true,
            ..RouteContext::default()
        }
    }

    #[test]
    fn single_tap_waits_for_double_tap_window() {
        let mut recognizer = Recognizer::default();
        let at = Point::new(100.0, 100.0);

        assert!(tap(&mut recognizer, at).is_empty());
        assert!(recognizer.advance(Duration::from_millis(200)).is_empty());
        assert_eq!(
            recognizer.advance(Duration::from_millis(100)),
            vec![Gesture::SingleTap(at)]
        );
    }

    #[test]
    fn two_quick_taps_are_one_double_tap() {
        let mut recognizer = Recognizer::default();
        let at = Point::new(100.0, 100.0);

        tap(&mut recognizer, at);
        recognizer.advance(Duration::from_millis(120));
        assert_eq!(tap(&mut recognizer, at), vec![Gesture::DoubleTap(at)]);
        assert!(recognizer.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn held_press_becomes_long_press() {
        let mut recognizer = Recognizer::default();
        let at = Point::new(30.0, 40.0);

        recognizer.handle(PointerEvent::Down(at));
        recognizer.handle(PointerEvent::Moved(Point::new(33.0, 41.0)));
        assert_eq!(
            recognizer.advance(Duration::from_millis(500)),
            vec![Gesture::LongPress(at)]
        );
        assert!(recognizer.handle(PointerEvent::Up(at)).is_empty());
        assert!(recognizer.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn moving_past_slop_starts_pan() {
        let mut recognizer = Recognizer::default();
        let origin = Point::new(100.0, 100.0);

        recognizer.handle(PointerEvent::Down(origin));
        let gestures = recognizer.handle(PointerEvent::Moved(Point::new(100.0, 120.0)));
        assert_eq!(
            gestures,
            vec![
                Gesture::PanBegan(origin),
                Gesture::PanChanged {
                    translation: Vector::new(0.0, 20.0)
                }
            ]
        );
        assert!(recognizer.is_panning());
        assert!(recognizer.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn pan_release_reports_velocity() {
        let mut recognizer = Recognizer::default();
        recognizer.handle(PointerEvent::Down(Point::new(0.0, 0.0)));
        recognizer.handle(PointerEvent::Moved(Point::new(0.0, 10.0)));
        recognizer.advance(Duration::from_millis(50));
        let gestures = recognizer.handle(PointerEvent::Up(Point::new(0.0, 60.0)));

        let Some(Gesture::PanEnded {
            translation,
            velocity,
        }) = gestures.first().copied()
        else {
            panic!("expected pan end, got {gestures:?}");
        };
        assert_eq!(translation, Vector::new(0.0, 60.0));
        assert!((velocity.y - 1200.0).abs() < 1.0);
    }

    #[test]
    fn pinch_cancels_pending_tap() {
        let mut recognizer = Recognizer::default();
        tap(&mut recognizer, Point::new(10.0, 10.0));
        let center = Point::new(50.0, 50.0);
        assert_eq!(
            recognizer.handle(PointerEvent::Pinch { scale: 2.0, center }),
            vec![Gesture::Pinch { scale: 2.0, center }]
        );
        assert!(recognizer.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn lifting_fingers_ends_pinch() {
        let mut recognizer = Recognizer::default();
        let center = Point::new(50.0, 50.0);
        recognizer.handle(PointerEvent::Pinch { scale: 1.4, center });
        assert_eq!(
            recognizer.handle(PointerEvent::Up(center)),
            vec![Gesture::PinchEnded]
        );

        recognizer.handle(PointerEvent::Pinch { scale: 0.8, center });
        assert_eq!(
            recognizer.handle(PointerEvent::Cancelled),
            vec![Gesture::PinchEnded]
        );
        assert!(recognizer.handle(PointerEvent::Up(center)).is_empty());
    }

    #[test]
    fn tap_window_lapsing_during_second_press_emits_first_tap() {
        let mut recognizer = Recognizer::default();
        let at = Point::new(100.0, 100.0);

        tap(&mut recognizer, at);
        recognizer.advance(Duration::from_millis(120));
        recognizer.handle(PointerEvent::Down(at));
        assert_eq!(
            recognizer.advance(Duration::from_millis(330)),
            vec![Gesture::SingleTap(at)]
        );

        let gestures = recognizer.handle(PointerEvent::Up(at));
        assert!(!gestures.contains(&Gesture::DoubleTap(at)));
        assert_eq!(
            recognizer.advance(Duration::from_millis(300)),
            vec![Gesture::SingleTap(at)]
        );
    }

    #[test]
    fn pinch_end_is_routed_even_when_not_interactive() {
        let mut coordinator = Coordinator::default();
        let context = RouteContext::default();
        assert_eq!(
            coordinator.route(Gesture::PinchEnded, &context),
            Route::PinchEnded
        );
    }

    #[test]
    fn pan_goes_to_physics_when_fitted() {
        let mut coordinator = Coordinator::default();
        let route = coordinator.route(Gesture::PanBegan(Point::new(1.0, 2.0)), &interactive());
        assert_eq!(route, Route::DragBegan(Point::new(1.0, 2.0)));
        assert!(coordinator.is_dragging());

        let velocity = Vector::new(0.0, 900.0);
        let route = coordinator.route(
            Gesture::PanEnded {
                translation: Vector::new(0.0, 50.0),
                velocity,
            },
            &interactive(),
        );
        assert_eq!(route, Route::DragEnded(velocity));
        assert!(!coordinator.is_dragging());
    }

    #[test]
    fn pan_scrolls_when_magnified() {
        let mut coordinator = Coordinator::default();
        let context = RouteContext {
            zoom_fitted: false,
            ..interactive()
        };
        assert_eq!(
            coordinator.route(Gesture::PanBegan(Point::new(0.0, 0.0)), &context),
            Route::Ignore
        );
        assert_eq!(
            coordinator.route(
                Gesture::PanChanged {
                    translation: Vector::new(10.0, 0.0)
                },
                &context
            ),
            Route::Scroll(Vector::new(10.0, 0.0))
        );
        assert_eq!(
            coordinator.route(
                Gesture::PanChanged {
                    translation: Vector::new(15.0, 5.0)
                },
                &context
            ),
            Route::Scroll(Vector::new(5.0, 5.0))
        );
    }

    #[test]
    fn zoom_settle_blocks_zoom_drag_and_dismiss() {
        let mut coordinator = Coordinator::default();
        let context = RouteContext {
            zoom_animating: true,
            ..interactive()
        };
        let at = Point::new(0.0, 0.0);
        assert_eq!(coordinator.route(Gesture::SingleTap(at), &context), Route::Ignore);
        assert_eq!(coordinator.route(Gesture::DoubleTap(at), &context), Route::Ignore);
        assert_eq!(coordinator.route(Gesture::PanBegan(at), &context), Route::Ignore);
    }

    #[test]
    fn ignore_window_drops_new_gestures() {
        let mut coordinator = Coordinator::default();
        let context = RouteContext {
            ignore_touches: true,
            ..interactive()
        };
        let at = Point::new(0.0, 0.0);
        assert_eq!(coordinator.route(Gesture::SingleTap(at), &context), Route::Ignore);
        assert_eq!(coordinator.route(Gesture::LongPress(at), &context), Route::Ignore);
    }

    #[test]
    fn owned_pan_finishes_even_when_touches_are_ignored() {
        let mut coordinator = Coordinator::default();
        coordinator.route(Gesture::PanBegan(Point::new(0.0, 0.0)), &interactive());
        let context = RouteContext {
            ignore_touches: true,
            ..interactive()
        };
        assert_eq!(
            coordinator.route(Gesture::PanCancelled, &context),
            Route::DragCancelled
        );
    }

    #[test]
    fn single_tap_dismisses_when_interactive() {
        let mut coordinator = Coordinator::default();
        let at = Point::new(5.0, 5.0);
        assert_eq!(coordinator.route(Gesture::SingleTap(at), &interactive()), Route::Dismiss);
        assert_eq!(
            coordinator.route(Gesture::SingleTap(at), &RouteContext::default()),
            Route::Ignore
        );
    }
}
