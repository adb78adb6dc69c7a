// SPDX-License-Identifier: MPL-2.0
//! Transition controller - the viewer's top-level state machine.
//!
//! The controller owns one [`ViewerSession`] at a time and moves it through
//! `Idle → Presenting → Interactive → Dismissing → Idle`. Animations are
//! explicit [`Phase`]s advanced by [`Message::Tick`]; pointer input goes
//! through the gesture recognizer and coordinator into zoom or physics.
//!
//! Everything runs on the UI loop. Content acquisition happens elsewhere
//! (see [`crate::acquisition`]) and comes back as [`Message::Acquisition`].

use super::phase::{Phase, PhaseQueue, PhaseStep, Presentation};
use super::session::{
    ContentMetrics, RotationTransform, ShowRequest, StartingGeometry, ViewerSession,
};
use crate::acquisition::{AcquisitionEvent, AcquisitionRequest, SessionId};
use crate::config::ViewerConfig;
use crate::diagnostics::{TransitionEvent, TransitionTrace};
use crate::domain::{
    AbortReason, DismissPath, Orientation, PhaseKind, TransitionOrigin, TransitionState,
    ViewerMode, ZoomScale,
};
use crate::port::{is_cancelled, CancellationToken, Delegates, Host};
use crate::ui::gesture::{Coordinator, Gesture, PointerEvent, Recognizer, Route, RouteContext};
use crate::ui::physics::{PhysicsDismissal, ReleaseOutcome, StepOutcome};
use crate::ui::state::timer::Deferred;
use crate::ui::state::ZoomController;
use iced_core::{Padding, Point, Rectangle, Vector};
use std::sync::atomic::Ordering;
use std::time::Duration;

const DEFAULT_ACCESSIBILITY_LABEL: &str = "Image";
const DEFAULT_HINT_ZOOMED_OUT: &str = "Double-tap to zoom in. Tap to close.";
const DEFAULT_HINT_ZOOMED_IN: &str = "Double-tap to zoom out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    ZoomSettle,
    RotationSettle,
}

/// Result of [`TransitionController::show`].
#[derive(Debug, Clone)]
pub enum ShowOutcome {
    /// The presentation started. When the content still has to be fetched,
    /// `acquisition` carries the request to hand to
    /// [`acquisition::spawn`](crate::acquisition::spawn).
    Presenting {
        session: SessionId,
        acquisition: Option<AcquisitionRequest>,
    },
    /// Nothing was presented and no state changed.
    Aborted(AbortReason),
}

impl ShowOutcome {
    #[must_use]
    pub fn is_presenting(&self) -> bool {
        matches!(self, ShowOutcome::Presenting { .. })
    }
}

/// Input to the controller.
#[derive(Debug, Clone)]
pub enum Message {
    Pointer(PointerEvent),
    /// Time elapsed on the UI loop since the previous tick.
    Tick(Duration),
    OrientationChanged(Orientation),
    Acquisition(AcquisitionEvent),
    Dismiss { animated: bool },
}

/// Effects produced by controller operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Show the copy menu anchored at the long-press location.
    ShowCopyMenu { anchor: Point },
    /// Content became interactive.
    Presented,
    /// The session ended and the host was notified.
    Dismissed,
}

/// Snapshot of the session flags, derived from the primary state plus the
/// orthogonal zoom, physics and session sub-flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ViewerFlags {
    pub animating_presentation_or_dismissal: bool,
    pub dismissing: bool,
    pub transitioning_to_interactive: bool,
    pub view_has_appeared: bool,
    pub presented: bool,
    pub flicking_away: bool,
    pub dragging_content: bool,
    pub zoom_animating: bool,
    pub manually_resizing_container: bool,
    pub download_failed: bool,
}

fn speed(velocity: Vector) -> f32 {
    (velocity.x * velocity.x + velocity.y * velocity.y).sqrt()
}

/// Orchestrates presentation, interaction and dismissal of the viewer.
pub struct TransitionController<H: Host> {
    host: H,
    delegates: Delegates,
    config: ViewerConfig,

    state: TransitionState,
    session: Option<ViewerSession>,
    next_session: SessionId,

    phases: PhaseQueue,
    running_phases: bool,
    dismiss_animated: bool,
    presentation: Presentation,

    zoom: ZoomController,
    physics: PhysicsDismissal,
    recognizer: Recognizer,
    coordinator: Coordinator,
    timers: Deferred<Timer>,

    orientation: Orientation,
    rotation: RotationTransform,
    rotation_dirty: bool,

    clock: Duration,
    trace: TransitionTrace,
    pending_effect: Effect,
}

impl<H: Host> TransitionController<H> {
    #[must_use]
    pub fn new(host: H, delegates: Delegates, config: ViewerConfig) -> Self {
        let config = config.sanitized();
        let orientation = host.current_orientation();
        Self {
            zoom: ZoomController::new(config.zoom.clone()),
            physics: PhysicsDismissal::new(config.physics.clone()),
            recognizer: Recognizer::new(config.gestures.clone()),
            host,
            delegates,
            config,
            state: TransitionState::Idle,
            session: None,
            next_session: 1,
            phases: PhaseQueue::default(),
            running_phases: false,
            dismiss_animated: true,
            presentation: Presentation::default(),
            coordinator: Coordinator::default(),
            timers: Deferred::default(),
            orientation,
            rotation: RotationTransform::default(),
            rotation_dirty: false,
            clock: Duration::ZERO,
            trace: TransitionTrace::default(),
            pending_effect: Effect::None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Returns true between show completion and the start of a dismissal.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.state == TransitionState::Interactive
    }

    #[must_use]
    pub fn session(&self) -> Option<&ViewerSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    #[must_use]
    pub fn physics(&self) -> &PhysicsDismissal {
        &self.physics
    }

    #[must_use]
    pub fn trace(&self) -> &TransitionTrace {
        &self.trace
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn flags(&self) -> ViewerFlags {
        let session = self.session.as_ref().map(|s| s.flags).unwrap_or_default();
        ViewerFlags {
            animating_presentation_or_dismissal: matches!(
                self.state,
                TransitionState::Presenting | TransitionState::Dismissing
            ),
            dismissing: self.state == TransitionState::Dismissing,
            transitioning_to_interactive: session.transitioning_to_interactive,
            view_has_appeared: session.view_has_appeared,
            presented: self.is_presented(),
            flicking_away: self.physics.is_flicking(),
            dragging_content: self.physics.is_dragging_content(),
            zoom_animating: self.zoom.is_animating(),
            manually_resizing_container: session.manually_resizing_container,
            download_failed: session.download_failed,
        }
    }

    /// Spoken label for the presented content.
    #[must_use]
    pub fn accessibility_label(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        self.delegates
            .accessibility
            .accessibility_label(&session.info)
            .or_else(|| {
                session
                    .info
                    .displayable_title_alt_text_summary()
                    .map(str::to_owned)
            })
            .or_else(|| Some(DEFAULT_ACCESSIBILITY_LABEL.to_owned()))
    }

    /// Spoken hint for the current zoom state.
    #[must_use]
    pub fn accessibility_hint(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let accessibility = &self.delegates.accessibility;
        let hint = if self.zoom.is_fitted() {
            accessibility
                .accessibility_hint_zoomed_out(&session.info)
                .unwrap_or_else(|| DEFAULT_HINT_ZOOMED_OUT.to_owned())
        } else {
            accessibility
                .accessibility_hint_zoomed_in(&session.info)
                .unwrap_or_else(|| DEFAULT_HINT_ZOOMED_IN.to_owned())
        };
        Some(hint)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SHOW / DISMISS
    // ═══════════════════════════════════════════════════════════════════════

    /// Starts presenting `request`.
    ///
    /// Aborts without changing state when a session is already active, when
    /// the thumbnail's view is gone, or when the host refuses the overlay.
    pub fn show(&mut self, request: ShowRequest) -> ShowOutcome {
        self.record(TransitionEvent::ShowRequested);
        if self.state != TransitionState::Idle {
            return self.abort(AbortReason::AlreadyActive);
        }

        let ShowRequest {
            info,
            mode,
            background,
            origin,
        } = request;

        let thumbnail = match info.reference_view {
            Some(view) => match self.host.locate_reference(view, info.reference_rect) {
                Some(frame) => frame,
                None => return self.abort(AbortReason::SourceViewGone),
            },
            None => info.reference_rect,
        };

        let starting = StartingGeometry::capture(&self.host, thumbnail);

        let snapshot = self.host.capture_snapshot();
        if snapshot.is_none() {
            tracing::debug!("background snapshot unavailable, presenting without it");
        }
        let blurred_snapshot = if background.is_blurred() {
            let radius = self.delegates.options.background_blur_radius();
            self.host.capture_blurred_snapshot(radius)
        } else {
            None
        };

        if !self.host.present_overlay(true) {
            return self.abort(AbortReason::PresentationRefused);
        }

        let id = self.next_session;
        self.next_session += 1;

        let cancel = CancellationToken::default();
        let acquisition = (mode == ViewerMode::Image
            && !info.has_image()
            && info.image_url.is_some())
        .then(|| AcquisitionRequest {
            session: id,
            info: info.clone(),
            cancel: cancel.clone(),
        });

        let fade_thumbnail = self
            .delegates
            .options
            .should_fade_thumbnail_during_transition(&info);

        self.session = Some(ViewerSession {
            id,
            metrics: ContentMetrics::new(info.natural_size()),
            info,
            mode,
            background_style: background,
            origin,
            starting,
            flags: Default::default(),
            cancel,
            background: snapshot,
            blurred_background: blurred_snapshot,
            download_progress: 0.0,
            fade_thumbnail,
        });

        self.orientation = starting.orientation;
        self.rotation.invalidate();
        self.rotation_dirty = false;
        self.reset_interaction();
        self.zoom.reset();
        self.state = TransitionState::Presenting;
        tracing::info!(session = id, ?mode, ?origin, "presenting viewer");

        self.phases.clear();
        self.phases
            .push(Phase::new(PhaseKind::Prepare, Duration::ZERO));
        self.phases
            .push(Phase::new(PhaseKind::Present, self.config.transition.duration()));
        self.run_phases(Duration::ZERO);

        ShowOutcome::Presenting {
            session: id,
            acquisition,
        }
    }

    /// Starts dismissing the presented viewer.
    ///
    /// Returns `false` (and does nothing) unless the viewer is presented, so
    /// repeated calls dismiss at most once.
    pub fn dismiss(&mut self, animated: bool) -> bool {
        if self.state != TransitionState::Interactive {
            tracing::debug!(state = ?self.state, "dismiss ignored, viewer not presented");
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            debug_assert!(false, "interactive state without a session");
            return false;
        };

        self.state = TransitionState::Dismissing;
        session.cancel.store(true, Ordering::Relaxed);

        let path = match session.mode {
            ViewerMode::AltText => DismissPath::AltTextCollapse,
            ViewerMode::Image if self.physics.is_flicking() => DismissPath::FlickCleanup,
            ViewerMode::Image if session.origin == TransitionOrigin::FromOffscreen => {
                DismissPath::ExpandOffscreen
            }
            ViewerMode::Image
                if session.starting.has_usable_thumbnail() && session.is_content_loaded() =>
            {
                DismissPath::CollapseToThumbnail
            }
            ViewerMode::Image => DismissPath::ExpandOffscreen,
        };

        tracing::info!(session = session.id, ?path, animated, "dismissing viewer");
        self.record(TransitionEvent::DismissRequested { path });

        self.recognizer.reset();
        self.coordinator.reset();
        self.timers.clear();
        if path != DismissPath::FlickCleanup {
            self.physics.reset();
        }

        let duration = if animated {
            self.config.transition.duration()
        } else {
            Duration::ZERO
        };
        self.dismiss_animated = animated;
        self.phases.clear();
        self.phases
            .push(Phase::new(PhaseKind::Dismiss(path), duration));
        if !self.running_phases {
            self.run_phases(Duration::ZERO);
        }
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MESSAGE HANDLING
    // ═══════════════════════════════════════════════════════════════════════

    /// Handles one message and returns the effect it produced.
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Pointer(event) => {
                for gesture in self.recognizer.handle(event) {
                    self.apply_gesture(gesture);
                }
                self.layout();
            }
            Message::Tick(elapsed) => self.tick(elapsed),
            Message::OrientationChanged(orientation) => self.orientation_changed(orientation),
            Message::Acquisition(event) => self.acquisition(event),
            Message::Dismiss { animated } => {
                self.dismiss(animated);
            }
        }
        std::mem::replace(&mut self.pending_effect, Effect::None)
    }

    fn tick(&mut self, elapsed: Duration) {
        self.clock += elapsed;

        for gesture in self.recognizer.advance(elapsed) {
            self.apply_gesture(gesture);
        }

        for timer in self.timers.advance(elapsed) {
            match timer {
                Timer::ZoomSettle => self.zoom.finish_animation(),
                Timer::RotationSettle => {
                    if let Some(session) = self.session.as_mut() {
                        session.flags.manually_resizing_container = false;
                    }
                }
            }
        }

        let viewport = self.host.container_bounds();
        match self.physics.step(elapsed, viewport) {
            StepOutcome::Offscreen => {
                self.layout();
                self.dismiss(true);
            }
            StepOutcome::SnapBackFinished => tracing::debug!("snap-back settled"),
            StepOutcome::Moving | StepOutcome::Idle => {}
        }

        self.run_phases(elapsed);
        self.layout();
    }

    fn orientation_changed(&mut self, orientation: Orientation) {
        if orientation == self.orientation {
            return;
        }
        let from = self.orientation;
        self.orientation = orientation;
        self.record(TransitionEvent::OrientationChanged {
            from,
            to: orientation,
        });

        let Some(session) = self.session.as_mut() else {
            return;
        };
        tracing::debug!(?from, to = ?orientation, "orientation changed while presented");
        session.flags.manually_resizing_container = true;
        self.rotation_dirty = true;
        self.timers
            .schedule(Timer::RotationSettle, self.config.transition.rotation_settle());
    }

    fn acquisition(&mut self, event: AcquisitionEvent) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("acquisition event without a session");
            return;
        };
        if event.session() != session.id || is_cancelled(&session.cancel) {
            tracing::debug!(session = event.session(), "stale acquisition event dropped");
            return;
        }

        match event {
            AcquisitionEvent::Progress { fraction, .. } => {
                session.download_progress = fraction;
            }
            AcquisitionEvent::Loaded { size, .. } => {
                session.info.image_size = Some(size);
                session.metrics.natural_size = size;
                session.download_progress = 1.0;
                self.retarget_phase();
                self.layout();
            }
            AcquisitionEvent::Failed { error, .. } => {
                session.flags.download_failed = true;
                tracing::warn!(session = session.id, %error, "content acquisition failed");
                self.record(TransitionEvent::AcquisitionFailed {
                    message: error.to_string(),
                });
                // While presenting, the failure surfaces on completion.
                if self.state == TransitionState::Interactive {
                    self.dismiss(true);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GESTURES
    // ═══════════════════════════════════════════════════════════════════════

    fn route_context(&self) -> RouteContext {
        let resizing = self
            .session
            .as_ref()
            .is_some_and(|s| s.flags.manually_resizing_container);
        RouteContext {
            interactive: self.is_presented(),
            zoom_fitted: self.zoom.is_fitted(),
            zoom_animating: self.zoom.is_animating(),
            flicking: self.physics.is_flicking(),
            ignore_touches: resizing
                || self
                    .delegates
                    .interactions
                    .should_ignore_touches_temporarily(),
        }
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        let context = self.route_context();
        let route = self.coordinator.route(gesture, &context);
        let container = self.host.container_bounds();
        let natural = self
            .session
            .as_ref()
            .map_or(container.size(), |s| s.metrics.natural_size);

        match route {
            Route::Ignore => {}
            Route::Dismiss => {
                self.dismiss(true);
            }
            Route::ToggleZoom(position) => {
                if let Some(target) = self.zoom.double_tap(position, container, natural) {
                    tracing::debug!(scale = target.scale.value(), "zoom toggled");
                    self.timers
                        .schedule(Timer::ZoomSettle, self.zoom.config().settle_delay());
                }
            }
            Route::Pinch { scale, .. } => {
                self.zoom.pinch(scale, container, natural);
            }
            Route::PinchEnded => self.zoom.end_pinch(),
            Route::LongPress(anchor) => {
                if let Some(session) = self.session.as_ref() {
                    self.delegates.interactions.on_long_press(&session.info);
                    if self.delegates.interactions.allow_copy_to_clipboard() {
                        self.emit(Effect::ShowCopyMenu { anchor });
                    }
                }
            }
            Route::DragBegan(position) => {
                let frame = self.presentation.content_frame;
                self.physics.begin(position, frame, container.size());
            }
            Route::DragMoved(translation) => {
                self.physics.update(translation);
            }
            Route::DragEnded(velocity) => {
                let speed = speed(velocity);
                match self.physics.release(velocity, container) {
                    ReleaseOutcome::Flick => {
                        tracing::info!(speed, "content flicked away");
                        self.record(TransitionEvent::FlickStarted { speed });
                    }
                    ReleaseOutcome::SnapBack => {
                        self.record(TransitionEvent::SnapBack);
                    }
                    ReleaseOutcome::Dismiss => {
                        self.record(TransitionEvent::DismissedByVelocity { speed });
                        self.dismiss(true);
                    }
                    ReleaseOutcome::Ignored => {}
                }
            }
            Route::DragCancelled => self.physics.cancel(container),
            Route::Scroll(delta) => {
                self.zoom.scroll_by(delta, container, natural);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PHASES
    // ═══════════════════════════════════════════════════════════════════════

    fn run_phases(&mut self, mut budget: Duration) {
        self.running_phases = true;
        loop {
            let (step, left) = self.phases.step(budget);
            budget = left;
            match step {
                PhaseStep::Begin(kind) => self.begin_phase(kind),
                PhaseStep::Completed(kind) => {
                    if let Some(phase) = self.phases.last_completed() {
                        self.presentation = phase.to;
                    }
                    self.complete_phase(kind);
                }
                PhaseStep::Animating => {
                    if let Some(phase) = self.phases.current() {
                        self.presentation = phase.current();
                    }
                    break;
                }
                PhaseStep::Empty => break,
            }
        }
        self.running_phases = false;
    }

    fn begin_phase(&mut self, kind: PhaseKind) {
        self.record(TransitionEvent::PhaseBegan { phase: kind });
        let (from, to) = match kind {
            PhaseKind::Prepare => {
                let start = self.initial_presentation();
                (start, start)
            }
            PhaseKind::Present => {
                if let Some(session) = self.session.as_mut() {
                    session.flags.transitioning_to_interactive = true;
                    let style = session.starting.overlay_bar_style;
                    self.host.set_overlay_bar(false, style);
                }
                (self.presentation, self.interactive_presentation())
            }
            PhaseKind::Dismiss(path) => {
                let from = self.presentation;
                (from, self.dismissal_presentation(path, from))
            }
        };
        self.phases.begin(from, to);
        self.presentation = from;
    }

    fn complete_phase(&mut self, kind: PhaseKind) {
        self.record(TransitionEvent::PhaseCompleted { phase: kind });
        match kind {
            PhaseKind::Prepare => {}
            PhaseKind::Present => {
                let download_failed = match self.session.as_mut() {
                    Some(session) => {
                        session.flags.transitioning_to_interactive = false;
                        session.flags.view_has_appeared = true;
                        session.flags.download_failed
                    }
                    None => false,
                };
                self.state = TransitionState::Interactive;
                self.record(TransitionEvent::Presented);
                self.emit(Effect::Presented);
                tracing::info!("viewer presented");

                if download_failed {
                    tracing::info!("content unavailable, dismissing after presentation");
                    self.dismiss(true);
                }
            }
            PhaseKind::Dismiss(_) => self.finish_dismissal(),
        }
    }

    fn finish_dismissal(&mut self) {
        let Some(session) = self.session.take() else {
            debug_assert!(false, "dismissal completed without a session");
            return;
        };

        self.host.set_overlay_bar(
            session.starting.overlay_bar_visible,
            session.starting.overlay_bar_style,
        );
        self.host.dismiss_overlay(self.dismiss_animated);

        self.state = TransitionState::Idle;
        self.reset_interaction();
        self.zoom.reset();
        self.rotation_dirty = false;

        self.delegates.dismissal.on_dismissed(&session.info);
        self.record(TransitionEvent::Dismissed);
        self.emit(Effect::Dismissed);
        tracing::info!(session = session.id, "viewer dismissed");
    }

    /// Re-derives the endpoints of the running phase after the layout inputs
    /// (orientation, container, natural size) changed.
    fn retarget_phase(&mut self) {
        let Some(kind) = self
            .phases
            .current()
            .filter(|phase| phase.has_begun())
            .map(|phase| phase.kind)
        else {
            return;
        };

        let (from, to) = match kind {
            PhaseKind::Prepare | PhaseKind::Dismiss(DismissPath::FlickCleanup) => return,
            PhaseKind::Present => (self.initial_presentation(), self.interactive_presentation()),
            PhaseKind::Dismiss(path) => {
                let resting = self.interactive_presentation();
                (resting, self.dismissal_presentation(path, resting))
            }
        };

        if let Some(phase) = self.phases.current_mut() {
            phase.from = from;
            phase.to = to;
            self.presentation = phase.current();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LAYOUT
    // ═══════════════════════════════════════════════════════════════════════

    fn layout(&mut self) {
        if self.rotation_dirty {
            self.rotation_dirty = false;
            self.rotation.invalidate();
            self.retarget_phase();
        }
        let resting = self.state == TransitionState::Interactive && self.phases.is_empty();
        if resting {
            self.presentation = self.interactive_presentation();
        }
        // A flicked body keeps moving while the flick cleanup fades it out.
        if resting || self.state == TransitionState::Dismissing {
            if let Some((frame, angle)) = self.physics.content_pose() {
                self.presentation.content_frame = frame;
                self.presentation.content_rotation = angle;
            }
        }
    }

    fn rotation_radians(&mut self, start: Orientation) -> f32 {
        RotationTransform::radians(self.rotation.resolve(start, self.orientation))
    }

    /// Phase A layout: content sits on the thumbnail, or waits offscreen.
    fn initial_presentation(&mut self) -> Presentation {
        let Some(session) = self.session.as_ref() else {
            debug_assert!(false, "initial layout without starting geometry");
            return Presentation::default();
        };
        let starting = session.starting;
        let offscreen = session.mode == ViewerMode::AltText
            || session.origin == TransitionOrigin::FromOffscreen;
        let natural = session.metrics.natural_size;

        let container = self.host.container_bounds();
        let base = Presentation {
            content_frame: self.zoom.content_frame(container, natural),
            content_alpha: 1.0,
            overlay_bar_hidden: !starting.overlay_bar_visible,
            insets: Padding::ZERO,
            zoom: ZoomScale::FIT,
            ..Presentation::default()
        };

        if offscreen {
            Presentation {
                content_alpha: 0.0,
                content_scale: self.config.transition.offscreen_scale,
                ..base
            }
        } else if starting.has_usable_thumbnail() {
            Presentation {
                content_frame: starting.thumbnail_in(self.orientation),
                content_rotation: self.rotation_radians(starting.orientation),
                ..base
            }
        } else {
            Presentation {
                content_frame: container,
                ..base
            }
        }
    }

    /// Fitted, interactive layout for the current container and zoom.
    fn interactive_presentation(&mut self) -> Presentation {
        let container = self.host.container_bounds();
        let dimming_alpha = self.delegates.options.dimming_overlay_alpha();
        let background_scale = self.config.transition.background_scale;
        let Some(session) = self.session.as_mut() else {
            return self.presentation;
        };

        session.metrics.update(container, &self.zoom);
        Presentation {
            content_frame: session.metrics.frame,
            content_rotation: 0.0,
            content_alpha: 1.0,
            content_scale: 1.0,
            background_scale,
            dimming_alpha,
            blur_alpha: if session.background_style.is_blurred() {
                1.0
            } else {
                0.0
            },
            thumbnail_alpha: if session.fade_thumbnail { 0.0 } else { 1.0 },
            overlay_bar_hidden: true,
            insets: session.metrics.insets,
            zoom: session.metrics.zoom_scale,
        }
    }

    /// Final layout of a dismissal path, starting from `base`.
    fn dismissal_presentation(&mut self, path: DismissPath, base: Presentation) -> Presentation {
        let Some(session) = self.session.as_ref() else {
            return base;
        };
        let starting = session.starting;
        let resting = Presentation {
            background_scale: 1.0,
            dimming_alpha: 0.0,
            blur_alpha: 0.0,
            thumbnail_alpha: 1.0,
            overlay_bar_hidden: !starting.overlay_bar_visible,
            ..base
        };

        match path {
            DismissPath::CollapseToThumbnail => Presentation {
                content_frame: starting.thumbnail_in(self.orientation),
                content_rotation: self.rotation_radians(starting.orientation),
                content_alpha: 1.0,
                content_scale: 1.0,
                insets: Padding::ZERO,
                zoom: ZoomScale::FIT,
                ..resting
            },
            DismissPath::ExpandOffscreen => Presentation {
                content_alpha: 0.0,
                content_scale: self.config.transition.offscreen_scale,
                ..resting
            },
            DismissPath::AltTextCollapse | DismissPath::FlickCleanup => Presentation {
                content_alpha: 0.0,
                ..resting
            },
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    fn reset_interaction(&mut self) {
        self.physics.reset();
        self.recognizer.reset();
        self.coordinator.reset();
        self.timers.clear();
    }

    fn abort(&mut self, reason: AbortReason) -> ShowOutcome {
        tracing::info!(?reason, "presentation aborted");
        self.record(TransitionEvent::ShowAborted { reason });
        ShowOutcome::Aborted(reason)
    }

    fn record(&mut self, event: TransitionEvent) {
        self.trace.record(self.clock, event);
    }

    fn emit(&mut self, effect: Effect) {
        if self.pending_effect == Effect::None || effect == Effect::Dismissed {
            self.pending_effect = effect;
        }
    }

    /// Content frame currently on screen.
    #[must_use]
    pub fn content_frame(&self) -> Rectangle {
        self.presentation.content_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BLUR_RADIUS, FLICK_IMPULSE_SCALE};
    use crate::domain::{BackgroundStyle, OverlayBarStyle, ReferenceView, SurfaceHandle};
    use crate::image_info::ImageInfo;
    use crate::port::{DismissalDelegate, InteractionsDelegate, OptionsDelegate};
    use crate::test_utils::{assert_abs_diff_eq, rect};
    use iced_core::Size;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Default)]
    struct TestHost {
        orientation: Orientation,
        gone: bool,
        bar: Vec<(bool, OverlayBarStyle)>,
        dismissed_overlay: usize,
        blur_radius: Option<f32>,
    }

    impl Host for TestHost {
        fn present_overlay(&mut self, _animated: bool) -> bool {
            true
        }
        fn dismiss_overlay(&mut self, _animated: bool) {
            self.dismissed_overlay += 1;
        }
        fn capture_snapshot(&mut self) -> Option<SurfaceHandle> {
            Some(SurfaceHandle(1))
        }
        fn capture_blurred_snapshot(&mut self, radius: f32) -> Option<SurfaceHandle> {
            self.blur_radius = Some(radius);
            Some(SurfaceHandle(2))
        }
        fn current_orientation(&self) -> Orientation {
            self.orientation
        }
        fn overlay_bar_visible(&self) -> bool {
            true
        }
        fn overlay_bar_style(&self) -> OverlayBarStyle {
            OverlayBarStyle::Default
        }
        fn set_overlay_bar(&mut self, visible: bool, style: OverlayBarStyle) {
            self.bar.push((visible, style));
        }
        fn container_bounds(&self) -> Rectangle {
            if self.orientation.is_landscape() {
                rect(0.0, 0.0, 800.0, 400.0)
            } else {
                rect(0.0, 0.0, 400.0, 800.0)
            }
        }
        fn locate_reference(&self, _view: ReferenceView, rect: Rectangle) -> Option<Rectangle> {
            (!self.gone).then_some(rect)
        }
    }

    struct Counter(Rc<Cell<u32>>);

    impl DismissalDelegate for Counter {
        fn on_dismissed(&mut self, _info: &ImageInfo) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct FadeThumbnail;

    impl OptionsDelegate for FadeThumbnail {
        fn should_fade_thumbnail_during_transition(&self, _info: &ImageInfo) -> bool {
            true
        }
    }

    struct NoCopy(Rc<Cell<u32>>);

    impl InteractionsDelegate for NoCopy {
        fn on_long_press(&mut self, _info: &ImageInfo) {
            self.0.set(self.0.get() + 1);
        }
        fn allow_copy_to_clipboard(&self) -> bool {
            false
        }
    }

    fn info() -> ImageInfo {
        ImageInfo::with_image(
            Size::new(300.0, 300.0),
            rect(50.0, 50.0, 100.0, 100.0),
            ReferenceView(1),
        )
    }

    fn controller() -> (TransitionController<TestHost>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let delegates = Delegates::default().with_dismissal(Counter(Rc::clone(&count)));
        (
            TransitionController::new(TestHost::default(), delegates, ViewerConfig::default()),
            count,
        )
    }

    fn run(controller: &mut TransitionController<TestHost>, duration: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut elapsed = Duration::ZERO;
        while elapsed < duration {
            let effect = controller.handle(Message::Tick(FRAME));
            if effect != Effect::None {
                effects.push(effect);
            }
            elapsed += FRAME;
        }
        effects
    }

    fn presented() -> (TransitionController<TestHost>, Rc<Cell<u32>>) {
        let (mut controller, count) = controller();
        assert!(controller.show(ShowRequest::image(info())).is_presenting());
        run(&mut controller, Duration::from_millis(400));
        assert!(controller.is_presented());
        (controller, count)
    }

    #[test]
    fn show_starts_at_thumbnail_and_hides_bar() {
        let (mut controller, _) = controller();
        controller.show(ShowRequest::image(info()));

        assert_eq!(controller.state(), TransitionState::Presenting);
        assert_eq!(controller.content_frame(), rect(50.0, 50.0, 100.0, 100.0));
        assert!(controller.flags().transitioning_to_interactive);
        assert!(controller.flags().animating_presentation_or_dismissal);
        assert_eq!(
            controller.host().bar.last(),
            Some(&(false, OverlayBarStyle::Default))
        );
    }

    #[test]
    fn presentation_completes_with_fitted_frame() {
        let (controller, _) = presented();
        assert_eq!(controller.content_frame(), rect(50.0, 250.0, 300.0, 300.0));
        let presentation = controller.presentation();
        assert_abs_diff_eq!(presentation.background_scale, 0.94);
        assert_abs_diff_eq!(presentation.dimming_alpha, 0.66);
        assert!(presentation.overlay_bar_hidden);
        assert!(!controller.flags().transitioning_to_interactive);
        assert!(controller.flags().view_has_appeared);
    }

    #[test]
    fn show_aborts_when_source_view_is_gone() {
        let (mut controller, _) = controller();
        controller.host_mut().gone = true;

        let outcome = controller.show(ShowRequest::image(info()));
        assert!(matches!(
            outcome,
            ShowOutcome::Aborted(AbortReason::SourceViewGone)
        ));
        assert_eq!(controller.state(), TransitionState::Idle);
        assert!(controller.session().is_none());
    }

    #[test]
    fn second_show_is_rejected_while_active() {
        let (mut controller, _) = presented();
        assert!(matches!(
            controller.show(ShowRequest::image(info())),
            ShowOutcome::Aborted(AbortReason::AlreadyActive)
        ));
    }

    #[test]
    fn dismiss_is_ignored_until_presented() {
        let (mut controller, count) = controller();
        controller.show(ShowRequest::image(info()));
        assert!(!controller.dismiss(true));
        run(&mut controller, Duration::from_millis(400));
        assert!(controller.dismiss(true));
        assert!(!controller.dismiss(true));
        run(&mut controller, Duration::from_millis(400));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn collapse_restores_overlay_bar_and_notifies_once() {
        let (mut controller, count) = presented();
        assert!(controller.dismiss(true));
        assert!(!controller.is_presented());
        assert!(controller.flags().dismissing);

        let effects = run(&mut controller, Duration::from_millis(400));
        assert_eq!(effects, vec![Effect::Dismissed]);
        assert_eq!(controller.state(), TransitionState::Idle);
        assert_eq!(count.get(), 1);
        assert_eq!(controller.host().dismissed_overlay, 1);
        assert_eq!(
            controller.host().bar.last(),
            Some(&(true, OverlayBarStyle::Default))
        );
        assert_eq!(controller.content_frame(), rect(50.0, 50.0, 100.0, 100.0));
        assert!(controller.trace().events().any(|event| *event
            == TransitionEvent::DismissRequested {
                path: DismissPath::CollapseToThumbnail
            }));
    }

    #[test]
    fn unanimated_dismiss_finishes_immediately() {
        let (mut controller, count) = presented();
        let effect = controller.handle(Message::Dismiss { animated: false });
        assert_eq!(effect, Effect::Dismissed);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn offscreen_origin_expands_away() {
        let (mut controller, _) = controller();
        controller.show(ShowRequest::image(info()).with_origin(TransitionOrigin::FromOffscreen));
        assert_abs_diff_eq!(controller.presentation().content_scale, 1.25);
        assert_abs_diff_eq!(controller.presentation().content_alpha, 0.0);

        run(&mut controller, Duration::from_millis(400));
        controller.dismiss(true);
        assert!(controller.trace().events().any(|event| *event
            == TransitionEvent::DismissRequested {
                path: DismissPath::ExpandOffscreen
            }));
    }

    #[test]
    fn alt_text_uses_alt_text_collapse() {
        let (mut controller, count) = controller();
        controller.show(ShowRequest::alt_text(info()));
        run(&mut controller, Duration::from_millis(400));
        controller.dismiss(true);
        run(&mut controller, Duration::from_millis(400));
        assert_eq!(count.get(), 1);
        assert!(controller.trace().events().any(|event| *event
            == TransitionEvent::DismissRequested {
                path: DismissPath::AltTextCollapse
            }));
    }

    #[test]
    fn unloaded_content_falls_back_to_offscreen_dismissal() {
        let (mut controller, _) = controller();
        let info = ImageInfo::with_url(
            "https://example.org/a.jpg",
            rect(50.0, 50.0, 100.0, 100.0),
            ReferenceView(1),
        );
        let outcome = controller.show(ShowRequest::image(info));
        let ShowOutcome::Presenting {
            acquisition: Some(request),
            ..
        } = outcome
        else {
            panic!("expected an acquisition request");
        };
        assert_eq!(request.session, 1);

        run(&mut controller, Duration::from_millis(400));
        controller.dismiss(true);
        assert!(is_cancelled(&request.cancel));
        assert!(controller.trace().events().any(|event| *event
            == TransitionEvent::DismissRequested {
                path: DismissPath::ExpandOffscreen
            }));
    }

    #[test]
    fn single_tap_dismisses_after_double_tap_window() {
        let (mut controller, count) = presented();
        let at = Point::new(200.0, 400.0);
        controller.handle(Message::Pointer(PointerEvent::Down(at)));
        controller.handle(Message::Pointer(PointerEvent::Up(at)));
        assert!(controller.is_presented());

        run(&mut controller, Duration::from_millis(800));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn double_tap_zooms_and_blocks_gestures_while_settling() {
        let (mut controller, count) = presented();
        let at = Point::new(200.0, 400.0);
        for _ in 0..2 {
            controller.handle(Message::Pointer(PointerEvent::Down(at)));
            controller.handle(Message::Pointer(PointerEvent::Up(at)));
        }
        assert_eq!(controller.zoom().scale().value(), 3.0);
        assert!(controller.flags().zoom_animating);
        assert_eq!(
            controller.accessibility_hint().as_deref(),
            Some(DEFAULT_HINT_ZOOMED_IN)
        );

        run(&mut controller, Duration::from_millis(400));
        assert!(!controller.flags().zoom_animating);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn long_press_asks_for_copy_menu() {
        let (mut controller, _) = presented();
        let at = Point::new(200.0, 400.0);
        controller.handle(Message::Pointer(PointerEvent::Down(at)));

        let effects = run(&mut controller, Duration::from_millis(600));
        assert_eq!(effects, vec![Effect::ShowCopyMenu { anchor: at }]);
    }

    #[test]
    fn long_press_without_copy_only_notifies() {
        let presses = Rc::new(Cell::new(0));
        let delegates = Delegates::default().with_interactions(NoCopy(Rc::clone(&presses)));
        let mut controller =
            TransitionController::new(TestHost::default(), delegates, ViewerConfig::default());
        controller.show(ShowRequest::image(info()));
        run(&mut controller, Duration::from_millis(400));

        controller.handle(Message::Pointer(PointerEvent::Down(Point::new(200.0, 400.0))));
        let effects = run(&mut controller, Duration::from_millis(600));
        assert!(effects.is_empty());
        assert_eq!(presses.get(), 1);
    }

    #[test]
    fn rotation_while_presented_relayouts_and_settles() {
        let (mut controller, _) = presented();
        controller.host_mut().orientation = Orientation::LandscapeLeft;
        controller.handle(Message::OrientationChanged(Orientation::LandscapeLeft));
        assert!(controller.flags().manually_resizing_container);

        run(&mut controller, Duration::from_millis(500));
        assert!(!controller.flags().manually_resizing_container);
        assert_eq!(controller.content_frame(), rect(250.0, 50.0, 300.0, 300.0));

        controller.dismiss(true);
        run(&mut controller, Duration::from_millis(400));
        // Thumbnail (50,50,100,100) in a 400×800 portrait space, turned 90°.
        assert_eq!(controller.content_frame(), rect(650.0, 50.0, 100.0, 100.0));
        assert_abs_diff_eq!(
            controller.presentation().content_rotation,
            std::f32::consts::FRAC_PI_2
        );
    }

    #[test]
    fn accessibility_label_prefers_title() {
        let (mut controller, _) = controller();
        let mut info = info();
        info.title = Some("Sunset".into());
        info.alt_text = Some("a photo".into());
        controller.show(ShowRequest::image(info));
        assert_eq!(controller.accessibility_label().as_deref(), Some("Sunset"));
    }

    #[test]
    fn accessibility_label_falls_back_to_alt_text() {
        let (mut controller, _) = controller();
        let mut info = info();
        info.alt_text = Some("a photo".into());
        controller.show(ShowRequest::image(info));
        assert_eq!(controller.accessibility_label().as_deref(), Some("a photo"));
        assert_eq!(
            controller.accessibility_hint().as_deref(),
            Some(DEFAULT_HINT_ZOOMED_OUT)
        );
    }

    #[test]
    fn blurred_background_fades_in_and_out() {
        let (mut controller, _) = controller();
        controller.show(
            ShowRequest::image(info()).with_background(BackgroundStyle::ScaledDimmedBlurred),
        );
        assert_eq!(controller.host().blur_radius, Some(DEFAULT_BLUR_RADIUS));
        assert_abs_diff_eq!(controller.presentation().blur_alpha, 0.0);

        run(&mut controller, Duration::from_millis(400));
        assert!(controller.is_presented());
        assert_abs_diff_eq!(controller.presentation().blur_alpha, 1.0);

        controller.dismiss(true);
        run(&mut controller, Duration::from_millis(400));
        assert_abs_diff_eq!(controller.presentation().blur_alpha, 0.0);
    }

    #[test]
    fn plain_background_skips_blurred_snapshot() {
        let (mut controller, _) = presented();
        assert_eq!(controller.host().blur_radius, None);
        assert_abs_diff_eq!(controller.presentation().blur_alpha, 0.0);
        assert_abs_diff_eq!(controller.presentation().thumbnail_alpha, 1.0);
    }

    #[test]
    fn thumbnail_fades_out_when_requested_and_returns_on_dismissal() {
        let delegates = Delegates::default().with_options(FadeThumbnail);
        let mut controller =
            TransitionController::new(TestHost::default(), delegates, ViewerConfig::default());
        controller.show(ShowRequest::image(info()));
        assert_abs_diff_eq!(controller.presentation().thumbnail_alpha, 1.0);

        run(&mut controller, Duration::from_millis(400));
        assert_abs_diff_eq!(controller.presentation().thumbnail_alpha, 0.0);

        controller.dismiss(true);
        run(&mut controller, Duration::from_millis(400));
        assert_abs_diff_eq!(controller.presentation().thumbnail_alpha, 1.0);
    }

    #[test]
    fn successive_pinches_compound_zoom() {
        let (mut controller, _) = presented();
        let center = Point::new(200.0, 400.0);
        controller.handle(Message::Pointer(PointerEvent::Pinch { scale: 1.5, center }));
        controller.handle(Message::Pointer(PointerEvent::Pinch { scale: 2.0, center }));
        assert_abs_diff_eq!(controller.zoom().scale().value(), 2.0);
        controller.handle(Message::Pointer(PointerEvent::Up(center)));

        controller.handle(Message::Pointer(PointerEvent::Pinch { scale: 1.5, center }));
        assert_abs_diff_eq!(controller.zoom().scale().value(), 3.0);
        controller.handle(Message::Pointer(PointerEvent::Up(center)));

        controller.handle(Message::Pointer(PointerEvent::Pinch { scale: 0.9, center }));
        assert_abs_diff_eq!(controller.zoom().scale().value(), 2.7, epsilon = 1e-4);
        assert!(!controller.zoom().is_fitted());
    }

    #[test]
    fn out_of_range_physics_config_is_replaced() {
        let mut config = ViewerConfig::default();
        config.physics.flick_impulse_scale = 0.0;
        let controller =
            TransitionController::new(TestHost::default(), Delegates::default(), config);
        assert_eq!(
            controller.config().physics.flick_impulse_scale,
            FLICK_IMPULSE_SCALE
        );
    }
}
