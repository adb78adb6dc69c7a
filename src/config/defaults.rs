// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Zoom scale bounds and double-tap behavior
//! - **Transition**: Presentation/dismissal animation timing and scaling
//! - **Physics**: Drag attachment, flick and snap-back tuning
//! - **Gestures**: Tap, long-press and pan recognition thresholds
//! - **Appearance**: Default dimming and blur for the host options delegate
//! - **Diagnostics**: Transition trace sizing

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Minimum zoom scale (content fitted to the container).
pub const MIN_ZOOM_SCALE: f32 = 1.0;

/// Maximum zoom scale.
pub const MAX_ZOOM_SCALE: f32 = 8.0;

/// Zoom scale reached by a double tap from the fitted state.
pub const DOUBLE_TAP_TARGET_ZOOM: f32 = 3.0;

/// Delay after a zoom animation during which gestures are ignored (ms).
pub const ZOOM_SETTLE_DELAY_MS: u64 = 350;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Duration of each animated show/dismiss phase (ms).
pub const TRANSITION_DURATION_MS: u64 = 300;

/// Scale applied to the background snapshot while the viewer is presented.
pub const MIN_BACKGROUND_SCALE: f32 = 0.94;

/// Scale content starts from (show) or grows to (dismiss) when it has no
/// thumbnail to anchor to.
pub const OFFSCREEN_EXPANSION_SCALE: f32 = 1.25;

/// Delay after an orientation change during which gestures are ignored (ms).
pub const ROTATION_SETTLE_DELAY_MS: u64 = 400;

// ==========================================================================
// Physics Defaults
// ==========================================================================

/// Release speed (px/s) at or above which a drag turns into a flick.
pub const FLICK_VELOCITY_THRESHOLD: f32 = 800.0;

/// Multiplier converting release velocity into the flick impulse.
pub const FLICK_IMPULSE_SCALE: f32 = 0.12;

/// Angular resistance for content the size of the reference area.
pub const BASE_ANGULAR_RESISTANCE: f32 = 4.0;

/// Density for content the size of the reference area.
pub const BASE_DENSITY: f32 = 0.5;

/// Width of the reference screen the physics constants were tuned on.
pub const REFERENCE_WIDTH: f32 = 320.0;

/// Height of the reference screen the physics constants were tuned on.
pub const REFERENCE_HEIGHT: f32 = 480.0;

/// Duration of the snap-back spring (ms).
pub const SNAP_BACK_DURATION_MS: u64 = 500;

/// Damping ratio of the snap-back spring.
pub const SNAP_BACK_DAMPING: f32 = 0.7;

/// Fixed simulation step used while a flick is in flight (s).
pub const PHYSICS_STEP_SECS: f32 = 1.0 / 60.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Maximum delay between two taps of a double tap (ms).
pub const DOUBLE_TAP_INTERVAL_MS: u64 = 300;

/// Hold time before a press becomes a long press (ms).
pub const LONG_PRESS_DELAY_MS: u64 = 500;

/// Distance a pointer may travel before a press becomes a pan (px).
pub const TOUCH_SLOP: f32 = 8.0;

// ==========================================================================
// Appearance Defaults
// ==========================================================================

/// Default alpha of the dimming overlay above the background snapshot.
pub const DEFAULT_DIMMING_ALPHA: f32 = 0.66;

/// Default blur radius for the blurred background variant.
pub const DEFAULT_BLUR_RADIUS: f32 = 2.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of transition events kept in the trace.
pub const DEFAULT_TRACE_CAPACITY: usize = 256;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_ZOOM_SCALE >= 1.0);
    assert!(MAX_ZOOM_SCALE > MIN_ZOOM_SCALE);
    assert!(DOUBLE_TAP_TARGET_ZOOM > MIN_ZOOM_SCALE);
    assert!(DOUBLE_TAP_TARGET_ZOOM <= MAX_ZOOM_SCALE);

    assert!(MIN_BACKGROUND_SCALE > 0.0);
    assert!(MIN_BACKGROUND_SCALE <= 1.0);
    assert!(OFFSCREEN_EXPANSION_SCALE >= 1.0);

    assert!(FLICK_VELOCITY_THRESHOLD > 0.0);
    assert!(FLICK_IMPULSE_SCALE > 0.0);
    assert!(REFERENCE_WIDTH > 0.0);
    assert!(REFERENCE_HEIGHT > 0.0);
    assert!(SNAP_BACK_DAMPING > 0.0);
    assert!(SNAP_BACK_DAMPING < 1.0);
    assert!(PHYSICS_STEP_SECS > 0.0);

    assert!(TOUCH_SLOP > 0.0);
    assert!(DEFAULT_DIMMING_ALPHA >= 0.0);
    assert!(DEFAULT_DIMMING_ALPHA <= 1.0);
    assert!(DEFAULT_TRACE_CAPACITY > 0);
};
