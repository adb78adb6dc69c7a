// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's tunable configuration, including loading
//! and saving it to a `lightbox.toml` file.
//!
//! # Configuration Sections
//!
//! - `[zoom]` - Zoom bounds, double-tap target and settle delay
//! - `[transition]` - Animation timing and background/offscreen scaling
//! - `[physics]` - Flick threshold, impulse and drag stiffness tuning
//! - `[gestures]` - Tap, long-press and pan recognition thresholds
//!
//! Every field has a default, so partial files are valid. A file that fails
//! to parse falls back to the defaults, and a field outside its valid range
//! is replaced by its default (see [`ViewerConfig::sanitized`]).
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_LIGHTBOX_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_lightbox::config::{self, ViewerConfig};
//!
//! let (mut config, _warning) = config::load();
//! config.physics.flick_velocity_threshold = 650.0;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "lightbox.toml";
const APP_NAME: &str = "IcedLightbox";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_LIGHTBOX_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Zoom behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ZoomConfig {
    /// Upper zoom bound; the lower bound is always 1.
    pub max_scale: f32,

    /// Scale reached by double-tapping fitted content.
    pub double_tap_target: f32,

    /// Gesture lockout after a zoom animation, in milliseconds.
    pub settle_delay_ms: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: MAX_ZOOM_SCALE,
            double_tap_target: DOUBLE_TAP_TARGET_ZOOM,
            settle_delay_ms: ZOOM_SETTLE_DELAY_MS,
        }
    }
}

impl ZoomConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Presentation and dismissal animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Duration of each animated phase, in milliseconds.
    pub duration_ms: u64,

    /// Scale of the background snapshot while presented.
    pub background_scale: f32,

    /// Scale used by the offscreen show/dismiss paths.
    pub offscreen_scale: f32,

    /// Gesture lockout after an orientation change, in milliseconds.
    pub rotation_settle_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: TRANSITION_DURATION_MS,
            background_scale: MIN_BACKGROUND_SCALE,
            offscreen_scale: OFFSCREEN_EXPANSION_SCALE,
            rotation_settle_ms: ROTATION_SETTLE_DELAY_MS,
        }
    }
}

impl TransitionConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub fn rotation_settle(&self) -> Duration {
        Duration::from_millis(self.rotation_settle_ms)
    }
}

/// Drag and flick physics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Release speed (px/s) at or above which content is flicked away.
    pub flick_velocity_threshold: f32,

    /// Release velocity to impulse multiplier.
    pub flick_impulse_scale: f32,

    /// Angular resistance at the reference area.
    pub base_angular_resistance: f32,

    /// Density at the reference area.
    pub base_density: f32,

    /// Reference screen width the constants were tuned on.
    pub reference_width: f32,

    /// Reference screen height the constants were tuned on.
    pub reference_height: f32,

    /// Snap-back spring duration, in milliseconds.
    pub snap_back_ms: u64,

    /// Snap-back spring damping ratio.
    pub snap_back_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            flick_velocity_threshold: FLICK_VELOCITY_THRESHOLD,
            flick_impulse_scale: FLICK_IMPULSE_SCALE,
            base_angular_resistance: BASE_ANGULAR_RESISTANCE,
            base_density: BASE_DENSITY,
            reference_width: REFERENCE_WIDTH,
            reference_height: REFERENCE_HEIGHT,
            snap_back_ms: SNAP_BACK_DURATION_MS,
            snap_back_damping: SNAP_BACK_DAMPING,
        }
    }
}

impl PhysicsConfig {
    #[must_use]
    pub fn reference_area(&self) -> f32 {
        self.reference_width * self.reference_height
    }

    #[must_use]
    pub fn snap_back(&self) -> Duration {
        Duration::from_millis(self.snap_back_ms)
    }
}

/// Gesture recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum delay between the taps of a double tap, in milliseconds.
    pub double_tap_interval_ms: u64,

    /// Hold time before a long press, in milliseconds.
    pub long_press_delay_ms: u64,

    /// Movement tolerance before a press becomes a pan.
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_interval_ms: DOUBLE_TAP_INTERVAL_MS,
            long_press_delay_ms: LONG_PRESS_DELAY_MS,
            touch_slop: TOUCH_SLOP,
        }
    }
}

impl GestureConfig {
    #[must_use]
    pub fn double_tap_interval(&self) -> Duration {
        Duration::from_millis(self.double_tap_interval_ms)
    }

    #[must_use]
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Returns `value` when `valid`, otherwise logs and returns `default`.
fn checked<T: Copy + std::fmt::Debug>(field: &str, value: T, valid: bool, default: T) -> T {
    if valid {
        value
    } else {
        tracing::warn!(field, ?value, ?default, "config value out of range, using default");
        default
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl ZoomConfig {
    /// Replaces out-of-range fields with their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let max_scale = checked(
            "zoom.max_scale",
            self.max_scale,
            self.max_scale.is_finite() && self.max_scale > MIN_ZOOM_SCALE,
            MAX_ZOOM_SCALE,
        );
        let double_tap_target = checked(
            "zoom.double_tap_target",
            self.double_tap_target,
            self.double_tap_target.is_finite()
                && self.double_tap_target > MIN_ZOOM_SCALE
                && self.double_tap_target <= max_scale,
            DOUBLE_TAP_TARGET_ZOOM.min(max_scale),
        );
        Self {
            max_scale,
            double_tap_target,
            ..self
        }
    }
}

impl TransitionConfig {
    /// Replaces out-of-range fields with their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            background_scale: checked(
                "transition.background_scale",
                self.background_scale,
                positive(self.background_scale) && self.background_scale <= 1.0,
                MIN_BACKGROUND_SCALE,
            ),
            offscreen_scale: checked(
                "transition.offscreen_scale",
                self.offscreen_scale,
                self.offscreen_scale.is_finite() && self.offscreen_scale >= 1.0,
                OFFSCREEN_EXPANSION_SCALE,
            ),
            ..self
        }
    }
}

impl PhysicsConfig {
    /// Replaces out-of-range fields with their defaults.
    ///
    /// A zero impulse would leave flicked content in place forever, and a
    /// zero reference area would make the content massless.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            flick_velocity_threshold: checked(
                "physics.flick_velocity_threshold",
                self.flick_velocity_threshold,
                positive(self.flick_velocity_threshold),
                FLICK_VELOCITY_THRESHOLD,
            ),
            flick_impulse_scale: checked(
                "physics.flick_impulse_scale",
                self.flick_impulse_scale,
                positive(self.flick_impulse_scale),
                FLICK_IMPULSE_SCALE,
            ),
            base_angular_resistance: checked(
                "physics.base_angular_resistance",
                self.base_angular_resistance,
                self.base_angular_resistance.is_finite() && self.base_angular_resistance >= 0.0,
                BASE_ANGULAR_RESISTANCE,
            ),
            base_density: checked(
                "physics.base_density",
                self.base_density,
                positive(self.base_density),
                BASE_DENSITY,
            ),
            reference_width: checked(
                "physics.reference_width",
                self.reference_width,
                positive(self.reference_width),
                REFERENCE_WIDTH,
            ),
            reference_height: checked(
                "physics.reference_height",
                self.reference_height,
                positive(self.reference_height),
                REFERENCE_HEIGHT,
            ),
            snap_back_damping: checked(
                "physics.snap_back_damping",
                self.snap_back_damping,
                positive(self.snap_back_damping) && self.snap_back_damping < 1.0,
                SNAP_BACK_DAMPING,
            ),
            ..self
        }
    }
}

impl GestureConfig {
    /// Replaces out-of-range fields with their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            touch_slop: checked(
                "gestures.touch_slop",
                self.touch_slop,
                self.touch_slop.is_finite() && self.touch_slop >= 0.0,
                TOUCH_SLOP,
            ),
            ..self
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Viewer configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,

    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default)]
    pub physics: PhysicsConfig,

    #[serde(default)]
    pub gestures: GestureConfig,
}

impl ViewerConfig {
    /// Returns the configuration with every out-of-range field replaced by
    /// its default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            zoom: self.zoom.sanitized(),
            transition: self.transition.sanitized(),
            physics: self.physics.sanitized(),
            gestures: self.gestures.sanitized(),
        }
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring the environment override.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning describing what went wrong.
pub fn load() -> (ViewerConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (ViewerConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(%err, "failed to read viewer config, using defaults");
                    return (ViewerConfig::default(), Some(err.to_string()));
                }
            }
        }
    }
    (ViewerConfig::default(), None)
}

/// Loads configuration from a specific path.
///
/// Unparseable content yields the default configuration; out-of-range
/// fields are reset to their defaults.
pub fn load_from_path(path: &Path) -> Result<ViewerConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str::<ViewerConfig>(&content) {
        Ok(config) => Ok(config.sanitized()),
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "invalid viewer config");
            Ok(ViewerConfig::default())
        }
    }
}

/// Saves the configuration to the default path.
pub fn save(config: &ViewerConfig) -> Result<()> {
    if let Some(path) = get_config_path_with_override(None) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &ViewerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_physics() {
        let mut config = ViewerConfig::default();
        config.physics.flick_velocity_threshold = 640.0;
        config.zoom.double_tap_target = 2.5;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("lightbox.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("lightbox.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, ViewerConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("lightbox.toml");
        fs::write(&config_path, "[zoom]\nmax_scale = 4.0\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.zoom.max_scale, 4.0);
        assert_eq!(loaded.zoom.double_tap_target, DOUBLE_TAP_TARGET_ZOOM);
        assert_eq!(loaded.physics, PhysicsConfig::default());
    }

    #[test]
    fn out_of_range_physics_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("lightbox.toml");
        fs::write(
            &config_path,
            "[physics]\nflick_impulse_scale = 0.0\nreference_width = 0.0\n\
             flick_velocity_threshold = 500.0\n",
        )
        .expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.physics.flick_impulse_scale, FLICK_IMPULSE_SCALE);
        assert_eq!(loaded.physics.reference_width, REFERENCE_WIDTH);
        assert_eq!(loaded.physics.flick_velocity_threshold, 500.0);
    }

    #[test]
    fn sanitized_keeps_double_tap_target_within_max() {
        let mut config = ViewerConfig::default();
        config.zoom.max_scale = 2.0;
        config.transition.background_scale = -1.0;
        config.physics.flick_impulse_scale = -0.5;

        let config = config.sanitized();
        assert_eq!(config.zoom.max_scale, 2.0);
        assert_eq!(config.zoom.double_tap_target, 2.0);
        assert_eq!(config.transition.background_scale, MIN_BACKGROUND_SCALE);
        assert_eq!(config.physics.flick_impulse_scale, FLICK_IMPULSE_SCALE);
        assert_eq!(ViewerConfig::default().sanitized(), ViewerConfig::default());
    }

    #[test]
    fn load_with_override_missing_file_yields_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, ViewerConfig::default());
        assert!(warning.is_none());
    }

    #[test]
    fn durations_follow_millisecond_fields() {
        let config = ViewerConfig::default();
        assert_eq!(config.zoom.settle_delay(), Duration::from_millis(350));
        assert_eq!(config.transition.duration(), Duration::from_millis(300));
        assert_eq!(config.physics.snap_back(), Duration::from_millis(500));
    }
}
