// SPDX-License-Identifier: MPL-2.0
//! Optional host hooks.
//!
//! Each hook family is a trait whose methods all have defaults. Hosts
//! override what they need and leave the rest to [`NoOpDelegate`].

use crate::config::{DEFAULT_BLUR_RADIUS, DEFAULT_DIMMING_ALPHA};
use crate::image_info::ImageInfo;

/// Notified once per session, after the overlay is gone.
pub trait DismissalDelegate {
    fn on_dismissed(&mut self, _info: &ImageInfo) {}
}

/// Presentation options.
pub trait OptionsDelegate {
    /// Whether the thumbnail fades out while the content grows from it.
    fn should_fade_thumbnail_during_transition(&self, _info: &ImageInfo) -> bool {
        false
    }

    /// Alpha of the black dimming layer over the background snapshot.
    fn dimming_overlay_alpha(&self) -> f32 {
        DEFAULT_DIMMING_ALPHA
    }

    /// Blur radius for the blurred background snapshot.
    fn background_blur_radius(&self) -> f32 {
        DEFAULT_BLUR_RADIUS
    }
}

/// Interaction policy and notifications.
pub trait InteractionsDelegate {
    fn on_long_press(&mut self, _info: &ImageInfo) {}

    fn allow_copy_to_clipboard(&self) -> bool {
        true
    }

    /// While this returns true, new gestures are dropped.
    fn should_ignore_touches_temporarily(&self) -> bool {
        false
    }
}

/// Accessibility text providers. `None` selects the built-in text.
pub trait AccessibilityDelegate {
    fn accessibility_label(&self, _info: &ImageInfo) -> Option<String> {
        None
    }

    fn accessibility_hint_zoomed_in(&self, _info: &ImageInfo) -> Option<String> {
        None
    }

    fn accessibility_hint_zoomed_out(&self, _info: &ImageInfo) -> Option<String> {
        None
    }
}

/// Delegate that keeps every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpDelegate;

impl DismissalDelegate for NoOpDelegate {}
impl OptionsDelegate for NoOpDelegate {}
impl InteractionsDelegate for NoOpDelegate {}
impl AccessibilityDelegate for NoOpDelegate {}

/// The full set of hooks supplied at construction.
pub struct Delegates {
    pub dismissal: Box<dyn DismissalDelegate>,
    pub options: Box<dyn OptionsDelegate>,
    pub interactions: Box<dyn InteractionsDelegate>,
    pub accessibility: Box<dyn AccessibilityDelegate>,
}

impl Default for Delegates {
    fn default() -> Self {
        Self {
            dismissal: Box::new(NoOpDelegate),
            options: Box::new(NoOpDelegate),
            interactions: Box::new(NoOpDelegate),
            accessibility: Box::new(NoOpDelegate),
        }
    }
}

impl std::fmt::Debug for Delegates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delegates").finish_non_exhaustive()
    }
}

impl Delegates {
    #[must_use]
    pub fn with_dismissal(mut self, delegate: impl DismissalDelegate + 'static) -> Self {
        self.dismissal = Box::new(delegate);
        self
    }

    #[must_use]
    pub fn with_options(mut self, delegate: impl OptionsDelegate + 'static) -> Self {
        self.options = Box::new(delegate);
        self
    }

    #[must_use]
    pub fn with_interactions(mut self, delegate: impl InteractionsDelegate + 'static) -> Self {
        self.interactions = Box::new(delegate);
        self
    }

    #[must_use]
    pub fn with_accessibility(mut self, delegate: impl AccessibilityDelegate + 'static) -> Self {
        self.accessibility = Box::new(delegate);
        self
    }
}
