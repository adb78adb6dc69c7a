// SPDX-License-Identifier: MPL-2.0
//! Vocabulary of the presentation lifecycle.

use serde::{Deserialize, Serialize};

/// Primary lifecycle state of a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    #[default]
    Idle,
    Presenting,
    Interactive,
    Dismissing,
}

/// What the viewer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerMode {
    #[default]
    Image,
    AltText,
}

/// Treatment of the captured host background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundStyle {
    #[default]
    ScaledDimmed,
    ScaledDimmedBlurred,
}

impl BackgroundStyle {
    #[must_use]
    pub fn is_blurred(self) -> bool {
        matches!(self, BackgroundStyle::ScaledDimmedBlurred)
    }
}

/// Where the presented content appears from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOrigin {
    #[default]
    FromOriginalPosition,
    FromOffscreen,
}

/// Why a `show` request did not present anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// The thumbnail's view left the visible hierarchy.
    SourceViewGone,
    /// The host could not present the overlay.
    PresentationRefused,
    /// A session is already on screen.
    AlreadyActive,
}

/// Animation used to take the viewer off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissPath {
    AltTextCollapse,
    FlickCleanup,
    ExpandOffscreen,
    CollapseToThumbnail,
}

/// A step of the presentation or dismissal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Initial layout at the thumbnail (or offscreen) position.
    Prepare,
    /// Animated expansion to the fitted frame.
    Present,
    /// Animated exit along a dismissal path.
    Dismiss(DismissPath),
}
