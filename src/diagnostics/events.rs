// SPDX-License-Identifier: MPL-2.0
//! Transition trace event types.
//!
//! Every lifecycle step of a viewer is recorded as a [`TransitionEvent`] so
//! that phase ordering can be inspected after the fact.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{AbortReason, DismissPath, Orientation, PhaseKind};

/// Lifecycle steps captured in the transition trace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransitionEvent {
    // ==========================================================================
    // Presentation
    // ==========================================================================
    ShowRequested,

    ShowAborted {
        reason: AbortReason,
    },

    PhaseBegan {
        phase: PhaseKind,
    },

    PhaseCompleted {
        phase: PhaseKind,
    },

    /// Content became interactive.
    Presented,

    // ==========================================================================
    // Dismissal
    // ==========================================================================
    DismissRequested {
        path: DismissPath,
    },

    /// The session ended and the host was notified.
    Dismissed,

    // ==========================================================================
    // Interaction
    // ==========================================================================
    FlickStarted {
        speed: f32,
    },

    SnapBack,

    /// Fast release outside the content.
    DismissedByVelocity {
        speed: f32,
    },

    OrientationChanged {
        from: Orientation,
        to: Orientation,
    },

    // ==========================================================================
    // Acquisition
    // ==========================================================================
    AcquisitionFailed {
        message: String,
    },
}

/// A [`TransitionEvent`] stamped with the controller's logical clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceEntry {
    /// Time since the controller was created.
    #[serde(with = "duration_millis")]
    pub at: Duration,

    #[serde(flatten)]
    pub event: TransitionEvent,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
