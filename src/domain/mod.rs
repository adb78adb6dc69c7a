// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value types shared by the viewer.
//!
//! # Modules
//!
//! - [`orientation`]: Interface orientation and the signed rotation table
//! - [`zoom_scale`]: Clamped zoom scale ([`ZoomScale`])
//! - [`surface`]: Opaque host handles ([`SurfaceHandle`], [`ReferenceView`])
//! - [`transition`]: Lifecycle states, modes and dismissal paths

pub mod orientation;
pub mod surface;
pub mod transition;
pub mod zoom_scale;

pub use orientation::{rotation_delta, rotation_delta_degrees, Orientation};
pub use surface::{OverlayBarStyle, ReferenceView, SurfaceHandle};
pub use transition::{
    AbortReason, BackgroundStyle, DismissPath, PhaseKind, TransitionOrigin, TransitionState,
    ViewerMode,
};
pub use zoom_scale::ZoomScale;
