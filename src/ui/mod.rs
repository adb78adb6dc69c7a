// SPDX-License-Identifier: MPL-2.0
//! Interaction and presentation state for the lightbox.
//!
//! Nothing here draws. The [`viewer`] controller turns host input into a
//! [`viewer::Presentation`] per frame, which the host renders however it
//! likes.
//!
//! - [`viewer`] - Transition controller, phases and per-session state
//! - [`gesture`] - Pointer recognition and gesture routing
//! - [`physics`] - Drag, flick and snap-back of the content
//! - [`state`] - Reusable state (zoom, drag anchor, deferred timers)
//! - [`animation`] - Easing and interpolation helpers

pub mod animation;
pub mod gesture;
pub mod physics;
pub mod state;
pub mod viewer;
