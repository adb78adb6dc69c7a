// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Small state holders the controller composes, each independent of the
//! presentation lifecycle.

pub mod drag;
pub mod timer;
pub mod zoom;

pub use drag::DragState;
pub use timer::Deferred;
pub use zoom::{ZoomController, ZoomTarget};
