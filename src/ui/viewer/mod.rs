// SPDX-License-Identifier: MPL-2.0
//! Lightbox viewer: presentation lifecycle of one piece of content.
//!
//! [`TransitionController`] follows the Elm-style "state down, messages up"
//! flow: the host feeds it [`Message`]s and reads back an [`Effect`] plus the
//! current [`Presentation`].

pub mod controller;
pub mod phase;
pub mod session;

pub use controller::{Effect, Message, ShowOutcome, TransitionController, ViewerFlags};
pub use phase::{Phase, PhaseQueue, PhaseStep, Presentation};
pub use session::{ShowRequest, StartingGeometry, ViewerSession};
