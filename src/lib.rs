// SPDX-License-Identifier: MPL-2.0
//! `iced_lightbox` presents a single image (or its alt text) full screen,
//! growing it out of the thumbnail it was tapped on and collapsing it back
//! when dismissed.
//!
//! The crate is renderer-agnostic: geometry uses `iced_core` types, the host
//! environment sits behind the [`port::Host`] trait, and every frame is
//! described by a [`ui::viewer::Presentation`]. Content that still has to be
//! fetched is acquired off the UI loop via [`acquisition::spawn`].

#![doc(html_root_url = "https://docs.rs/iced_lightbox/0.1.0")]

pub mod acquisition;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod image_info;
pub mod port;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use image_info::ImageInfo;
pub use ui::viewer::{Effect, Message, ShowOutcome, ShowRequest, TransitionController};
