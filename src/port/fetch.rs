// SPDX-License-Identifier: MPL-2.0
//! Content acquisition port definition.
//!
//! A [`ContentFetcher`] downloads or decodes the full-size image for an
//! [`ImageInfo`]. It runs on a worker thread and reports only the outcome;
//! transport details never reach the viewer.

use crate::image_info::ImageInfo;
use iced_core::Size;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked by fetchers between units of work.
pub type CancellationToken = Arc<AtomicBool>;

/// Returns whether `token` has been cancelled.
#[must_use]
pub fn is_cancelled(token: &CancellationToken) -> bool {
    token.load(Ordering::Relaxed)
}

/// Errors that can occur while acquiring content.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    /// The fetch failed (network, decoding, missing resource).
    Failed(String),

    /// The content decoded to an unusable size.
    InvalidDimensions {
        /// The width that was detected.
        width: u32,
        /// The height that was detected.
        height: u32,
    },

    /// The request was cancelled before it finished.
    Cancelled,
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionError::Failed(msg) => write!(f, "Acquisition failed: {msg}"),
            AcquisitionError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {width}x{height}")
            }
            AcquisitionError::Cancelled => write!(f, "Acquisition cancelled"),
        }
    }
}

impl std::error::Error for AcquisitionError {}

/// Port for fetching full-size content.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; they are called from tokio's
/// blocking pool.
pub trait ContentFetcher: Send + Sync {
    /// Fetches the content described by `info` and returns its pixel size.
    ///
    /// `progress` receives values in `[0, 1]`. Implementations should return
    /// [`AcquisitionError::Cancelled`] soon after `cancel` is set.
    ///
    /// # Errors
    ///
    /// Returns an [`AcquisitionError`] if the content cannot be produced.
    fn fetch(
        &self,
        info: &ImageInfo,
        cancel: &CancellationToken,
        progress: &dyn Fn(f32),
    ) -> Result<Size, AcquisitionError>;
}
