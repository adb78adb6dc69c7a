// SPDX-License-Identifier: MPL-2.0
//! Background content acquisition.
//!
//! [`spawn`] runs a [`ContentFetcher`] on tokio's blocking pool and reports
//! back through an unbounded channel that the UI loop drains into the
//! controller. Each request ends in exactly one terminal event unless its
//! token was cancelled, in which case nothing terminal is sent.

use crate::image_info::ImageInfo;
use crate::port::{is_cancelled, AcquisitionError, CancellationToken, ContentFetcher};
use iced_core::Size;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Identifies the presentation a request belongs to.
pub type SessionId = u64;

/// Message delivered from a running acquisition.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionEvent {
    Progress { session: SessionId, fraction: f32 },
    Loaded { session: SessionId, size: Size },
    Failed { session: SessionId, error: AcquisitionError },
}

impl AcquisitionEvent {
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            AcquisitionEvent::Progress { session, .. }
            | AcquisitionEvent::Loaded { session, .. }
            | AcquisitionEvent::Failed { session, .. } => *session,
        }
    }
}

/// One acquisition request.
#[derive(Debug, Clone)]
pub struct AcquisitionRequest {
    pub session: SessionId,
    pub info: ImageInfo,
    pub cancel: CancellationToken,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn validate(size: Size) -> Result<Size, AcquisitionError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(size.width) && valid(size.height) {
        Ok(size)
    } else {
        Err(AcquisitionError::InvalidDimensions {
            width: size.width.max(0.0) as u32,
            height: size.height.max(0.0) as u32,
        })
    }
}

/// Starts `request` on the blocking pool of `handle`.
pub fn spawn(
    handle: &Handle,
    fetcher: Arc<dyn ContentFetcher>,
    request: AcquisitionRequest,
    sender: UnboundedSender<AcquisitionEvent>,
) -> JoinHandle<()> {
    handle.spawn_blocking(move || {
        let AcquisitionRequest {
            session,
            info,
            cancel,
        } = request;

        let progress = |fraction: f32| {
            if !is_cancelled(&cancel) {
                let _ = sender.send(AcquisitionEvent::Progress {
                    session,
                    fraction: fraction.clamp(0.0, 1.0),
                });
            }
        };

        let result = fetcher
            .fetch(&info, &cancel, &progress)
            .and_then(validate);

        if is_cancelled(&cancel) {
            tracing::debug!(session, "acquisition cancelled");
            return;
        }

        let event = match result {
            Ok(size) => AcquisitionEvent::Loaded { session, size },
            Err(error) => {
                tracing::warn!(session, %error, "acquisition failed");
                AcquisitionEvent::Failed { session, error }
            }
        };
        if sender.send(event).is_err() {
            tracing::debug!(session, "acquisition result dropped, receiver gone");
        }
    })
}
