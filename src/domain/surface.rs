// SPDX-License-Identifier: MPL-2.0
//! Opaque handles exchanged with the host.

use serde::{Deserialize, Serialize};

/// Handle to a host-rendered surface such as a background snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Handle to the host view that owns the thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceView(pub u64);

/// Style of the host's system overlay bar (status bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayBarStyle {
    #[default]
    Default,
    Light,
}
