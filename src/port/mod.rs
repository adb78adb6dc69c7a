// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the viewer's collaborators.
//!
//! The viewer never renders, captures or fetches anything itself. The host
//! application implements these traits and hands them to the
//! [`TransitionController`](crate::ui::viewer::TransitionController).
//!
//! # Available Ports
//!
//! - [`host`]: overlay presentation, snapshots and environment queries
//! - [`fetch`]: asynchronous content acquisition
//! - [`delegate`]: optional customization and notification hooks
//!
//! # Design Notes
//!
//! - Traits use domain and `iced_core` geometry types only
//! - `ContentFetcher` is `Send + Sync` because it runs on a worker thread;
//!   everything else is called on the UI loop
//! - Delegate methods all have defaults, so hosts implement only what they
//!   customize

pub mod delegate;
pub mod fetch;
pub mod host;

pub use delegate::{
    AccessibilityDelegate, Delegates, DismissalDelegate, InteractionsDelegate, NoOpDelegate,
    OptionsDelegate,
};
pub use fetch::{is_cancelled, AcquisitionError, CancellationToken, ContentFetcher};
pub use host::Host;
