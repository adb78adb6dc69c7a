// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for the viewer's transition trace.
//!
//! Every controller records its lifecycle steps in a memory-bounded ring
//! buffer. The trace complements the `tracing` output: it is always on,
//! costs nothing to query, and lets callers check phase ordering without
//! installing a subscriber.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with fixed capacity
//! - [`TransitionEvent`]: Lifecycle steps worth recording
//! - [`TransitionTrace`]: Timestamped buffer of events owned by a controller

mod buffer;
mod events;
mod trace;

pub use buffer::CircularBuffer;
pub use events::{TraceEntry, TransitionEvent};
pub use trace::TransitionTrace;
