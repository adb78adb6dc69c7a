// SPDX-License-Identifier: MPL-2.0
//! Bounded transition trace kept by every controller.

use std::time::Duration;

use super::{CircularBuffer, TraceEntry, TransitionEvent};
use crate::config::DEFAULT_TRACE_CAPACITY;

/// Ring buffer of recent lifecycle events.
#[derive(Debug, Clone)]
pub struct TransitionTrace {
    entries: CircularBuffer<TraceEntry>,
}

impl Default for TransitionTrace {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_CAPACITY)
    }
}

impl TransitionTrace {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: CircularBuffer::new(capacity),
        }
    }

    /// Records `event` at logical time `at`.
    pub fn record(&mut self, at: Duration, event: TransitionEvent) {
        tracing::trace!(?at, ?event, "transition event");
        self.entries.push(TraceEntry { at, event });
    }

    pub fn entries(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &TransitionEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&TransitionEvent) -> bool) -> usize {
        self.events().filter(|event| predicate(event)).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
