// SPDX-License-Identifier: MPL-2.0
//! Single-shot deferred callbacks driven by the UI loop.
//!
//! Timers do not own a thread: the owner advances them with the elapsed
//! time of each tick and receives the keys whose deadline passed.

use std::time::Duration;

/// A set of pending single-shot timers keyed by `K`.
///
/// Scheduling a key that is already pending restarts it.
#[derive(Debug, Clone)]
pub struct Deferred<K> {
    pending: Vec<(K, Duration)>,
}

impl<K> Default for Deferred<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Deferred<K> {
    /// Schedules `key` to fire after `delay`.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.cancel(key);
        self.pending.push((key, delay));
    }

    /// Drops a pending timer, if any.
    pub fn cancel(&mut self, key: K) {
        self.pending.retain(|(pending, _)| *pending != key);
    }

    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == key)
    }

    /// Advances every timer by `elapsed` and returns the keys that fired, in
    /// deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<K> {
        let mut fired: Vec<(K, Duration)> = Vec::new();
        self.pending.retain_mut(|(key, remaining)| {
            if *remaining <= elapsed {
                fired.push((*key, *remaining));
                false
            } else {
                *remaining -= elapsed;
                true
            }
        });
        fired.sort_by_key(|(_, remaining)| *remaining);
        fired.into_iter().map(|(key, _)| key).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
