//! Duplicate-event guard — replay protection at the adapter boundary.
//!
//! The chain may redeliver a log (reorgs, reconnects, at-least-once
//! buses), so every event carries a source id and the adapter refuses to
//! process the same id twice. The guard keeps a bounded LRU-style set so
//! memory stays predictable in long-running processes.

use std::collections::{HashSet, VecDeque};

use darkswap_types::{DarkswapError, EventId, Result};

/// Refuses re-processing of an already-seen external event id.
///
/// Bounded: when the set reaches `max_size`, the oldest entry is evicted
/// to make room.
#[derive(Debug)]
pub struct EventIdempotency {
    /// Event ids already processed.
    seen: HashSet<EventId>,
    /// Insertion order for LRU eviction (front = oldest).
    order: VecDeque<EventId>,
    /// Maximum number of entries before eviction kicks in.
    max_size: usize,
}

impl EventIdempotency {
    /// Create a new guard with the given maximum cache size.
    ///
    /// # Panics
    /// Panics if `max_size` is zero.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "EventIdempotency max_size must be > 0");
        Self {
            seen: HashSet::with_capacity(max_size),
            order: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record an event id. Returns an error if it was already observed.
    ///
    /// # Errors
    /// [`DarkswapError::DuplicateEvent`] on replay.
    pub fn observe(&mut self, event_id: EventId) -> Result<()> {
        if self.seen.contains(&event_id) {
            return Err(DarkswapError::DuplicateEvent(event_id));
        }

        // Evict oldest if at capacity.
        if self.seen.len() >= self.max_size {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }

        self.seen.insert(event_id);
        self.order.push_back(event_id);
        Ok(())
    }

    /// Whether an event id has already been observed.
    #[must_use]
    pub fn is_seen(&self, event_id: &EventId) -> bool {
        self.seen.contains(event_id)
    }

    /// Number of event ids currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the guard is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
