// SPDX-License-Identifier: MPL-2.0
//! Bounded in-memory log of diagnostic events.
//!
//! Once full, each new event pushes out the oldest one. The log counts what
//! it pushed out so an exported report can tell that it starts mid-session.

use std::collections::VecDeque;

use super::DiagnosticEvent;
pub use crate::domain::diagnostics::BufferCapacity;

#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<DiagnosticEvent>,
    capacity: BufferCapacity,
    evicted: usize,
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.value()),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, event: DiagnosticEvent) {
        if self.events.len() >= self.capacity.value() {
            self.events.pop_front();
            self.evicted = self.evicted.saturating_add(1);
        }
        self.events.push_back(event);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    /// Events pushed out since creation or the last [`Self::clear`].
    #[must_use]
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.evicted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, UserAction};
    use crate::domain::diagnostics::buffer_capacity_bounds;

    fn action(action: UserAction) -> DiagnosticEvent {
        DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
            details: None,
        })
    }

    #[test]
    fn full_log_drops_oldest_and_counts_it() {
        let mut log = EventLog::new(BufferCapacity::new(0));
        let capacity = log.capacity();
        assert_eq!(capacity, buffer_capacity_bounds::MIN);

        log.push(action(UserAction::FocusAsset));
        for _ in 0..capacity {
            log.push(action(UserAction::Refresh));
        }

        assert_eq!(log.len(), capacity);
        assert_eq!(log.evicted(), 1);
        assert!(log.iter().all(|event| matches!(
            event.kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::Refresh,
                ..
            }
        )));
    }

    #[test]
    fn clear_resets_eviction_count() {
        let mut log = EventLog::new(BufferCapacity::new(0));
        for _ in 0..log.capacity() + 3 {
            log.push(action(UserAction::Refresh));
        }
        assert_eq!(log.evicted(), 3);

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.evicted(), 0);
    }
}
