//! Ordered queue of deferred simulation events
//!
//! Deferred work (power-up expiry) is not a free-running callback: it is an
//! entry on this queue, drained by the same loop that runs ticks. Entries are
//! ordered by due time, then by scheduling order, so two entries due at the
//! same instant fire in the order they were scheduled.

use std::collections::BTreeMap;

use crate::Millis;

/// Handle to a scheduled entry, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    due: Millis,
    seq: u64,
}

impl TimerHandle {
    pub fn due(&self) -> Millis {
        self.due
    }
}

#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    entries: BTreeMap<(Millis, u64), E>,
    next_seq: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((due, seq), event);
        TimerHandle { due, seq }
    }

    /// Remove a pending entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&(handle.due, handle.seq)).is_some()
    }

    /// Pop the earliest entry due at or before `now`
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, E)> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        self.entries.pop_first().map(|((due, _), event)| (due, event))
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.entries.keys().next().map(|&(due, _)| due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_time_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(300, "c");
        queue.schedule(100, "a");
        queue.schedule(100, "b");

        assert_eq!(queue.pop_due(50), None);
        assert_eq!(queue.pop_due(100), Some((100, "a")));
        assert_eq!(queue.pop_due(100), Some((100, "b")));
        assert_eq!(queue.pop_due(299), None);
        assert_eq!(queue.next_due(), Some(300));
        assert_eq!(queue.pop_due(1000), Some((300, "c")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(100, 1);
        let second = queue.schedule(100, 2);

        assert!(queue.cancel(first));
        assert!(!queue.cancel(first));
        assert_eq!(queue.len(), 1);
        assert_eq!(second.due(), 100);
        assert_eq!(queue.pop_due(100), Some((100, 2)));
        assert!(!queue.cancel(second));
    }
}
