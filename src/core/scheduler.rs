//! Cooperative timer scheduler.
//!
//! Settle delays and the completion delay are scheduled continuations on the
//! single game loop, not blocking waits. Each entry carries an event value
//! that the owner interprets when the delay elapses; cancelling a handle (or
//! the whole scheduler at teardown) guarantees a stale continuation can never
//! fire after the round is gone.

/// Opaque cancellation handle for one scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<E> {
    handle: TimerHandle,
    remaining_ms: u32,
    event: E,
}

/// Single-threaded delay queue driven by `tick`.
#[derive(Debug)]
pub struct Scheduler<E> {
    entries: Vec<Entry<E>>,
    next_handle: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedule `event` to fire after `delay_ms` of game time.
    pub fn schedule_after(&mut self, delay_ms: u32, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            remaining_ms: delay_ms,
            event,
        });
        handle
    }

    /// Remove one pending entry. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Invalidate every outstanding continuation.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Advance time and collect the events whose delay has elapsed, in
    /// scheduling order.
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<E> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            let entry = &mut self.entries[i];
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed_ms);
            if entry.remaining_ms == 0 {
                due.push(self.entries.remove(i).event);
            } else {
                i += 1;
            }
        }
        due
    }
}
