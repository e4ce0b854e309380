//! Outbound event channel.
//!
//! The engine announces score updates, round completion, and teardown through
//! a publish/subscribe bus; observers never reach back into engine state.
//! Subscriptions are plain mpsc receivers, so a listener's lifetime ends when
//! it drops its receiver and the bus forgets the matching sender on the next
//! publish.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::core::scoring::ScoreSnapshot;

/// Events the engine publishes.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Counters changed after a resolution (or the initial snapshot at start)
    ScoreUpdated(ScoreSnapshot),
    /// All pairs matched; carries the final snapshot
    RoundComplete(ScoreSnapshot),
    /// The round was torn down
    Cleanup,
}

/// Broadcast channel for [`GameEvent`]s.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, pruning dead ones.
    pub fn publish(&mut self, event: GameEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
