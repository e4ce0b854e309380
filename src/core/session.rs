//! Turn coordination - the two-card match protocol.
//!
//! The coordinator arbitrates card selections into match/mismatch outcomes
//! under timed settle delays, drives per-card state and the score tracker,
//! and announces results on the event bus. It is the only writer of shared
//! round state; rejecting input while a resolution is pending is the sole
//! concurrency guard the engine needs.
//!
//! State machine: Idle -> AwaitingSecondSelection -> Resolving -> Idle, with
//! Idle -> Completing -> Idle entered once from the post-match win check.

use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::core::card::Card;
use crate::core::scheduler::Scheduler;
use crate::core::scoring::ScoreTracker;
use crate::error::ConfigError;
use crate::events::{EventBus, GameEvent};
use crate::persistence::SaveRecord;
use crate::types::{
    CardId, GridConfig, MATCH_SETTLE_MS, MISMATCH_SETTLE_MS, ROUND_COMPLETE_DELAY_MS,
};

/// Continuations the coordinator schedules on its own timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    /// Settle delay after the second selection elapsed; apply the outcome
    Resolve {
        first: usize,
        second: usize,
        is_match: bool,
    },
    /// The initial face-up preview is over
    EndPreview,
    /// The completion delay elapsed; announce the final result
    CompleteRound,
}

#[derive(Debug)]
pub struct TurnCoordinator {
    cards: Vec<Card>,
    config: Option<GridConfig>,
    /// At most one card selected this turn, none while resolving
    open_card: Option<usize>,
    resolution_in_progress: bool,
    /// Win sequence entered; guards against double-fire
    completion_fired: bool,
    /// Round-complete event has been published
    completed: bool,
    started: bool,
    /// Round came from a save record; the preview does not re-run
    resumed: bool,
    score: ScoreTracker,
    scheduler: Scheduler<TimerEvent>,
    bus: EventBus,
}

impl Default for TurnCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnCoordinator {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            config: None,
            open_card: None,
            resolution_in_progress: false,
            completion_fired: false,
            completed: false,
            started: false,
            resumed: false,
            score: ScoreTracker::new(),
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
        }
    }

    /// Register an observer for score/completion/cleanup events.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.bus.subscribe()
    }

    /// Set up a fresh round from an already-shuffled deck. Nothing is
    /// published until [`start_game`](Self::start_game).
    pub fn initialize_game(
        &mut self,
        config: GridConfig,
        deck: &[CardId],
    ) -> Result<(), ConfigError> {
        if deck.len() as u32 != config.cells() {
            return Err(ConfigError::DeckSizeMismatch {
                expected: config.cells(),
                got: deck.len() as u32,
            });
        }
        self.reset_round_state();
        self.config = Some(config);
        self.cards = deck.iter().map(|&id| Card::new(id)).collect();
        debug!(cards = self.cards.len(), "game initialized");
        Ok(())
    }

    /// Set up a round from a save record, restoring counters and per-card
    /// matched/flip state in spawn order.
    pub fn initialize_resumed_game(
        &mut self,
        config: GridConfig,
        record: &SaveRecord,
    ) -> Result<(), ConfigError> {
        if !record.is_consistent() || record.card_id.len() as u32 != config.cells() {
            return Err(ConfigError::DeckSizeMismatch {
                expected: config.cells(),
                got: record.card_id.len() as u32,
            });
        }
        self.reset_round_state();
        self.config = Some(config);
        self.cards = record
            .card_id
            .iter()
            .zip(record.is_flipped.iter())
            .zip(record.card_matched.iter())
            .map(|((&id, &flipped), &matched)| Card::from_saved(id, flipped, matched))
            .collect();
        self.score = ScoreTracker::restore(
            record.turns,
            record.matches,
            record.streak,
            record.score,
            (record.game_timer * 1000.0) as u32,
        );

        // A save taken mid-turn leaves exactly one unmatched card face-up;
        // re-adopt it as the open card so the next selection resolves against
        // it. Any other count means the save caught a pending resolution or
        // the preview, so those cards go back face-down and selectable.
        let face_up_unmatched: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_face_up() && !c.is_matched())
            .map(|(i, _)| i)
            .collect();
        if face_up_unmatched.len() == 1 {
            self.open_card = Some(face_up_unmatched[0]);
        } else {
            for &index in &face_up_unmatched {
                self.cards[index].flip_to_back(false);
            }
        }
        self.resumed = true;

        debug!(
            matched = self.matched_count(),
            total = self.cards.len(),
            "saved game loaded"
        );
        Ok(())
    }

    /// Mark the elapsed-time origin and publish the initial score snapshot.
    /// With a configured preview, all cards show face-up and input stays
    /// frozen until the preview delay elapses. A resumed round skips the
    /// preview; re-running it would discard the restored open card.
    pub fn start_game(&mut self) {
        self.started = true;
        if let Some(config) = self.config {
            if config.preview_ms > 0 && !self.resumed {
                for card in &mut self.cards {
                    card.flip_to_front(false);
                    card.set_interactable(false);
                }
                self.scheduler
                    .schedule_after(config.preview_ms, TimerEvent::EndPreview);
            }
        }
        self.publish_score_update();
    }

    /// Feed one card selection into the protocol. Mistimed or illegal
    /// selections are silently ignored; they are normal input, not errors.
    pub fn handle_card_selected(&mut self, index: usize) {
        if !self.started || self.completed {
            return;
        }
        if self.resolution_in_progress {
            debug!(index, "selection ignored: resolution in progress");
            return;
        }
        let Some(card) = self.cards.get(index) else {
            return;
        };
        if Some(index) == self.open_card {
            return;
        }
        if card.is_matched() || card.is_face_up() || !card.accepts_input() {
            return;
        }

        self.cards[index].flip_to_front(true);

        let Some(first) = self.open_card else {
            self.open_card = Some(index);
            debug!(index, id = self.cards[index].id(), "first card selected");
            return;
        };

        // Second selection: enter Resolving. The outcome applies only after
        // the settle delay; input is rejected for the whole window.
        self.resolution_in_progress = true;
        self.set_unmatched_interactable(false);
        self.score.on_turn_start();

        let is_match = self.cards[first].id() == self.cards[index].id();
        let delay = if is_match {
            MATCH_SETTLE_MS
        } else {
            MISMATCH_SETTLE_MS
        };
        debug!(
            first_id = self.cards[first].id(),
            second_id = self.cards[index].id(),
            is_match,
            "second card selected, resolving"
        );
        self.scheduler.schedule_after(
            delay,
            TimerEvent::Resolve {
                first,
                second: index,
                is_match,
            },
        );
    }

    /// Advance game time: card flip animations, pending settle delays, and
    /// the elapsed-time clock.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for card in &mut self.cards {
            card.tick(elapsed_ms);
        }
        if self.started && !self.completed {
            self.score.advance_time(elapsed_ms);
        }
        for event in self.scheduler.tick(elapsed_ms) {
            self.apply_timer_event(event);
        }
    }

    fn apply_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Resolve {
                first,
                second,
                is_match,
            } => self.resolve_turn(first, second, is_match),
            TimerEvent::EndPreview => {
                for card in &mut self.cards {
                    card.flip_to_back(true);
                }
                self.set_unmatched_interactable(true);
                debug!("preview over, play begins");
            }
            TimerEvent::CompleteRound => {
                self.completed = true;
                let snapshot = self.score.snapshot();
                info!(
                    score = snapshot.score,
                    turns = snapshot.turns,
                    elapsed_secs = snapshot.elapsed_secs,
                    "round complete"
                );
                self.bus.publish(GameEvent::ScoreUpdated(snapshot));
                self.bus.publish(GameEvent::RoundComplete(snapshot));
            }
        }
    }

    fn resolve_turn(&mut self, first: usize, second: usize, is_match: bool) {
        if is_match {
            let base = self.config.map(|c| c.base_score).unwrap_or_default();
            let awarded = self.score.on_match(base);
            self.cards[first].mark_matched();
            self.cards[second].mark_matched();
            debug!(
                streak = self.score.streak(),
                awarded,
                total = self.score.score(),
                "match found"
            );
            self.publish_score_update();
            self.check_win_condition();
        } else {
            self.score.on_mismatch();
            self.cards[first].flip_to_back(true);
            self.cards[second].flip_to_back(true);
            debug!("mismatch, streak reset");
            self.publish_score_update();
        }

        self.open_card = None;
        self.resolution_in_progress = false;
        self.set_unmatched_interactable(true);
    }

    fn check_win_condition(&mut self) {
        if self.completion_fired {
            return;
        }
        if self.matched_count() == self.cards.len() && !self.cards.is_empty() {
            self.completion_fired = true;
            self.scheduler
                .schedule_after(ROUND_COMPLETE_DELAY_MS, TimerEvent::CompleteRound);
        }
    }

    /// Tear the round down: invalidate every pending continuation so a stale
    /// callback can never mutate state, then announce cleanup.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.reset_round_state();
        self.cards.clear();
        self.config = None;
        self.bus.publish(GameEvent::Cleanup);
    }

    fn reset_round_state(&mut self) {
        self.open_card = None;
        self.resolution_in_progress = false;
        self.completion_fired = false;
        self.completed = false;
        self.started = false;
        self.resumed = false;
        self.score = ScoreTracker::new();
        self.scheduler.cancel_all();
    }

    fn set_unmatched_interactable(&mut self, interactable: bool) {
        for card in &mut self.cards {
            card.set_interactable(interactable);
        }
    }

    fn publish_score_update(&mut self) {
        self.bus.publish(GameEvent::ScoreUpdated(self.score.snapshot()));
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn config(&self) -> Option<GridConfig> {
        self.config
    }

    pub fn open_card(&self) -> Option<usize> {
        self.open_card
    }

    pub fn is_resolving(&self) -> bool {
        self.resolution_in_progress
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Whether there is live progress worth saving.
    pub fn in_progress(&self) -> bool {
        self.started && !self.completed && !self.cards.is_empty()
    }
}
