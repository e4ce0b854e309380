//! Round lifecycle orchestration.
//!
//! Wires the coordinator to the save store and translates inbound
//! [`GameCommand`]s into engine calls. Services are plain constructed values
//! passed in by whoever owns the session; there is no ambient global state.

use std::sync::mpsc::Receiver;

use tracing::debug;

use crate::core::deck::generate_deck;
use crate::core::session::TurnCoordinator;
use crate::error::{ConfigError, EngineError, SaveError};
use crate::events::GameEvent;
use crate::persistence::{SaveRecord, SaveStore};
use crate::types::{GameCommand, GridConfig};

pub struct RoundRuntime {
    coordinator: TurnCoordinator,
    store: SaveStore,
    /// Distinct card kinds the art table offers; bounds deck generation
    available_kinds: u32,
    config: Option<GridConfig>,
}

impl RoundRuntime {
    pub fn new(store: SaveStore, available_kinds: u32) -> Self {
        Self {
            coordinator: TurnCoordinator::new(),
            store,
            available_kinds,
            config: None,
        }
    }

    /// Register an observer for the engine's outbound events.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.coordinator.subscribe()
    }

    /// Apply one inbound command. Validation failures abort a level start
    /// before any card is spawned; a failed save write surfaces so the
    /// caller can warn the player. Selections and teardown are infallible.
    pub fn apply_command(&mut self, command: GameCommand) -> Result<(), EngineError> {
        match command {
            GameCommand::StartLevel { config, seed } => Ok(self.start_level(config, seed)?),
            GameCommand::CardSelected(index) => {
                self.coordinator.handle_card_selected(index);
                Ok(())
            }
            GameCommand::SaveRequested => Ok(self.save_progress()?),
            GameCommand::Cleanup => {
                self.coordinator.teardown();
                self.config = None;
                Ok(())
            }
        }
    }

    /// Start a level: resume from a saved record for this grid shape when one
    /// exists, otherwise deal a fresh shuffled deck.
    pub fn start_level(&mut self, config: GridConfig, seed: u32) -> Result<(), ConfigError> {
        crate::core::deck::validate(&config, self.available_kinds)?;

        if let Some(record) = self.store.load(config.rows, config.cols) {
            debug!(rows = config.rows, cols = config.cols, "resuming saved round");
            self.coordinator.initialize_resumed_game(config, &record)?;
        } else {
            let deck = generate_deck(&config, self.available_kinds, seed)?;
            self.coordinator.initialize_game(config, &deck)?;
        }
        self.config = Some(config);
        self.coordinator.start_game();
        Ok(())
    }

    /// Start fresh even when a save exists (the player declined to resume);
    /// the stale record is discarded.
    pub fn start_level_fresh(&mut self, config: GridConfig, seed: u32) -> Result<(), ConfigError> {
        self.store.clear(config.rows, config.cols);
        self.start_level(config, seed)
    }

    /// Snapshot the live round into a save record and persist it.
    pub fn save_progress(&self) -> Result<(), SaveError> {
        let (Some(config), true) = (self.config, self.coordinator.in_progress()) else {
            return Ok(());
        };

        let cards = self.coordinator.cards();
        let score = self.coordinator.score();
        let record = SaveRecord {
            rows: config.rows,
            cols: config.cols,
            turns: score.turns(),
            matches: score.matches(),
            streak: score.streak(),
            score: score.score(),
            game_timer: score.elapsed_ms() as f32 / 1000.0,
            card_id: cards.iter().map(|c| c.id()).collect(),
            card_matched: cards.iter().map(|c| c.is_matched()).collect(),
            is_flipped: cards.iter().map(|c| c.is_face_up()).collect(),
        };
        self.store.save(&record)
    }

    /// Advance game time. Clears the persisted record once the round
    /// completes, so a finished grid never offers a resume.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let was_completed = self.coordinator.is_completed();
        self.coordinator.tick(elapsed_ms);
        if !was_completed && self.coordinator.is_completed() {
            if let Some(config) = self.config {
                self.store.clear(config.rows, config.cols);
            }
        }
    }

    pub fn coordinator(&self) -> &TurnCoordinator {
        &self.coordinator
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }
}
