//! match-pairs - rules engine for a timed memory-matching card game.
//!
//! The engine arbitrates card selections into match/mismatch outcomes under
//! timed settle delays, tracks score and streaks, detects completion, and
//! persists progress for resume. Presentation concerns (animation rendering,
//! audio, menus) are external collaborators that observe the event bus.
//!
//! Typical wiring:
//!
//! ```
//! use match_pairs::persistence::SaveStore;
//! use match_pairs::runtime::RoundRuntime;
//! use match_pairs::types::{GameCommand, GridConfig};
//!
//! let dir = std::env::temp_dir().join("match-pairs-doc");
//! let mut runtime = RoundRuntime::new(SaveStore::new(dir), 32);
//! let events = runtime.subscribe();
//! runtime
//!     .apply_command(GameCommand::StartLevel {
//!         config: GridConfig::new(2, 2),
//!         seed: 7,
//!     })
//!     .unwrap();
//! runtime.apply_command(GameCommand::CardSelected(0)).unwrap();
//! runtime.tick(16);
//! # drop(events);
//! ```

pub mod core;
pub mod error;
pub mod events;
pub mod persistence;
pub mod runtime;
pub mod types;

pub use crate::core::{ScoreSnapshot, ScoreTracker, TurnCoordinator};
pub use error::{ConfigError, EngineError, SaveError};
pub use events::{EventBus, GameEvent};
pub use persistence::{SaveRecord, SaveStore};
pub use runtime::RoundRuntime;
pub use types::{CardId, Face, GameCommand, GridConfig};
