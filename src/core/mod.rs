//! Core game logic: cards, deck generation, scoring, scheduling, and the
//! turn-resolution protocol.

pub mod card;
pub mod deck;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;

pub use card::Card;
pub use deck::{generate_deck, validate};
pub use rng::SimpleRng;
pub use scheduler::{Scheduler, TimerHandle};
pub use scoring::{displayed_streak, match_score, ScoreSnapshot, ScoreTracker};
pub use session::TurnCoordinator;
