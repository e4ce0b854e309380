//! Error types for match-pairs.

use thiserror::Error;

/// Errors that can abort a level start before any card is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be even for card matching, got {cells} cells")]
    OddCellCount { cells: u32 },

    #[error("not enough card types: required {required}, available {available}")]
    NotEnoughCardKinds { required: u32, available: u32 },

    #[error("deck length {got} does not match grid size {expected}")]
    DeckSizeMismatch { expected: u32, got: u32 },
}

/// Errors from writing a save record. Load failures are never surfaced;
/// an unreadable file is treated the same as no save existing.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write save file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize save record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything the command surface can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),
}
