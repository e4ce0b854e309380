//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Settle delays after the second card of a turn is selected (milliseconds)
pub const MATCH_SETTLE_MS: u32 = 300;
pub const MISMATCH_SETTLE_MS: u32 = 800;

/// Extra delay between the winning match settling and the round-complete
/// announcement (milliseconds)
pub const ROUND_COMPLETE_DELAY_MS: u32 = 1000;

/// Duration of an animated card flip; the logical face changes at the midpoint
pub const CARD_FLIP_MS: u32 = 250;

/// Default per-match base score when a level supplies none
pub const DEFAULT_BASE_SCORE: u32 = 100;

/// Identity of a card face; exactly two cards share an id in any active deck
pub type CardId = u32;

/// Immutable per-level configuration, supplied by the caller at level start.
/// The engine never loads configuration itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// How long all cards are previewed face-up before play (milliseconds)
    pub preview_ms: u32,
    /// Base score awarded per match before the streak bonus
    pub base_score: u32,
}

impl GridConfig {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            preview_ms: 0,
            base_score: DEFAULT_BASE_SCORE,
        }
    }

    /// Total grid cells (= number of cards)
    pub fn cells(&self) -> u32 {
        self.rows * self.cols
    }

    /// Number of distinct card ids the grid needs
    pub fn unique_pairs(&self) -> u32 {
        self.cells() / 2
    }
}

/// Card face orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
}

/// Inbound commands the runtime consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// Start a level; a saved record for the grid shape takes precedence
    StartLevel { config: GridConfig, seed: u32 },
    /// Select the card at the given grid index
    CardSelected(usize),
    /// Persist current progress
    SaveRequested,
    /// Tear the round down, invalidating pending delays
    Cleanup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_config_cells_and_pairs() {
        let config = GridConfig::new(4, 5);
        assert_eq!(config.cells(), 20);
        assert_eq!(config.unique_pairs(), 10);
    }

    #[test]
    fn grid_config_defaults() {
        let config = GridConfig::new(2, 2);
        assert_eq!(config.base_score, DEFAULT_BASE_SCORE);
        assert_eq!(config.preview_ms, 0);
    }
}
