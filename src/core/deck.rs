//! Deck generation and level validation.
//!
//! A deck is the ordered card-id sequence spawned onto the grid: each id
//! appears exactly twice and the sequence length equals the cell count.
//! Validation happens before any card is created so a bad level never leaves
//! partial state behind.

use crate::core::rng::SimpleRng;
use crate::error::ConfigError;
use crate::types::{CardId, GridConfig};

/// Reject grids that cannot host a pair-matching round.
pub fn validate(config: &GridConfig, available_kinds: u32) -> Result<(), ConfigError> {
    let cells = config.cells();
    if cells % 2 != 0 {
        return Err(ConfigError::OddCellCount { cells });
    }
    let required = cells / 2;
    if available_kinds < required {
        return Err(ConfigError::NotEnoughCardKinds {
            required,
            available: available_kinds,
        });
    }
    Ok(())
}

/// Pick `count` distinct ids from `0..available_kinds` via partial Fisher-Yates.
fn pick_unique_ids(available_kinds: u32, count: u32, rng: &mut SimpleRng) -> Vec<CardId> {
    let mut pool: Vec<CardId> = (0..available_kinds).collect();
    for i in 0..count as usize {
        let j = i + rng.next_range((pool.len() - i) as u32) as usize;
        pool.swap(i, j);
    }
    pool.truncate(count as usize);
    pool
}

/// Build a shuffled deck for the grid. Each picked id is duplicated, then the
/// pairs are shuffled together.
pub fn generate_deck(
    config: &GridConfig,
    available_kinds: u32,
    seed: u32,
) -> Result<Vec<CardId>, ConfigError> {
    validate(config, available_kinds)?;

    let mut rng = SimpleRng::new(seed);
    let unique = pick_unique_ids(available_kinds, config.unique_pairs(), &mut rng);

    let mut deck = Vec::with_capacity(config.cells() as usize);
    deck.extend_from_slice(&unique);
    deck.extend_from_slice(&unique);
    rng.shuffle(&mut deck);

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn validate_rejects_odd_cell_count() {
        let config = GridConfig::new(3, 3);
        assert_eq!(
            validate(&config, 100),
            Err(ConfigError::OddCellCount { cells: 9 })
        );
    }

    #[test]
    fn validate_rejects_too_few_kinds() {
        let config = GridConfig::new(4, 5);
        assert_eq!(
            validate(&config, 9),
            Err(ConfigError::NotEnoughCardKinds {
                required: 10,
                available: 9
            })
        );
    }

    #[test]
    fn validate_accepts_exact_kind_count() {
        let config = GridConfig::new(4, 5);
        assert!(validate(&config, 10).is_ok());
    }

    #[test]
    fn deck_contains_each_id_exactly_twice() {
        for seed in [1, 42, 9999] {
            let config = GridConfig::new(4, 6);
            let deck = generate_deck(&config, 20, seed).unwrap();
            assert_eq!(deck.len(), 24);

            let mut counts: HashMap<CardId, u32> = HashMap::new();
            for id in &deck {
                *counts.entry(*id).or_insert(0) += 1;
            }
            assert_eq!(counts.len(), 12);
            assert!(counts.values().all(|&n| n == 2));
            assert!(counts.keys().all(|&id| id < 20));
        }
    }

    #[test]
    fn deck_is_deterministic_per_seed() {
        let config = GridConfig::new(2, 4);
        let a = generate_deck(&config, 8, 77).unwrap();
        let b = generate_deck(&config, 8, 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        let config = GridConfig::new(4, 6);
        let a = generate_deck(&config, 20, 1).unwrap();
        let b = generate_deck(&config, 20, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn generate_rejects_invalid_grid() {
        let config = GridConfig::new(3, 5);
        assert!(generate_deck(&config, 100, 1).is_err());
    }
}
