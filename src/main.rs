//! Headless demo: deals a grid, plays it to completion with a perfect-memory
//! solver, and prints the events the engine publishes along the way.

use anyhow::{anyhow, Result};

use match_pairs::persistence::SaveStore;
use match_pairs::runtime::RoundRuntime;
use match_pairs::types::{
    GameCommand, GridConfig, CARD_FLIP_MS, MISMATCH_SETTLE_MS, ROUND_COMPLETE_DELAY_MS,
};
use match_pairs::GameEvent;

const CARD_KINDS: u32 = 32;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed: u32 = match args.first() {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow!("invalid seed value: {}", raw))?,
        None => 1,
    };

    let save_dir = std::env::temp_dir().join("match-pairs-demo");
    let mut runtime = RoundRuntime::new(SaveStore::new(save_dir), CARD_KINDS);
    let events = runtime.subscribe();

    let config = GridConfig::new(2, 3);
    runtime.apply_command(GameCommand::StartLevel { config, seed })?;
    println!("dealt {}x{} grid (seed {})", config.rows, config.cols, seed);

    // The solver sees every card id, so it pairs cards in index order.
    while !runtime.coordinator().is_completed() {
        if runtime.coordinator().matched_count() < runtime.coordinator().cards().len() {
            let (a, b) = next_pair(&runtime)?;
            runtime.tick(CARD_FLIP_MS);
            runtime.apply_command(GameCommand::CardSelected(a))?;
            runtime.tick(CARD_FLIP_MS);
            runtime.apply_command(GameCommand::CardSelected(b))?;
            runtime.tick(MISMATCH_SETTLE_MS);
        } else {
            runtime.tick(ROUND_COMPLETE_DELAY_MS);
        }
    }

    while let Ok(event) = events.try_recv() {
        match event {
            GameEvent::ScoreUpdated(s) => println!(
                "score update: turns={} matches={} combo={} score={}",
                s.turns, s.matches, s.combo_streak, s.score
            ),
            GameEvent::RoundComplete(s) => println!(
                "round complete: score={} in {} turns ({:.1}s)",
                s.score, s.turns, s.elapsed_secs
            ),
            GameEvent::Cleanup => println!("cleanup"),
        }
    }

    runtime.apply_command(GameCommand::Cleanup)?;
    Ok(())
}

fn next_pair(runtime: &RoundRuntime) -> Result<(usize, usize)> {
    let cards = runtime.coordinator().cards();
    for i in 0..cards.len() {
        if cards[i].is_matched() {
            continue;
        }
        for j in (i + 1)..cards.len() {
            if !cards[j].is_matched() && cards[i].id() == cards[j].id() {
                return Ok((i, j));
            }
        }
    }
    Err(anyhow!("no open pair left on an unfinished grid"))
}
