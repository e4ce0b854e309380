//! Scoring module - turn counters, streak tracking, and the match score formula.
//!
//! Behavior notes:
//! - The streak bonus counts from the second consecutive match, so the n-th
//!   match in a run is worth `base + (n - 1) * (base / 2)`.
//! - The combo streak reported externally is `streak - 1` clamped at zero,
//!   the count of matches beyond the first in the current run. This display
//!   convention is intentional and load-bearing for consumers.

use serde::{Deserialize, Serialize};

/// Points for a successful match given the streak value *after* increment.
/// Integer arithmetic throughout.
pub fn match_score(base: u32, streak: u32) -> u32 {
    let streak_bonus = streak.saturating_sub(1) * (base / 2);
    base + streak_bonus
}

/// The combo streak value shown to the player.
pub fn displayed_streak(streak: u32) -> u32 {
    streak.saturating_sub(1)
}

/// Cumulative score state for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    turns: u32,
    matches: u32,
    streak: u32,
    best_streak: u32,
    score: u32,
    elapsed_ms: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore counters from a save record.
    pub fn restore(turns: u32, matches: u32, streak: u32, score: u32, elapsed_ms: u32) -> Self {
        Self {
            turns,
            matches,
            streak,
            // The save schema does not carry best_streak; seed it from the
            // live streak so the invariant best_streak >= streak holds.
            best_streak: streak,
            score,
            elapsed_ms,
        }
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// A two-card attempt has begun.
    pub fn on_turn_start(&mut self) {
        self.turns += 1;
    }

    /// A successful pair. Returns the points awarded for this match.
    pub fn on_match(&mut self, base_score: u32) -> u32 {
        self.matches += 1;
        self.streak += 1;
        if self.streak > self.best_streak {
            self.best_streak = self.streak;
        }
        let awarded = match_score(base_score, self.streak);
        self.score += awarded;
        awarded
    }

    /// A failed pair resets the run.
    pub fn on_mismatch(&mut self) {
        self.streak = 0;
    }

    pub fn advance_time(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            turns: self.turns,
            matches: self.matches,
            combo_streak: displayed_streak(self.streak),
            score: self.score,
            elapsed_secs: self.elapsed_ms as f32 / 1000.0,
        }
    }
}

/// Published with every score update and at round completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub turns: u32,
    pub matches: u32,
    /// Matches beyond the first in the current run (see module docs)
    pub combo_streak: u32,
    pub score: u32,
    pub elapsed_secs: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_score_progression() {
        // base=100: 1st consecutive match 100, 2nd 150, 3rd 200.
        assert_eq!(match_score(100, 1), 100);
        assert_eq!(match_score(100, 2), 150);
        assert_eq!(match_score(100, 3), 200);
    }

    #[test]
    fn match_score_integer_arithmetic() {
        // Odd base truncates the half-bonus.
        assert_eq!(match_score(25, 2), 25 + 12);
    }

    #[test]
    fn consecutive_matches_accumulate() {
        let mut tracker = ScoreTracker::new();
        tracker.on_turn_start();
        assert_eq!(tracker.on_match(100), 100);
        tracker.on_turn_start();
        assert_eq!(tracker.on_match(100), 150);
        tracker.on_turn_start();
        assert_eq!(tracker.on_match(100), 200);

        assert_eq!(tracker.score(), 450);
        assert_eq!(tracker.turns(), 3);
        assert_eq!(tracker.matches(), 3);
        assert_eq!(tracker.streak(), 3);
        assert_eq!(tracker.best_streak(), 3);
    }

    #[test]
    fn mismatch_resets_streak_not_best() {
        let mut tracker = ScoreTracker::new();
        tracker.on_turn_start();
        tracker.on_match(100);
        tracker.on_turn_start();
        tracker.on_match(100);
        tracker.on_turn_start();
        tracker.on_mismatch();

        assert_eq!(tracker.streak(), 0);
        assert_eq!(tracker.best_streak(), 2);
        assert_eq!(tracker.matches(), 2);
        assert_eq!(tracker.turns(), 3);
        // Score never decreases on mismatch.
        assert_eq!(tracker.score(), 250);
    }

    #[test]
    fn streak_restarts_after_mismatch() {
        let mut tracker = ScoreTracker::new();
        tracker.on_turn_start();
        tracker.on_match(100);
        tracker.on_turn_start();
        tracker.on_mismatch();
        tracker.on_turn_start();
        assert_eq!(tracker.on_match(100), 100);
        assert_eq!(tracker.streak(), 1);
    }

    #[test]
    fn displayed_streak_is_one_behind() {
        assert_eq!(displayed_streak(0), 0);
        assert_eq!(displayed_streak(1), 0);
        assert_eq!(displayed_streak(3), 2);
    }

    #[test]
    fn snapshot_reports_displayed_streak() {
        let mut tracker = ScoreTracker::new();
        tracker.on_turn_start();
        tracker.on_match(100);
        tracker.on_turn_start();
        tracker.on_match(100);

        let snap = tracker.snapshot();
        assert_eq!(snap.combo_streak, 1);
        assert_eq!(snap.matches, 2);
        assert_eq!(snap.score, 250);
    }

    #[test]
    fn restore_seeds_best_streak_from_streak() {
        let tracker = ScoreTracker::restore(5, 4, 2, 550, 30_000);
        assert_eq!(tracker.turns(), 5);
        assert_eq!(tracker.matches(), 4);
        assert_eq!(tracker.streak(), 2);
        assert_eq!(tracker.best_streak(), 2);
        assert_eq!(tracker.score(), 550);
        assert_eq!(tracker.elapsed_ms(), 30_000);
    }

    #[test]
    fn advance_time_accumulates() {
        let mut tracker = ScoreTracker::new();
        tracker.advance_time(16);
        tracker.advance_time(16);
        assert_eq!(tracker.elapsed_ms(), 32);
        assert!((tracker.snapshot().elapsed_secs - 0.032).abs() < f32::EPSILON);
    }
}
