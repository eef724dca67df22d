//! Cross-game session state: score, lives, level, player identity.
//!
//! Owned exclusively by the orchestrator and alive for the whole play
//! session. Microgame instances never touch it directly; they report an
//! outcome and the orchestrator applies the bookkeeping here.
//!
//! ## Mutation rules
//!
//! - `score` only grows, and only on a win.
//! - `lives` only shrinks, and only on a loss.
//! - `level` rises by one each time `score` reaches a positive multiple
//!   of [`LEVEL_STEP`]; it never falls within a session.
//! - `reset` restores everything except the player name.

use serde::{Deserialize, Serialize};

use crate::surface::HudState;

/// Lives granted at session start.
pub const STARTING_LIVES: u32 = 3;

/// Points of score per level step.
pub const LEVEL_STEP: u32 = 5;

/// Session-wide state shared across microgame instances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Total points earned this session (one per microgame won).
    pub score: u32,
    /// Remaining lives; the session ends when this reaches 0.
    pub lives: u32,
    /// Difficulty level, starts at 1 and never decreases.
    pub level: u32,
    /// Captured once at session start; immutable thereafter.
    pub player_name: String,
    /// Index into the fixed microgame pool.
    pub game_index: usize,
    /// Terminal flag; no further microgames load once set.
    pub is_over: bool,
}

impl SessionState {
    /// Create session state for the named player, at initial values.
    #[must_use]
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            player_name: player_name.into(),
            game_index: 0,
            is_over: false,
        }
    }

    /// Restore initial values regardless of prior state.
    ///
    /// The player name is kept; it belongs to the player, not the run.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.game_index = 0;
        self.is_over = false;
    }

    /// Apply a win resolution: one point, level-up on every
    /// [`LEVEL_STEP`]th point.
    ///
    /// Returns true when the win crossed a level boundary.
    pub fn record_win(&mut self) -> bool {
        self.score += 1;
        if self.score % LEVEL_STEP == 0 {
            self.level += 1;
            true
        } else {
            false
        }
    }

    /// Apply a loss resolution: one life down.
    ///
    /// Returns true when lives are exhausted and the session must end.
    pub fn record_loss(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Snapshot the displayable lives/score/level triple.
    #[must_use]
    pub fn hud(&self) -> HudState {
        HudState {
            lives: self.lives,
            score: self.score,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let state = SessionState::new("Ada");

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.player_name, "Ada");
        assert_eq!(state.game_index, 0);
        assert!(!state.is_over);
    }

    #[test]
    fn test_level_up_every_fifth_point() {
        let mut state = SessionState::new("Ada");

        for i in 1..=4 {
            assert!(!state.record_win(), "win {} should not level up", i);
            assert_eq!(state.level, 1);
        }

        assert!(state.record_win());
        assert_eq!(state.score, 5);
        assert_eq!(state.level, 2);

        for _ in 6..=9 {
            assert!(!state.record_win());
        }
        assert!(state.record_win());
        assert_eq!(state.score, 10);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_losses_exhaust_lives() {
        let mut state = SessionState::new("Ada");

        assert!(!state.record_loss());
        assert!(!state.record_loss());
        assert!(state.record_loss());
        assert_eq!(state.lives, 0);

        // Saturates rather than underflowing.
        assert!(state.record_loss());
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_losses_never_touch_score_or_level() {
        let mut state = SessionState::new("Ada");
        state.record_win();
        state.record_loss();

        assert_eq!(state.score, 1);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = SessionState::new("Ada");
        for _ in 0..7 {
            state.record_win();
        }
        state.record_loss();
        state.game_index = 3;
        state.is_over = true;

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.game_index, 0);
        assert!(!state.is_over);
        assert_eq!(state.player_name, "Ada");
    }

    #[test]
    fn test_hud_snapshot() {
        let mut state = SessionState::new("Ada");
        state.record_win();
        state.record_loss();

        let hud = state.hud();
        assert_eq!(hud.score, 1);
        assert_eq!(hud.lives, STARTING_LIVES - 1);
        assert_eq!(hud.level, 1);
    }
}
