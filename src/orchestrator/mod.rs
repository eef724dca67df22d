//! Session orchestrator: sequences microgames over the shared session
//! state.
//!
//! ## State machine
//!
//! `Idle → NameEntry → Sequencing → MicrogameActive → Sequencing | GameOver`
//!
//! `GameOver` is terminal. `Sequencing` covers both the instant before a
//! load and the fixed one-second overlay delay between games; during the
//! delay no instance exists, so two instances can never overlap and a new
//! one never starts before the previous cleanup has completed.
//!
//! ## Resolution bookkeeping
//!
//! The orchestrator is the only writer of session state: a win bumps the
//! score (and the level on every fifth point) and re-rolls the pool index
//! uniformly at random, so immediate repeats are possible by design; a loss
//! burns a life and retries the same pool index. Lives hitting zero ends
//! the session with exactly one leaderboard submission and one fetch.
//!
//! ## Failure posture
//!
//! A variant missing from the catalog is fatal: the player gets a blocking
//! alert and the orchestrator halts rather than guessing a fallback.
//! Leaderboard failures degrade the game-over screen without blocking it.

use crate::core::{PlayerInput, SessionRng, SessionState};
use crate::games::{GameCatalog, GameKind, GAME_POOL};
use crate::leaderboard::Leaderboard;
use crate::lifecycle::{MicrogameRunner, Outcome, FRAME_MS};
use crate::surface::{Overlay, Surface};

/// Delay between a resolution overlay and the next load.
pub const RESOLUTION_DELAY_MS: u64 = 1000;

/// Entries shown on the game-over leaderboard panel.
pub const LEADERBOARD_TOP: usize = 3;

const DEFAULT_PLAYER_NAME: &str = "Player";

/// Orchestrator state machine phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing running; awaiting `init`.
    Idle,
    /// Start screen up, blocking on a valid player name.
    NameEntry,
    /// Between microgames: about to load, or inside the overlay delay.
    Sequencing,
    /// One instance is running.
    MicrogameActive,
    /// Lives exhausted; terminal.
    GameOver,
}

/// A selected microgame variant could not be resolved to an
/// implementation. Fatal to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub kind: GameKind,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load microgame {}", self.kind)
    }
}

impl std::error::Error for LoadError {}

/// Rejected player name at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidNameError;

impl std::fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("player name must not be empty")
    }
}

impl std::error::Error for InvalidNameError {}

/// Owns the cross-game state and drives one microgame at a time.
pub struct Orchestrator {
    catalog: GameCatalog,
    leaderboard: Box<dyn Leaderboard>,
    session: SessionState,
    phase: SessionPhase,
    rng: SessionRng,
    runner: Option<MicrogameRunner>,
    /// Remaining overlay delay before the next load.
    pending_load_ms: Option<u64>,
    halted: Option<LoadError>,
}

impl Orchestrator {
    /// Create an orchestrator over a catalog and a leaderboard client.
    #[must_use]
    pub fn new(catalog: GameCatalog, leaderboard: Box<dyn Leaderboard>, seed: u64) -> Self {
        Self {
            catalog,
            leaderboard,
            session: SessionState::new(DEFAULT_PLAYER_NAME),
            phase: SessionPhase::Idle,
            rng: SessionRng::new(seed),
            runner: None,
            pending_load_ms: None,
            halted: None,
        }
    }

    /// Present the start screen and block on name entry.
    pub fn init(&mut self, surface: &mut dyn Surface) {
        self.phase = SessionPhase::NameEntry;
        surface.clear();
        surface.show_overlay(Overlay::Start);
    }

    /// Submit the player name. An empty (after trimming) name is rejected
    /// with an inline prompt and the session does not start; otherwise all
    /// session state resets and the first microgame loads.
    pub fn submit_name(
        &mut self,
        name: &str,
        surface: &mut dyn Surface,
    ) -> Result<(), InvalidNameError> {
        if self.phase != SessionPhase::NameEntry {
            return Ok(());
        }

        let trimmed = name.trim();
        if trimmed.is_empty() {
            surface.alert("Please enter a name.");
            return Err(InvalidNameError);
        }

        self.session.player_name = trimmed.to_string();
        self.session.reset();
        self.phase = SessionPhase::Sequencing;
        log::info!("session started for {}", self.session.player_name);

        surface.clear();
        surface.set_hud(self.session.hud());
        self.load_next_microgame(surface);
        Ok(())
    }

    /// Advance one frame: run the overlay delay or the active instance.
    ///
    /// A halted orchestrator (load failure) ignores ticks.
    pub fn tick(&mut self, surface: &mut dyn Surface, inputs: &[PlayerInput]) {
        if self.halted.is_some() {
            return;
        }

        match self.phase {
            SessionPhase::Sequencing => {
                if let Some(remaining) = self.pending_load_ms {
                    if remaining <= FRAME_MS {
                        self.pending_load_ms = None;
                        self.load_next_microgame(surface);
                    } else {
                        self.pending_load_ms = Some(remaining - FRAME_MS);
                    }
                }
            }
            SessionPhase::MicrogameActive => {
                let outcome = self.runner.as_mut().and_then(|r| r.tick(surface, inputs));
                if let Some(outcome) = outcome {
                    self.handle_resolution(outcome, surface);
                }
            }
            SessionPhase::Idle | SessionPhase::NameEntry | SessionPhase::GameOver => {}
        }
    }

    fn load_next_microgame(&mut self, surface: &mut dyn Surface) {
        if self.session.lives == 0 {
            self.trigger_game_over(surface);
            return;
        }

        let kind = GAME_POOL[self.session.game_index];
        let Some(factory) = self.catalog.get(kind) else {
            let error = LoadError { kind };
            log::error!("{}", error);
            surface.alert(&format!("Error loading microgame: {}", kind));
            self.halted = Some(error);
            return;
        };

        surface.clear();
        surface.set_hud(self.session.hud());

        let game = factory(self.session.level);
        let instance_rng = self.rng.fork();
        self.runner =
            Some(MicrogameRunner::start(game, self.session.level, instance_rng, surface));
        self.phase = SessionPhase::MicrogameActive;
    }

    fn handle_resolution(&mut self, outcome: Outcome, surface: &mut dyn Surface) {
        // The runner already ran the instance's cleanup; discard it so
        // exactly zero instances exist during the overlay delay.
        self.runner = None;

        match outcome {
            Outcome::Win => {
                let leveled_up = self.session.record_win();
                if leveled_up {
                    log::info!("level up: {}", self.session.level);
                }
                self.session.game_index = self.rng.gen_range_usize(0..GAME_POOL.len());
                surface.set_hud(self.session.hud());
                surface.show_overlay(Overlay::Success);
            }
            Outcome::Loss => {
                self.session.record_loss();
                surface.set_hud(self.session.hud());
                surface.show_overlay(Overlay::Failure);
            }
        }

        self.phase = SessionPhase::Sequencing;
        self.pending_load_ms = Some(RESOLUTION_DELAY_MS);
    }

    fn trigger_game_over(&mut self, surface: &mut dyn Surface) {
        self.phase = SessionPhase::GameOver;
        self.session.is_over = true;
        log::info!(
            "game over: {} scored {} (level {})",
            self.session.player_name,
            self.session.score,
            self.session.level
        );

        surface.show_overlay(Overlay::GameOver { score: self.session.score });
        surface.set_status("Saving score...");

        let submitted = self.leaderboard.submit_score(
            &self.session.player_name,
            self.session.score,
            self.session.level,
        );
        match submitted {
            Ok(()) => {
                surface.set_status("Score saved!");
                match self.leaderboard.fetch_leaderboard() {
                    Ok(mut entries) => {
                        entries.truncate(LEADERBOARD_TOP);
                        surface.show_overlay(Overlay::Leaderboard { entries });
                    }
                    Err(error) => {
                        log::warn!("leaderboard fetch failed: {}", error);
                        surface.set_status("Could not load the leaderboard.");
                    }
                }
            }
            Err(error) => {
                log::warn!("score submission failed: {}", error);
                surface.set_status("Could not save the score.");
            }
        }

        surface.show_controls();
    }

    /// Full reset back to the start screen.
    pub fn restart(&mut self, surface: &mut dyn Surface) {
        self.session.reset();
        self.runner = None;
        self.pending_load_ms = None;
        self.halted = None;
        self.init(surface);
    }

    /// Leave the game entirely.
    pub fn exit(&mut self, surface: &mut dyn Surface) {
        self.runner = None;
        self.pending_load_ms = None;
        self.phase = SessionPhase::Idle;
        surface.clear();
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The load failure that halted the orchestrator, if any.
    #[must_use]
    pub fn fault(&self) -> Option<LoadError> {
        self.halted
    }

    /// The variant currently running, if any.
    #[must_use]
    pub fn active_game(&self) -> Option<GameKind> {
        self.runner.as_ref().filter(|r| r.is_active()).map(MicrogameRunner::kind)
    }

    /// Whether the orchestrator is inside the post-resolution delay.
    #[must_use]
    pub fn is_between_games(&self) -> bool {
        self.pending_load_ms.is_some()
    }
}
