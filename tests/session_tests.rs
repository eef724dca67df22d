//! Session orchestration integration tests.
//!
//! These drive the orchestrator with scripted microgames so resolution
//! order is fully controlled, and property-test the session bookkeeping
//! over arbitrary win/loss sequences.

use proptest::prelude::*;

use micro_arcade::{
    GameCatalog, GameContext, GameKind, MemoryLeaderboard, MemorySurface, Microgame, Orchestrator,
    Outcome, Overlay, SessionPhase, SessionState, LEVEL_STEP, STARTING_LIVES,
};

/// A microgame that resolves with a fixed outcome on its first update.
struct Scripted {
    outcome: Outcome,
}

impl Microgame for Scripted {
    fn kind(&self) -> GameKind {
        GameKind::TrashRun
    }
    fn setup(&mut self, _ctx: &mut GameContext<'_>) {}
    fn update(&mut self, ctx: &mut GameContext<'_>) {
        ctx.finish(self.outcome);
    }
}

fn always_win(_level: u32) -> Box<dyn Microgame> {
    Box::new(Scripted { outcome: Outcome::Win })
}

fn always_lose(_level: u32) -> Box<dyn Microgame> {
    Box::new(Scripted { outcome: Outcome::Loss })
}

fn scripted_catalog(factory: micro_arcade::GameFactory) -> GameCatalog {
    let mut catalog = GameCatalog::new();
    for kind in GameKind::all() {
        catalog.register(kind, factory);
    }
    catalog
}

fn start_session(catalog: GameCatalog, seed: u64) -> (Orchestrator, MemorySurface) {
    let mut orch = Orchestrator::new(catalog, Box::new(MemoryLeaderboard::new()), seed);
    let mut surface = MemorySurface::new();
    orch.init(&mut surface);
    orch.submit_name("Ada", &mut surface).unwrap();
    (orch, surface)
}

const MAX_FRAMES: usize = 100_000;

/// Pump frames until the predicate holds or the frame budget runs out.
fn pump_until(
    orch: &mut Orchestrator,
    surface: &mut MemorySurface,
    mut done: impl FnMut(&Orchestrator) -> bool,
) {
    for _ in 0..MAX_FRAMES {
        if done(orch) {
            return;
        }
        orch.tick(surface, &[]);
    }
    panic!("frame budget exhausted");
}

#[test]
fn test_five_wins_reach_level_two() {
    let (mut orch, mut surface) = start_session(scripted_catalog(always_win), 42);

    pump_until(&mut orch, &mut surface, |o| o.session().score >= 5);

    assert_eq!(orch.session().score, 5);
    assert_eq!(orch.session().level, 2);
    assert_eq!(orch.session().lives, STARTING_LIVES);
    assert!(!orch.session().is_over);
    assert_eq!(
        surface.overlays.iter().filter(|o| **o == Overlay::Success).count(),
        5
    );
}

#[test]
fn test_three_losses_end_the_session() {
    let (mut orch, mut surface) = start_session(scripted_catalog(always_lose), 42);

    pump_until(&mut orch, &mut surface, |o| o.phase() == SessionPhase::GameOver);

    assert_eq!(orch.session().lives, 0);
    assert!(orch.session().is_over);
    assert_eq!(orch.session().score, 0);
    assert!(surface.overlays.contains(&Overlay::GameOver { score: 0 }));
    assert!(surface.controls_shown);

    // Losses keep retrying the same pool slot; the index never moved.
    assert_eq!(orch.session().game_index, 0);

    // Terminal: further ticks change nothing.
    for _ in 0..100 {
        orch.tick(&mut surface, &[]);
    }
    assert_eq!(orch.phase(), SessionPhase::GameOver);
    assert!(orch.active_game().is_none());
}

#[test]
fn test_exactly_one_instance_at_a_time() {
    let (mut orch, mut surface) = start_session(scripted_catalog(always_win), 42);

    let mut seen_active = 0;
    let mut seen_between = 0;
    for _ in 0..2_000 {
        match orch.phase() {
            SessionPhase::MicrogameActive => {
                assert!(orch.active_game().is_some());
                seen_active += 1;
            }
            SessionPhase::Sequencing => {
                // During the overlay delay no instance exists at all.
                assert!(orch.active_game().is_none());
                assert!(orch.is_between_games());
                seen_between += 1;
            }
            _ => {}
        }
        orch.tick(&mut surface, &[]);
    }

    assert!(seen_active > 0);
    assert!(seen_between > 0);
}

#[test]
fn test_win_rerolls_pool_index_within_bounds() {
    let (mut orch, mut surface) = start_session(scripted_catalog(always_win), 7);

    for target in 1..=20u32 {
        pump_until(&mut orch, &mut surface, |o| o.session().score >= target);
        assert!(orch.session().game_index < micro_arcade::GAME_POOL.len());
    }
}

#[test]
fn test_same_seed_replays_the_same_rotation() {
    let mut sequences = Vec::new();
    for _ in 0..2 {
        let (mut orch, mut surface) = start_session(scripted_catalog(always_win), 1234);
        let mut indices = Vec::new();
        for target in 1..=12u32 {
            pump_until(&mut orch, &mut surface, |o| o.session().score >= target);
            indices.push(orch.session().game_index);
        }
        sequences.push(indices);
    }
    assert_eq!(sequences[0], sequences[1]);
}

#[test]
fn test_hud_tracks_every_resolution() {
    let (mut orch, mut surface) = start_session(scripted_catalog(always_lose), 42);

    pump_until(&mut orch, &mut surface, |o| o.phase() == SessionPhase::GameOver);

    let lives_seen: Vec<u32> = surface.hud_history.iter().map(|h| h.lives).collect();
    assert!(lives_seen.windows(2).all(|w| w[1] <= w[0]), "lives only ever drop");
    assert_eq!(surface.hud_history.last().unwrap().lives, 0);
}

proptest! {
    /// Over any win/loss script: lives never underflow, the level tracks
    /// the score exactly, and the session ends on the first frame lives
    /// reach zero.
    #[test]
    fn prop_session_bookkeeping(outcomes in proptest::collection::vec(any::<bool>(), 0..200)) {
        let mut state = SessionState::new("prop");
        let mut losses = 0u32;

        for &win in &outcomes {
            if state.is_over {
                break;
            }
            if win {
                state.record_win();
            } else {
                losses += 1;
                if state.record_loss() {
                    state.is_over = true;
                }
            }

            prop_assert!(state.lives <= STARTING_LIVES);
            prop_assert_eq!(state.level, 1 + state.score / LEVEL_STEP);
            prop_assert_eq!(state.lives, STARTING_LIVES - losses.min(STARTING_LIVES));
            prop_assert_eq!(state.is_over, state.lives == 0 && losses > 0);
        }
    }

    /// Reset restores initial values from any reachable state.
    #[test]
    fn prop_reset_restores_initial_values(wins in 0u32..50, losses in 0u32..3, index in 0usize..5) {
        let mut state = SessionState::new("prop");
        for _ in 0..wins {
            state.record_win();
        }
        for _ in 0..losses {
            state.record_loss();
        }
        state.game_index = index;

        state.reset();

        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.lives, STARTING_LIVES);
        prop_assert_eq!(state.level, 1);
        prop_assert_eq!(state.game_index, 0);
        prop_assert!(!state.is_over);
    }
}
