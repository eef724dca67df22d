//! # micro-arcade
//!
//! A microgame session engine: short skill challenges rotate under a
//! shared controller that tracks lives, score, and level, and persists
//! final results to a leaderboard.
//!
//! ## Design Principles
//!
//! 1. **One lifecycle contract**: Every variant implements [`Microgame`];
//!    the orchestrator depends only on that interface and never on variant
//!    identity beyond the selection key.
//!
//! 2. **Exactly-once resolution**: An instance wins or loses once.
//!    The resolution slot is first-write-wins and a resolved instance
//!    ignores every later trigger.
//!
//! 3. **Deterministic ticks**: The host pumps fixed 16 ms frames; all
//!    timers are millisecond deadlines and all randomness flows from one
//!    seeded, forkable RNG. A session replays identically from its seed.
//!
//! 4. **External collaborators at the seams**: Rendering and score
//!    persistence sit behind the [`Surface`] and [`Leaderboard`] traits;
//!    the engine ships recording/in-memory implementations for tests and
//!    headless hosts.
//!
//! ## Modules
//!
//! - `core`: session state, input events, RNG
//! - `lifecycle`: the microgame contract and its runner
//! - `games`: the five variants and their catalog
//! - `orchestrator`: the session state machine
//! - `surface`: render-surface contract
//! - `leaderboard`: score-store contract

pub mod core;
pub mod games;
pub mod leaderboard;
pub mod lifecycle;
pub mod orchestrator;
pub mod surface;

// Re-export commonly used types
pub use crate::core::{
    BinColor, PlayerInput, SessionRng, SessionState, Tool, LEVEL_STEP, STARTING_LIVES,
};

pub use crate::lifecycle::{
    GameContext, Microgame, MicrogameRunner, Outcome, FRAME_MS, TIME_BUDGET_SECS,
};

pub use crate::games::{
    DepleteHeal, DragSort, FallCatch, GameCatalog, GameFactory, GameKind, ThresholdAvoid,
    TrashRun, GAME_POOL,
};

pub use crate::orchestrator::{
    InvalidNameError, LoadError, Orchestrator, SessionPhase, LEADERBOARD_TOP,
    RESOLUTION_DELAY_MS,
};

pub use crate::surface::{HudState, ListenerId, MemorySurface, Overlay, Surface};

pub use crate::leaderboard::{Leaderboard, LeaderboardError, MemoryLeaderboard, ScoreEntry};
