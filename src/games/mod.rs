//! The microgame variants and their catalog.
//!
//! The variant set is closed: five kinds behind the one
//! [`Microgame`](crate::lifecycle::Microgame) interface. The orchestrator
//! never depends on a variant beyond its selection key.

pub mod deplete_heal;
pub mod drag_sort;
pub mod fall_catch;
pub mod threshold_avoid;
pub mod trash_run;

pub use deplete_heal::DepleteHeal;
pub use drag_sort::DragSort;
pub use fall_catch::FallCatch;
pub use threshold_avoid::ThresholdAvoid;
pub use trash_run::TrashRun;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::lifecycle::Microgame;

/// Identifier for a microgame variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Tap spawned litter before it vanishes.
    TrashRun,
    /// Steer a catcher under falling debris, avoid the fish.
    FallCatch,
    /// Drag falling waste into its matching bin.
    DragSort,
    /// Tend a grid of plants before their needs expire.
    DepleteHeal,
    /// Keep switching devices off; survive the countdown.
    ThresholdAvoid,
}

impl GameKind {
    /// All kinds, in pool order.
    pub fn all() -> impl Iterator<Item = GameKind> {
        GAME_POOL.iter().copied()
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameKind::TrashRun => "trash-run",
            GameKind::FallCatch => "fall-catch",
            GameKind::DragSort => "drag-sort",
            GameKind::DepleteHeal => "deplete-heal",
            GameKind::ThresholdAvoid => "threshold-avoid",
        };
        f.write_str(name)
    }
}

/// The fixed rotation pool.
///
/// Named a "sequence" in spirit but consumed as a pool: the next index is
/// drawn uniformly at random after each win, so immediate repeats happen.
pub const GAME_POOL: [GameKind; 5] = [
    GameKind::TrashRun,
    GameKind::FallCatch,
    GameKind::DepleteHeal,
    GameKind::DragSort,
    GameKind::ThresholdAvoid,
];

/// Constructor for a variant instance at a given session level.
pub type GameFactory = fn(level: u32) -> Box<dyn Microgame>;

/// Registry resolving a [`GameKind`] to its implementation.
///
/// A kind missing from the catalog is the load-failure path: the
/// orchestrator surfaces it and halts rather than guessing a fallback.
#[derive(Clone, Default)]
pub struct GameCatalog {
    factories: FxHashMap<GameKind, GameFactory>,
}

impl GameCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with all five standard variants registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(GameKind::TrashRun, |level| Box::new(TrashRun::new(level)));
        catalog.register(GameKind::FallCatch, |level| Box::new(FallCatch::new(level)));
        catalog.register(GameKind::DragSort, |level| Box::new(DragSort::new(level)));
        catalog.register(GameKind::DepleteHeal, |level| Box::new(DepleteHeal::new(level)));
        catalog.register(GameKind::ThresholdAvoid, |level| Box::new(ThresholdAvoid::new(level)));
        catalog
    }

    /// Register a factory for a kind.
    ///
    /// Panics if the kind is already registered.
    pub fn register(&mut self, kind: GameKind, factory: GameFactory) {
        if self.factories.contains_key(&kind) {
            panic!("{} already registered", kind);
        }
        self.factories.insert(kind, factory);
    }

    /// Resolve a kind to its factory.
    #[must_use]
    pub fn get(&self, kind: GameKind) -> Option<GameFactory> {
        self.factories.get(&kind).copied()
    }

    /// Check whether a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: GameKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Shared difficulty ramp: intervals shrink per level down to a floor.
#[must_use]
pub fn spawn_interval(base_ms: u64, per_level_ms: u64, floor_ms: u64, level: u32) -> u64 {
    base_ms
        .saturating_sub(per_level_ms.saturating_mul(u64::from(level)))
        .max(floor_ms)
}
