//! Falling-catch variant: steer a catcher under sinking litter.
//!
//! Items drift down from the top of the region; 70% are litter worth a
//! point, the other 30% are fish. Catching the target amount of
//! litter wins; hooking three fish loses. The catcher follows a
//! region-level pointer subscription, which is why this variant carries a
//! listener handle that cleanup must release.
//!
//! Coordinates are percent of the region, `[0, 100)` on both axes; items
//! enter at y = -10 and leave at y > 100.

use smallvec::SmallVec;

use super::{spawn_interval, GameKind};
use crate::core::PlayerInput;
use crate::lifecycle::{GameContext, Microgame, Outcome};
use crate::surface::{ListenerId, Overlay, Surface};

/// Width of the catcher, percent of the region.
pub const CATCHER_WIDTH: f32 = 10.0;

/// Vertical band where the catcher can take an item.
pub const CATCH_BAND: (f32, f32) = (85.0, 95.0);

/// Fish hooked before the instance is lost.
pub const MAX_FISH: u32 = 3;

const TRASH_PROBABILITY: f64 = 0.7;

/// What a falling item turns out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchKind {
    Trash,
    Fish,
}

/// One item drifting down the region.
#[derive(Clone, Copy, Debug)]
pub struct FallingItem {
    pub id: u32,
    pub kind: CatchKind,
    pub x: f32,
    pub y: f32,
    /// Percent per frame.
    pub speed: f32,
}

/// The falling-catch microgame.
pub struct FallCatch {
    target: u32,
    spawn_every_ms: u64,
    last_spawn_ms: Option<u64>,
    caught: u32,
    fish_caught: u32,
    catcher_x: f32,
    level: u32,
    next_id: u32,
    items: SmallVec<[FallingItem; 8]>,
    listener: Option<ListenerId>,
}

impl FallCatch {
    /// Build an instance at the given session level.
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self {
            target: if level >= 3 { 10 } else { 5 },
            spawn_every_ms: spawn_interval(1500, 100, 500, level),
            last_spawn_ms: None,
            caught: 0,
            fish_caught: 0,
            catcher_x: 50.0,
            level,
            next_id: 0,
            items: SmallVec::new(),
            listener: None,
        }
    }

    /// Litter caught so far.
    #[must_use]
    pub fn caught(&self) -> u32 {
        self.caught
    }

    /// Fish hooked so far.
    #[must_use]
    pub fn fish_caught(&self) -> u32 {
        self.fish_caught
    }

    /// Litter needed to win.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Current catcher center.
    #[must_use]
    pub fn catcher_x(&self) -> f32 {
        self.catcher_x
    }

    /// Items currently in the region.
    #[must_use]
    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    /// Drop a specific item into the region. `update` spawns through this
    /// with randomized parameters.
    pub fn spawn(&mut self, kind: CatchKind, x: f32, speed: f32) {
        self.items.push(FallingItem { id: self.next_id, kind, x, y: -10.0, speed });
        self.next_id += 1;
    }

    fn in_catch_band(&self, item: &FallingItem) -> bool {
        let half = CATCHER_WIDTH / 2.0;
        item.y > CATCH_BAND.0
            && item.y < CATCH_BAND.1
            && item.x >= self.catcher_x - half
            && item.x <= self.catcher_x + half
    }
}

impl Microgame for FallCatch {
    fn kind(&self) -> GameKind {
        GameKind::FallCatch
    }

    fn setup(&mut self, ctx: &mut GameContext<'_>) {
        ctx.surface
            .show_overlay(Overlay::Briefing { title: "Catch the sinking litter!".to_string() });
        self.listener = Some(ctx.surface.listen_pointer());
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        let due = self
            .last_spawn_ms
            .map_or(true, |last| ctx.elapsed_ms - last > self.spawn_every_ms);
        if due {
            let kind = if ctx.rng.gen_bool(TRASH_PROBABILITY) {
                CatchKind::Trash
            } else {
                CatchKind::Fish
            };
            let x = 5.0 + ctx.rng.gen_unit() * 90.0;
            let speed = 0.5 + ctx.rng.gen_unit() * 0.5 + self.level as f32 * 0.1;
            self.spawn(kind, x, speed);
            self.last_spawn_ms = Some(ctx.elapsed_ms);
        }

        let mut i = 0;
        while i < self.items.len() {
            self.items[i].y += self.items[i].speed;
            let item = self.items[i];

            if self.in_catch_band(&item) {
                self.items.remove(i);
                match item.kind {
                    CatchKind::Trash => {
                        self.caught += 1;
                        if self.caught >= self.target {
                            ctx.finish(Outcome::Win);
                            return;
                        }
                    }
                    CatchKind::Fish => {
                        self.fish_caught += 1;
                        if self.fish_caught >= MAX_FISH {
                            ctx.finish(Outcome::Loss);
                            return;
                        }
                    }
                }
            } else if item.y > 100.0 {
                self.items.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn input(&mut self, _ctx: &mut GameContext<'_>, event: &PlayerInput) {
        if let PlayerInput::PointerMove { x } = event {
            self.catcher_x = x.clamp(0.0, 100.0);
        }
    }

    fn cleanup(&mut self, surface: &mut dyn Surface) {
        if let Some(id) = self.listener.take() {
            surface.remove_listener(id);
        }
    }
}
