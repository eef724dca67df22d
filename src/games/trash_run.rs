//! Trash-collection variant: tap spawned litter before it vanishes.
//!
//! Litter pops up at random spots and despawns after 2-3 seconds. Tapping
//! a piece collects it. There is no failure trigger of its own; running
//! out of time is the only way to lose.
//!
//! Coordinates are percent of the region, `[0, 100)` on both axes, origin
//! top-left.

use smallvec::SmallVec;

use super::{spawn_interval, GameKind};
use crate::core::PlayerInput;
use crate::lifecycle::{GameContext, Microgame, Outcome};
use crate::surface::Overlay;

/// Side length of a litter piece, percent of the region.
pub const ITEM_SIZE: f32 = 8.0;

const LIFETIME_MIN_MS: u64 = 2000;
const LIFETIME_MAX_MS: u64 = 3000;

/// One piece of litter on the field.
#[derive(Clone, Copy, Debug)]
pub struct TrashItem {
    pub id: u32,
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    /// Despawn deadline against the instance clock.
    pub expires_at_ms: u64,
}

impl TrashItem {
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + ITEM_SIZE && y >= self.y && y <= self.y + ITEM_SIZE
    }
}

/// The trash-collection microgame.
pub struct TrashRun {
    target: u32,
    spawn_every_ms: u64,
    last_spawn_ms: Option<u64>,
    collected: u32,
    next_id: u32,
    items: SmallVec<[TrashItem; 8]>,
}

impl TrashRun {
    /// Build an instance at the given session level.
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self {
            target: if level >= 3 { 10 } else { 5 },
            spawn_every_ms: spawn_interval(1500, 100, 500, level),
            last_spawn_ms: None,
            collected: 0,
            next_id: 0,
            items: SmallVec::new(),
        }
    }

    /// Pieces collected so far.
    #[must_use]
    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Pieces needed to win.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Live litter on the field.
    #[must_use]
    pub fn items(&self) -> &[TrashItem] {
        &self.items
    }

    fn spawn(&mut self, ctx: &mut GameContext<'_>) {
        let max = 100.0 - ITEM_SIZE;
        let item = TrashItem {
            id: self.next_id,
            x: ctx.rng.gen_unit() * max,
            y: ctx.rng.gen_unit() * max,
            expires_at_ms: ctx.elapsed_ms + ctx.rng.gen_range_u64(LIFETIME_MIN_MS..LIFETIME_MAX_MS),
        };
        self.next_id += 1;
        self.items.push(item);
    }
}

impl Microgame for TrashRun {
    fn kind(&self) -> GameKind {
        GameKind::TrashRun
    }

    fn setup(&mut self, ctx: &mut GameContext<'_>) {
        ctx.surface.show_overlay(Overlay::Briefing { title: "Clean up the city!".to_string() });
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        let due = self
            .last_spawn_ms
            .map_or(true, |last| ctx.elapsed_ms - last > self.spawn_every_ms);
        if due {
            self.spawn(ctx);
            self.last_spawn_ms = Some(ctx.elapsed_ms);
        }

        let now = ctx.elapsed_ms;
        self.items.retain(|item| item.expires_at_ms > now);
    }

    fn input(&mut self, ctx: &mut GameContext<'_>, event: &PlayerInput) {
        let PlayerInput::Tap { x, y } = event else { return };

        if let Some(idx) = self.items.iter().position(|item| item.contains(*x, *y)) {
            self.items.remove(idx);
            self.collected += 1;
            if self.collected >= self.target {
                ctx.finish(Outcome::Win);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionRng;
    use crate::lifecycle::FRAME_MS;
    use crate::surface::MemorySurface;

    fn ctx_parts() -> (SessionRng, MemorySurface, Option<Outcome>) {
        (SessionRng::new(42), MemorySurface::new(), None)
    }

    #[test]
    fn test_targets_scale_at_level_three() {
        assert_eq!(TrashRun::new(1).target(), 5);
        assert_eq!(TrashRun::new(2).target(), 5);
        assert_eq!(TrashRun::new(3).target(), 10);
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        assert_eq!(TrashRun::new(1).spawn_every_ms, 1400);
        assert_eq!(TrashRun::new(20).spawn_every_ms, 500);
    }

    #[test]
    fn test_first_update_spawns_immediately() {
        let (mut rng, mut surface, mut pending) = ctx_parts();
        let mut game = TrashRun::new(1);

        let mut ctx = GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.update(&mut ctx);

        assert_eq!(game.items().len(), 1);
    }

    #[test]
    fn test_items_expire() {
        let (mut rng, mut surface, mut pending) = ctx_parts();
        let mut game = TrashRun::new(1);

        let mut ctx = GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.update(&mut ctx);
        let deadline = game.items()[0].expires_at_ms;

        let mut ctx =
            GameContext::new(1, deadline - 1, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.update(&mut ctx);
        assert!(game.items().iter().any(|i| i.id == 0), "item lives until its deadline");

        let mut ctx =
            GameContext::new(1, deadline, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.update(&mut ctx);
        assert!(game.items().iter().all(|i| i.id != 0), "expired item must be removed");
    }

    #[test]
    fn test_collecting_to_target_wins() {
        let (mut rng, mut surface, mut pending) = ctx_parts();
        let mut game = TrashRun::new(1);

        for round in 0..5u64 {
            let now = FRAME_MS + round;
            let mut ctx =
                GameContext::new(1, now, FRAME_MS, &mut rng, &mut surface, &mut pending);
            if game.items().is_empty() {
                game.spawn(&mut ctx);
            }
            let item = game.items()[0];
            game.input(
                &mut ctx,
                &PlayerInput::Tap { x: item.x + ITEM_SIZE / 2.0, y: item.y + ITEM_SIZE / 2.0 },
            );
        }

        assert_eq!(game.collected(), 5);
        assert_eq!(pending, Some(Outcome::Win));
    }

    #[test]
    fn test_missed_tap_collects_nothing() {
        let (mut rng, mut surface, mut pending) = ctx_parts();
        let mut game = TrashRun::new(1);

        let mut ctx = GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.spawn(&mut ctx);
        let item = game.items()[0];
        game.input(
            &mut ctx,
            &PlayerInput::Tap { x: item.x + ITEM_SIZE + 1.0, y: item.y },
        );

        assert_eq!(game.collected(), 0);
        assert_eq!(game.items().len(), 1);
    }
}
