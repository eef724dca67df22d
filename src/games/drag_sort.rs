//! Drag-sort variant: drag falling waste into its matching bin.
//!
//! Waste pieces drop slowly from the top of the region. Each belongs in
//! exactly one bin: paper in blue, glass in green, plastic in yellow.
//! Dropping a piece in the wrong bin is an error; so is letting it reach
//! the bin row unsorted. Five sorted pieces win, three errors lose.
//!
//! This variant keeps the region in its original pixel units: 800 wide,
//! 600 tall, with the bin row occupying the bottom 150.

use smallvec::SmallVec;

use super::{spawn_interval, GameKind};
use crate::core::{BinColor, PlayerInput};
use crate::lifecycle::{GameContext, Microgame, Outcome};
use crate::surface::Overlay;

/// Region width in variant units.
pub const REGION_W: f32 = 800.0;

/// Region height in variant units.
pub const REGION_H: f32 = 600.0;

/// Height of the bin row; a piece crossing into it unsorted is a miss.
pub const MISS_LINE: f32 = REGION_H - 150.0;

/// Errors tolerated before the instance is lost.
pub const MAX_ERRORS: u32 = 3;

const TARGET: u32 = 5;
const SPAWN_PADDING: f32 = 60.0;
const FALL_STEP_MS: f32 = 50.0;

/// What a waste piece is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WasteKind {
    Paper,
    Glass,
    Plastic,
}

impl WasteKind {
    /// The bin this kind belongs in.
    #[must_use]
    pub fn bin(self) -> BinColor {
        match self {
            WasteKind::Paper => BinColor::Blue,
            WasteKind::Glass => BinColor::Green,
            WasteKind::Plastic => BinColor::Yellow,
        }
    }
}

const KINDS: [WasteKind; 3] = [WasteKind::Paper, WasteKind::Glass, WasteKind::Plastic];

/// One falling waste piece.
#[derive(Clone, Copy, Debug)]
pub struct WasteItem {
    pub id: u32,
    pub kind: WasteKind,
    pub x: f32,
    pub y: f32,
}

/// The drag-sort microgame.
pub struct DragSort {
    sorted: u32,
    errors: u32,
    spawn_every_ms: u64,
    next_spawn_at_ms: u64,
    /// Units per 50 ms, grows with level.
    fall_speed: f32,
    next_id: u32,
    items: SmallVec<[WasteItem; 8]>,
}

impl DragSort {
    /// Build an instance at the given session level.
    #[must_use]
    pub fn new(level: u32) -> Self {
        let spawn_every_ms = spawn_interval(2500, 200, 1000, level);
        Self {
            sorted: 0,
            errors: 0,
            spawn_every_ms,
            next_spawn_at_ms: spawn_every_ms,
            fall_speed: 1.0 + level as f32 * 0.5,
            next_id: 0,
            items: SmallVec::new(),
        }
    }

    /// Pieces sorted correctly so far.
    #[must_use]
    pub fn sorted(&self) -> u32 {
        self.sorted
    }

    /// Errors accumulated so far (wrong bins and misses alike).
    #[must_use]
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Pieces currently falling.
    #[must_use]
    pub fn items(&self) -> &[WasteItem] {
        &self.items
    }

    /// Drop a specific piece from the top. `update` spawns through this
    /// with randomized parameters.
    pub fn spawn(&mut self, kind: WasteKind, x: f32) -> u32 {
        let id = self.next_id;
        self.items.push(WasteItem { id, kind, x, y: 0.0 });
        self.next_id += 1;
        id
    }

    fn record_error(&mut self, ctx: &mut GameContext<'_>) {
        self.errors += 1;
        if self.errors >= MAX_ERRORS {
            ctx.finish(Outcome::Loss);
        }
    }
}

impl Microgame for DragSort {
    fn kind(&self) -> GameKind {
        GameKind::DragSort
    }

    fn setup(&mut self, ctx: &mut GameContext<'_>) {
        ctx.surface
            .show_overlay(Overlay::Briefing { title: "Sort the recycling!".to_string() });
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        while ctx.elapsed_ms >= self.next_spawn_at_ms {
            self.next_spawn_at_ms += self.spawn_every_ms;
            let kind = *ctx.rng.choose(&KINDS).expect("kinds are non-empty");
            let x = SPAWN_PADDING + ctx.rng.gen_unit() * (REGION_W - SPAWN_PADDING * 2.0);
            self.spawn(kind, x);
        }

        let step = self.fall_speed * ctx.frame_ms as f32 / FALL_STEP_MS;
        let mut i = 0;
        while i < self.items.len() {
            self.items[i].y += step;
            if self.items[i].y > MISS_LINE {
                self.items.remove(i);
                self.record_error(ctx);
                if ctx.is_finished() {
                    return;
                }
            } else {
                i += 1;
            }
        }
    }

    fn input(&mut self, ctx: &mut GameContext<'_>, event: &PlayerInput) {
        let PlayerInput::Drop { item, bin } = event else { return };

        // A piece that already missed (or was never spawned) is gone;
        // ignore the stale drop.
        let Some(idx) = self.items.iter().position(|w| w.id == *item) else { return };
        let piece = self.items.remove(idx);

        if piece.kind.bin() == *bin {
            self.sorted += 1;
            if self.sorted >= TARGET {
                ctx.finish(Outcome::Win);
            }
        } else {
            self.record_error(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionRng;
    use crate::lifecycle::FRAME_MS;
    use crate::surface::MemorySurface;

    fn quiet_game() -> DragSort {
        let mut game = DragSort::new(1);
        game.next_spawn_at_ms = u64::MAX;
        game
    }

    #[test]
    fn test_fall_speed_and_interval_scale_with_level() {
        assert_eq!(DragSort::new(1).spawn_every_ms, 2300);
        assert_eq!(DragSort::new(10).spawn_every_ms, 1000);
        assert!(DragSort::new(4).fall_speed > DragSort::new(1).fall_speed);
    }

    #[test]
    fn test_correct_drops_win() {
        let mut rng = SessionRng::new(1);
        let mut surface = MemorySurface::new();
        let mut pending = None;
        let mut game = quiet_game();

        for _ in 0..TARGET {
            let id = game.spawn(WasteKind::Glass, 100.0);
            let mut ctx =
                GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
            game.input(&mut ctx, &PlayerInput::Drop { item: id, bin: BinColor::Green });
        }

        assert_eq!(game.sorted(), TARGET);
        assert_eq!(pending, Some(Outcome::Win));
    }

    #[test]
    fn test_three_wrong_bins_lose() {
        let mut rng = SessionRng::new(1);
        let mut surface = MemorySurface::new();
        let mut pending = None;
        let mut game = quiet_game();

        for _ in 0..MAX_ERRORS {
            let id = game.spawn(WasteKind::Paper, 100.0);
            let mut ctx =
                GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
            game.input(&mut ctx, &PlayerInput::Drop { item: id, bin: BinColor::Yellow });
        }

        assert_eq!(game.errors(), MAX_ERRORS);
        assert_eq!(pending, Some(Outcome::Loss));
    }

    #[test]
    fn test_missed_pieces_count_as_errors() {
        let mut rng = SessionRng::new(1);
        let mut surface = MemorySurface::new();
        let mut pending = None;
        let mut game = quiet_game();

        game.spawn(WasteKind::Plastic, 100.0);

        let mut elapsed = FRAME_MS;
        while game.errors() == 0 {
            let mut ctx =
                GameContext::new(1, elapsed, FRAME_MS, &mut rng, &mut surface, &mut pending);
            game.update(&mut ctx);
            elapsed += FRAME_MS;
        }

        assert_eq!(game.errors(), 1);
        assert!(game.items().is_empty());
        assert_eq!(pending, None, "one miss is not yet a loss");
    }

    #[test]
    fn test_stale_drop_is_ignored() {
        let mut rng = SessionRng::new(1);
        let mut surface = MemorySurface::new();
        let mut pending = None;
        let mut game = quiet_game();

        let mut ctx =
            GameContext::new(1, FRAME_MS, FRAME_MS, &mut rng, &mut surface, &mut pending);
        game.input(&mut ctx, &PlayerInput::Drop { item: 99, bin: BinColor::Blue });

        assert_eq!(game.sorted(), 0);
        assert_eq!(game.errors(), 0);
    }

    #[test]
    fn test_bin_mapping() {
        assert_eq!(WasteKind::Paper.bin(), BinColor::Blue);
        assert_eq!(WasteKind::Glass.bin(), BinColor::Green);
        assert_eq!(WasteKind::Plastic.bin(), BinColor::Yellow);
    }
}
