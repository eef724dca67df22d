//! Deplete-and-heal variant: tend a grid of plants before their needs
//! expire.
//!
//! Plants start healthy. On a shrinking interval one of them develops a
//! random need (water, sun, or fertilizer); applying the matching tool
//! within four seconds heals it and scores a point, while an unmet need
//! kills the plant. Three dead plants lose the instance. Using the wrong
//! tool is feedback only, never a penalty.

use super::{spawn_interval, GameKind};
use crate::core::{PlayerInput, Tool};
use crate::lifecycle::{GameContext, Microgame, Outcome};
use crate::surface::Overlay;

/// How long an unmet need takes to kill its plant.
pub const DEATH_MS: u64 = 4000;

/// Dead plants tolerated before the instance is lost.
pub const MAX_DEAD: u32 = 3;

const TOOLS: [Tool; 3] = [Tool::Water, Tool::Sun, Tool::Fertilizer];

/// Life stage of one plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantState {
    Healthy,
    /// Developed a need; dies at the deadline unless the matching tool is
    /// applied.
    Needs { need: Tool, deadline_ms: u64 },
    Dead,
}

/// The deplete-and-heal microgame.
pub struct DepleteHeal {
    target: u32,
    healed: u32,
    dead: u32,
    need_every_ms: u64,
    next_need_at_ms: u64,
    selected: Tool,
    plants: Vec<PlantState>,
}

impl DepleteHeal {
    /// Build an instance at the given session level.
    #[must_use]
    pub fn new(level: u32) -> Self {
        let need_every_ms = spawn_interval(3000, 200, 1000, level);
        Self {
            target: if level >= 3 { 10 } else { 5 },
            healed: 0,
            dead: 0,
            need_every_ms,
            next_need_at_ms: need_every_ms,
            selected: Tool::Water,
            plants: vec![PlantState::Healthy; if level >= 3 { 9 } else { 6 }],
        }
    }

    /// Plants healed so far.
    #[must_use]
    pub fn healed(&self) -> u32 {
        self.healed
    }

    /// Plants lost so far.
    #[must_use]
    pub fn dead(&self) -> u32 {
        self.dead
    }

    /// Heals needed to win.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// The currently selected tool.
    #[must_use]
    pub fn selected_tool(&self) -> Tool {
        self.selected
    }

    /// The plant grid.
    #[must_use]
    pub fn plants(&self) -> &[PlantState] {
        &self.plants
    }

    /// Give a specific plant a specific need. `update` triggers needs
    /// through this with randomized choices.
    pub fn assign_need(&mut self, index: usize, need: Tool, now_ms: u64) {
        if self.plants[index] == PlantState::Healthy {
            self.plants[index] = PlantState::Needs { need, deadline_ms: now_ms + DEATH_MS };
        }
    }
}

impl Microgame for DepleteHeal {
    fn kind(&self) -> GameKind {
        GameKind::DepleteHeal
    }

    fn setup(&mut self, ctx: &mut GameContext<'_>) {
        ctx.surface
            .show_overlay(Overlay::Briefing { title: "Keep the garden alive!".to_string() });
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        while ctx.elapsed_ms >= self.next_need_at_ms {
            self.next_need_at_ms += self.need_every_ms;

            let healthy: Vec<usize> = self
                .plants
                .iter()
                .enumerate()
                .filter(|(_, p)| **p == PlantState::Healthy)
                .map(|(i, _)| i)
                .collect();
            if let Some(&index) = ctx.rng.choose(&healthy) {
                let need = *ctx.rng.choose(&TOOLS).expect("tools are non-empty");
                self.assign_need(index, need, ctx.elapsed_ms);
            }
        }

        for plant in &mut self.plants {
            if let PlantState::Needs { deadline_ms, .. } = *plant {
                if ctx.elapsed_ms >= deadline_ms {
                    *plant = PlantState::Dead;
                    self.dead += 1;
                }
            }
        }
        if self.dead >= MAX_DEAD {
            ctx.finish(Outcome::Loss);
        }
    }

    fn input(&mut self, ctx: &mut GameContext<'_>, event: &PlayerInput) {
        match event {
            PlayerInput::SelectTool(tool) => self.selected = *tool,
            PlayerInput::TapCell(index) => {
                let Some(plant) = self.plants.get_mut(*index) else { return };
                match *plant {
                    PlantState::Needs { need, .. } if need == self.selected => {
                        *plant = PlantState::Healthy;
                        self.healed += 1;
                        if self.healed >= self.target {
                            ctx.finish(Outcome::Win);
                        }
                    }
                    // Wrong tool shakes the plant; no penalty. Healthy and
                    // dead plants ignore taps entirely.
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
