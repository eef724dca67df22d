//! Threshold-avoidance variant: keep devices switched off and survive.
//!
//! Nine devices flip themselves on at a shrinking interval; tapping one
//! switches it back off. Three devices on at the same instant lose the
//! instance on the spot. This is the inverted-polarity variant: the
//! countdown running out is the win condition.

use super::{spawn_interval, GameKind};
use crate::core::PlayerInput;
use crate::lifecycle::{GameContext, Microgame, Outcome};
use crate::surface::Overlay;

/// Devices on the grid.
pub const DEVICE_COUNT: usize = 9;

/// Concurrent active devices that lose the instance.
pub const MAX_ACTIVE: usize = 3;

/// What kind of appliance a device shows while on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Light,
    Tv,
    Router,
}

const KINDS: [DeviceKind; 3] = [DeviceKind::Light, DeviceKind::Tv, DeviceKind::Router];

/// The threshold-avoidance microgame.
pub struct ThresholdAvoid {
    activate_every_ms: u64,
    next_activate_at_ms: u64,
    /// `Some(kind)` while on, `None` while off.
    devices: Vec<Option<DeviceKind>>,
    switched_off: u32,
}

impl ThresholdAvoid {
    /// Build an instance at the given session level.
    #[must_use]
    pub fn new(level: u32) -> Self {
        let activate_every_ms = spawn_interval(2000, 200, 500, level);
        Self {
            activate_every_ms,
            next_activate_at_ms: activate_every_ms,
            devices: vec![None; DEVICE_COUNT],
            switched_off: 0,
        }
    }

    /// Devices currently on.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.devices.iter().filter(|d| d.is_some()).count()
    }

    /// Times the player switched a device off.
    #[must_use]
    pub fn switched_off(&self) -> u32 {
        self.switched_off
    }

    /// The device grid.
    #[must_use]
    pub fn devices(&self) -> &[Option<DeviceKind>] {
        &self.devices
    }

    /// Turn a specific device on. `update` activates through this with
    /// randomized choices.
    pub fn activate(&mut self, index: usize, kind: DeviceKind) {
        if self.devices[index].is_none() {
            self.devices[index] = Some(kind);
        }
    }
}

impl Microgame for ThresholdAvoid {
    fn kind(&self) -> GameKind {
        GameKind::ThresholdAvoid
    }

    fn setup(&mut self, ctx: &mut GameContext<'_>) {
        ctx.surface
            .show_overlay(Overlay::Briefing { title: "Save the power!".to_string() });
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        while ctx.elapsed_ms >= self.next_activate_at_ms {
            self.next_activate_at_ms += self.activate_every_ms;

            let off: Vec<usize> = self
                .devices
                .iter()
                .enumerate()
                .filter(|(_, d)| d.is_none())
                .map(|(i, _)| i)
                .collect();
            if let Some(&index) = ctx.rng.choose(&off) {
                let kind = *ctx.rng.choose(&KINDS).expect("kinds are non-empty");
                self.activate(index, kind);
            }
        }

        // Reaching the threshold ends the instance immediately; there is
        // no grace period.
        if self.active_count() >= MAX_ACTIVE {
            ctx.finish(Outcome::Loss);
        }
    }

    fn input(&mut self, _ctx: &mut GameContext<'_>, event: &PlayerInput) {
        let PlayerInput::TapCell(index) = event else { return };
        let Some(device) = self.devices.get_mut(*index) else { return };
        if device.take().is_some() {
            self.switched_off += 1;
        }
    }

    fn on_timeout(&self) -> Outcome {
        Outcome::Win
    }
}
