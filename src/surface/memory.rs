//! Recording surface for tests and headless hosts.

use rustc_hash::FxHashSet;

use super::{HudState, ListenerId, Overlay, Surface};

/// A [`Surface`] that records every operation instead of rendering.
///
/// Tests use it to assert overlay sequencing, HUD repaints, and that no
/// pointer listener outlives its instance.
#[derive(Debug, Default)]
pub struct MemorySurface {
    /// Every overlay shown, in order.
    pub overlays: Vec<Overlay>,
    /// Every HUD repaint, in order.
    pub hud_history: Vec<HudState>,
    /// Every countdown repaint, in order.
    pub timer_history: Vec<u32>,
    /// Inline status lines, in order.
    pub statuses: Vec<String>,
    /// Blocking notices, in order.
    pub alerts: Vec<String>,
    /// How many times the region was cleared.
    pub clear_count: u32,
    /// Whether the restart/home controls were presented.
    pub controls_shown: bool,
    live_listeners: FxHashSet<ListenerId>,
    next_listener: u32,
}

impl MemorySurface {
    /// Create an empty recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent HUD repaint, if any.
    #[must_use]
    pub fn last_hud(&self) -> Option<HudState> {
        self.hud_history.last().copied()
    }

    /// The most recent overlay shown, if any.
    #[must_use]
    pub fn last_overlay(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    /// Number of pointer subscriptions currently live.
    ///
    /// Zero after an instance resolves means its cleanup honored the
    /// listener contract.
    #[must_use]
    pub fn live_listener_count(&self) -> usize {
        self.live_listeners.len()
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self) {
        self.clear_count += 1;
    }

    fn set_hud(&mut self, hud: HudState) {
        self.hud_history.push(hud);
    }

    fn set_timer(&mut self, seconds_left: u32) {
        self.timer_history.push(seconds_left);
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    fn set_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show_controls(&mut self) {
        self.controls_shown = true;
    }

    fn listen_pointer(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.live_listeners.insert(id);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.live_listeners.remove(&id);
    }
}
