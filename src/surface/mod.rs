//! Render-surface contract.
//!
//! The surface is a mutable display region the orchestrator and the active
//! microgame instance draw into. It is an external collaborator: the engine
//! specifies only the operations it needs, never how anything is rendered.
//!
//! ## Ownership
//!
//! The region belongs to whichever component last cleared and repopulated
//! it. Single-threaded scheduling guarantees no two components write
//! concurrently.
//!
//! ## Listener handles
//!
//! Some variants subscribe to pointer movement at the whole-region level
//! rather than within their own subtree. Replacing the region's contents
//! does not sever such a subscription, so every [`Surface::listen_pointer`]
//! call must be paired with a [`Surface::remove_listener`] in that
//! instance's cleanup, tracked via the returned handle.

pub mod memory;

pub use memory::MemorySurface;

use serde::{Deserialize, Serialize};

use crate::leaderboard::ScoreEntry;

/// Displayable session triple: lives, score, level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudState {
    pub lives: u32,
    pub score: u32,
    pub level: u32,
}

/// Handle for a region-level input subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Full-region overlays the orchestrator and variants present.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    /// Session start screen with the name prompt.
    Start,
    /// Short per-variant instruction card shown at setup.
    Briefing { title: String },
    /// Transient success flash after a won microgame.
    Success,
    /// Transient failure flash after a lost microgame.
    Failure,
    /// Final summary once lives are exhausted.
    GameOver { score: u32 },
    /// Ranked results panel on the game-over screen.
    Leaderboard { entries: Vec<ScoreEntry> },
}

/// The display region contract.
///
/// Implementations are free to render however they like; the engine only
/// requires that these operations exist. [`MemorySurface`] records them for
/// tests.
pub trait Surface {
    /// Clear the region's contents.
    fn clear(&mut self);

    /// Repaint the lives/score/level bar.
    fn set_hud(&mut self, hud: HudState);

    /// Repaint the active instance's countdown display.
    fn set_timer(&mut self, seconds_left: u32);

    /// Present a full-region overlay.
    fn show_overlay(&mut self, overlay: Overlay);

    /// Inline, non-blocking status line (leaderboard progress, degraded
    /// messages).
    fn set_status(&mut self, message: &str);

    /// Blocking notice requiring user awareness (load failure, rejected
    /// name).
    fn alert(&mut self, message: &str);

    /// Present the restart/home affordances.
    fn show_controls(&mut self);

    /// Subscribe to region-level pointer movement.
    fn listen_pointer(&mut self) -> ListenerId;

    /// Remove a pointer subscription taken with [`Surface::listen_pointer`].
    fn remove_listener(&mut self, id: ListenerId);
}
