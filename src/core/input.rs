//! Decoded gameplay input events.
//!
//! Input-device specifics (pointer events, drag payloads) live outside the
//! engine; the host decodes them into these per-frame events and hands them
//! to [`Orchestrator::tick`](crate::orchestrator::Orchestrator::tick). Each
//! microgame variant consumes the events it understands and ignores the
//! rest.

use serde::{Deserialize, Serialize};

/// Collection bin colors for the sorting variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinColor {
    Blue,
    Green,
    Yellow,
}

/// Care tools for the tending variant.
///
/// Doubles as the need a plant can develop: a plant needing `Water` is
/// healed by the `Water` tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Water,
    Sun,
    Fertilizer,
}

/// A single decoded input event.
///
/// Coordinates are in the active variant's own surface units (documented
/// per variant).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Tap/click at a point in the render region.
    Tap { x: f32, y: f32 },
    /// Horizontal pointer position, already mapped into the region.
    PointerMove { x: f32 },
    /// Drop a dragged item onto a bin.
    Drop { item: u32, bin: BinColor },
    /// Switch the selected care tool.
    SelectTool(Tool),
    /// Tap a grid cell (plant or device).
    TapCell(usize),
}
