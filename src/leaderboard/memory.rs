//! In-memory leaderboard store.
//!
//! Keeps entries sorted by score descending, ties in submission order.
//! JSON hooks let hosts persist the board between runs.

use serde::{Deserialize, Serialize};

use super::{Leaderboard, LeaderboardError, ScoreEntry};

/// An in-memory [`Leaderboard`] implementation.
///
/// The store stamps each record with its own clock; hosts advance it via
/// [`MemoryLeaderboard::set_now_ms`] (the engine itself never reads wall
/// time).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
    now_ms: u64,
}

impl MemoryLeaderboard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clock used to date subsequent submissions.
    pub fn set_now_ms(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the board has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the board to JSON for host-side persistence.
    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        serde_json::to_string(self).map_err(|e| LeaderboardError::new(e.to_string()))
    }

    /// Restore a board previously serialized with
    /// [`MemoryLeaderboard::to_json`].
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let board: Self =
            serde_json::from_str(json).map_err(|e| LeaderboardError::new(e.to_string()))?;
        log::info!("loaded {} leaderboard entries", board.entries.len());
        Ok(board)
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<(), LeaderboardError> {
        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            level,
            timestamp_ms: self.now_ms,
        };

        // Insert before the first strictly-lower score; ties keep
        // submission order.
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        Ok(())
    }

    fn fetch_leaderboard(&self) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        Ok(self.entries.clone())
    }
}
