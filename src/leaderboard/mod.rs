//! Leaderboard client contract.
//!
//! The leaderboard is an external append-only score store. A session
//! touches it at most twice: one submission and one fetch, both at game
//! over. Failures are non-fatal to the session; the orchestrator degrades
//! the game-over screen instead of blocking it.

pub mod memory;

pub use memory::MemoryLeaderboard;

use serde::{Deserialize, Serialize};

/// A dated leaderboard record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Stamped by the store at submission time.
    pub timestamp_ms: u64,
}

/// Store or transport failure from the leaderboard backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardError {
    message: String,
}

impl LeaderboardError {
    /// Wrap a backend failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "leaderboard unavailable: {}", self.message)
    }
}

impl std::error::Error for LeaderboardError {}

/// Append/query contract against the score store.
///
/// `fetch_leaderboard` returns all records ordered by score descending,
/// with no pagination.
pub trait Leaderboard {
    /// Append a dated record for a finished session.
    fn submit_score(&mut self, name: &str, score: u32, level: u32) -> Result<(), LeaderboardError>;

    /// Fetch every record, highest score first.
    fn fetch_leaderboard(&self) -> Result<Vec<ScoreEntry>, LeaderboardError>;
}
