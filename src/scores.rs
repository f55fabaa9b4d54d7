//! In-session leaderboard
//!
//! Tracks the top scores across restarts within one process run. Nothing is
//! written to disk; the game keeps no state across runs.

/// Maximum number of scores to keep
pub const MAX_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Copy)]
pub struct ScoreEntry {
    pub score: u32,
    /// Simulation tick count of the run that produced the score
    pub run_ticks: u64,
}

/// Session leaderboard, sorted descending by score
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check whether a score belongs on the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed), or
    /// `None` if the score did not qualify.
    pub fn add_score(&mut self, score: u32, run_ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry { score, run_ticks };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_SCORES);
        Some(rank)
    }

    /// Best score of the session, if any run has finished
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
