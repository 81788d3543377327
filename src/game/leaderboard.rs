//! # Leaderboard
//!
//! Storage for finished runs. The simulation only produces
//! [`LeaderboardEntry`] values; where they go is up to the store.

use crate::game::ClassArchetype;
use crate::{ReckoningError, ReckoningResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub run_id: Uuid,
    pub name: String,
    pub class: ClassArchetype,
    /// Floor the run ended on
    pub floor: u32,
    pub score: u32,
}

/// Somewhere finished runs can be recorded.
pub trait LeaderboardStore {
    /// Records an entry. Recording the same run twice keeps one entry.
    fn record(&mut self, entry: LeaderboardEntry) -> ReckoningResult<()>;

    /// Best entries first.
    fn top(&self, limit: usize) -> ReckoningResult<Vec<LeaderboardEntry>>;
}

fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.retain(|existing| existing.run_id != entry.run_id);
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(b.floor.cmp(&a.floor)));
}

/// In-memory store, used by tests and by runs without a leaderboard file.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn record(&mut self, entry: LeaderboardEntry) -> ReckoningResult<()> {
        insert_ranked(&mut self.entries, entry);
        Ok(())
    }

    fn top(&self, limit: usize) -> ReckoningResult<Vec<LeaderboardEntry>> {
        Ok(self.entries.iter().take(limit).cloned().collect())
    }
}

/// Leaderboard kept as a JSON array on disk.
///
/// A missing file reads as an empty leaderboard.
#[derive(Debug, Clone)]
pub struct JsonLeaderboard {
    path: PathBuf,
}

impl JsonLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ReckoningResult<Vec<LeaderboardEntry>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => serde_json::from_str(&json).map_err(ReckoningError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl LeaderboardStore for JsonLeaderboard {
    fn record(&mut self, entry: LeaderboardEntry) -> ReckoningResult<()> {
        let mut entries = self.load()?;
        insert_ranked(&mut entries, entry);
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Leaderboard at {} now holds {} runs", self.path.display(), entries.len());
        Ok(())
    }

    fn top(&self, limit: usize) -> ReckoningResult<Vec<LeaderboardEntry>> {
        let mut entries = self.load()?;
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(serial: u128, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            run_id: Uuid::from_u128(serial),
            name: format!("Seeker {}", serial),
            class: ClassArchetype::Fighter,
            floor: 1,
            score,
        }
    }

    #[test]
    fn test_memory_leaderboard_ranks_by_score() {
        let mut board = MemoryLeaderboard::new();
        board.record(entry(1, 50)).unwrap();
        board.record(entry(2, 300)).unwrap();
        board.record(entry(3, 120)).unwrap();

        let top = board.top(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 300);
        assert_eq!(top[1].score, 120);
    }

    #[test]
    fn test_recording_same_run_replaces() {
        let mut board = MemoryLeaderboard::new();
        board.record(entry(1, 50)).unwrap();
        board.record(entry(1, 80)).unwrap();
        let top = board.top(10).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].score, 80);
    }

    #[test]
    fn test_json_leaderboard_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");

        let mut board = JsonLeaderboard::new(&path);
        assert!(board.top(5).unwrap().is_empty());
        board.record(entry(1, 10)).unwrap();
        board.record(entry(2, 20)).unwrap();

        let reopened = JsonLeaderboard::new(&path);
        let top = reopened.top(5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].run_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_json_leaderboard_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(&path, "not json").unwrap();
        let mut board = JsonLeaderboard::new(&path);
        assert!(board.record(entry(1, 10)).is_err());
    }
}
