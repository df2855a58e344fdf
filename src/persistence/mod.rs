//! High score persistence port
//!
//! The simulation never touches storage. A session reads the stored best
//! once at startup and writes it back only when a finished run beats it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a high score store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to read high score: {0}")]
    Read(String),
    #[error("failed to write high score: {0}")]
    Write(String),
    #[error("stored high score is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Stored shape of the high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub best: u64,
}

impl HighScoreRecord {
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Load/save of a single integer
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<u64>, StoreError>;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// In-memory store for tests and the native demo
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { value: Some(score) }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.value = Some(score);
        Ok(())
    }
}
