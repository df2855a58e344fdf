//! LocalStorage-backed high score store (WASM only)

use crate::persistence::{HighScoreRecord, HighScoreStore, StoreError};

/// Persists the best score as a small JSON record under one key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "gap_dash_high_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u64>, StoreError> {
        let storage = Self::storage()?;
        let json = storage
            .get_item(&self.key)
            .map_err(|e| StoreError::Read(format!("{:?}", e)))?;
        match json {
            Some(json) => Ok(Some(HighScoreRecord::from_json(&json)?.best)),
            None => Ok(None),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = HighScoreRecord { best: score }.to_json()?;
        storage
            .set_item(&self.key, &json)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
