//! LocalStorage-backed store (wasm builds)

use super::{BestTimeRecord, BestTimeStore, StoreError};

/// LocalStorage key for the best time
pub const STORAGE_KEY: &str = "racingRushHighScore";

fn storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or_else(|| StoreError::Unavailable("localStorage not accessible".into()))
}

/// Read a raw string value
pub fn get_item(key: &str) -> Result<Option<String>, StoreError> {
    storage()?
        .get_item(key)
        .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
}

/// Write a raw string value
pub fn set_item(key: &str, value: &str) -> Result<(), StoreError> {
    storage()?
        .set_item(key, value)
        .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
}

/// Best time kept in the browser's LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl BestTimeStore for LocalStorageStore {
    fn load(&self) -> Result<Option<BestTimeRecord>, StoreError> {
        match get_item(STORAGE_KEY)? {
            Some(raw) => BestTimeRecord::parse(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, record: &BestTimeRecord) -> Result<(), StoreError> {
        set_item(STORAGE_KEY, &record.to_json()?)?;
        log::info!("Best time saved ({}s)", record.best_secs);
        Ok(())
    }
}
