//! Best-time persistence
//!
//! Features:
//! - Versioned JSON record (bare integers from older saves still load)
//! - LocalStorage backend on the web, file backend natively
//! - In-memory backend for tests and headless runs
//! - Atomic file writes (tmp → rename)

pub mod best_time;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use best_time::BestTimeRecord;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage failures. Callers treat all of them as non-fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Port for the single best-time record
pub trait BestTimeStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<BestTimeRecord>, StoreError>;

    fn save(&mut self, record: &BestTimeRecord) -> Result<(), StoreError>;

    /// Best time in whole seconds (0 when nothing is stored)
    fn load_best_time(&self) -> Result<u32, StoreError> {
        Ok(self.load()?.map_or(0, |r| r.best_secs))
    }
}
