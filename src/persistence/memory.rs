//! In-memory store

use super::{BestTimeRecord, BestTimeStore, StoreError};

/// Keeps the record in memory. Can simulate an unavailable backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub record: Option<BestTimeRecord>,
    /// Fail every load and save
    pub unavailable: bool,
    /// Successful saves so far
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best_time(best_secs: u32) -> Self {
        Self {
            record: Some(BestTimeRecord::new(best_secs, 0.0)),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl BestTimeStore for MemoryStore {
    fn load(&self) -> Result<Option<BestTimeRecord>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &BestTimeRecord) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_reads_zero() {
        assert_eq!(MemoryStore::new().load_best_time().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        store.save(&BestTimeRecord::new(44, 1.0)).unwrap();
        assert_eq!(store.load_best_time().unwrap(), 44);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_unavailable_errors() {
        let mut store = MemoryStore::unavailable();
        assert!(store.load().is_err());
        assert!(store.save(&BestTimeRecord::new(1, 0.0)).is_err());
        assert_eq!(store.saves, 0);
    }
}
