//! File-backed store (native builds)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BestTimeRecord, BestTimeStore, StoreError};

/// Default file name inside the data directory
pub const DEFAULT_FILE_NAME: &str = "racing_rush_best.json";

/// Stores the record as JSON on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<temp dir>/racing_rush_best.json`
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl BestTimeStore for FileStore {
    fn load(&self) -> Result<Option<BestTimeRecord>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => BestTimeRecord::parse(&raw).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, record: &BestTimeRecord) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, record.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best time saved to {}", self.path.display());
        Ok(())
    }
}
