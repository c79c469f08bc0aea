//! Best race time record
//!
//! The game rewards surviving longer: the record is the longest race, in
//! whole seconds.

use serde::{Deserialize, Serialize};

use super::StoreError;

/// Current record layout version
pub const RECORD_VERSION: u32 = 1;

/// The stored best time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTimeRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Longest race (whole seconds)
    pub best_secs: u32,
    /// Session clock reading (ms) when achieved, 0 if unknown
    #[serde(default)]
    pub timestamp: f64,
}

fn default_version() -> u32 {
    RECORD_VERSION
}

impl BestTimeRecord {
    pub fn new(best_secs: u32, timestamp: f64) -> Self {
        Self {
            version: RECORD_VERSION,
            best_secs,
            timestamp,
        }
    }

    /// Parse a stored value. Accepts the JSON record or a bare integer.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let raw = raw.trim();
        match serde_json::from_str::<Self>(raw) {
            Ok(record) => Ok(record),
            Err(err) => match raw.parse::<u32>() {
                Ok(best_secs) => Ok(Self::new(best_secs, 0.0)),
                Err(_) => Err(StoreError::Serde(err)),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
