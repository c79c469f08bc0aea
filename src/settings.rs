//! Presentation preferences
//!
//! Persisted separately from the best time in LocalStorage. Nothing here
//! changes how the race plays, only how it is drawn.

use serde::{Deserialize, Serialize};

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spark bursts on collisions
    pub particles: bool,
    /// Streaks while driving at full speed
    pub speed_lines: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (no speed lines or sparks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            speed_lines: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "racing_rush_settings";

    /// Effective particles (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective speed lines (respects reduced_motion)
    pub fn effective_speed_lines(&self) -> bool {
        self.speed_lines && !self.reduced_motion
    }

    /// Flip the preference bound to `key`. Returns whether anything changed.
    ///
    /// F toggles the FPS counter, M reduced motion, P sparks.
    pub fn toggle_for_key(&mut self, key: &str) -> bool {
        let flag = match key {
            "f" | "F" => &mut self.show_fps,
            "m" | "M" => &mut self.reduced_motion,
            "p" | "P" => &mut self.particles,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed settings: {}", err);
            Self::default()
        })
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::persistence::local_storage::get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings unavailable: {}", err);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let saved = serde_json::to_string(self)
            .map_err(crate::persistence::StoreError::from)
            .and_then(|json| crate::persistence::local_storage::set_item(Self::STORAGE_KEY, &json));
        match saved {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {}", err),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
