//! Racing Rush - A pseudo-3D lane racing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, projection, collisions, timer)
//! - `session`: Session lifecycle, pause bookkeeping, best-time reporting
//! - `renderer`: Render adapter boundary (Canvas2D on the web)
//! - `platform`: Browser/native clock and input abstraction
//! - `persistence`: Best-time record storage

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use persistence::{BestTimeRecord, BestTimeStore, MemoryStore, StoreError};
pub use session::{Game, RaceResult, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of parallel lanes on the road
    pub const LANE_COUNT: usize = 3;
    /// Lane the player starts in (center)
    pub const START_LANE: usize = 1;

    /// Countdown budget at the start of every race (seconds)
    pub const START_TIME_SECS: f32 = 30.0;

    /// Depth at which new objects appear (far end of the road)
    pub const MAX_DEPTH: f32 = 3000.0;
    /// Collision band (exclusive on both ends)
    pub const COLLISION_NEAR: f32 = 50.0;
    pub const COLLISION_FAR: f32 = 200.0;

    /// Speed tiers (depth units per second)
    pub const SLOWED_SPEED: f32 = 250.0;
    pub const NORMAL_SPEED: f32 = 500.0;
    pub const BOOSTED_SPEED: f32 = 800.0;
    /// How long an obstacle hit keeps the player slowed (seconds)
    pub const SLOW_DURATION_SECS: f32 = 3.0;

    /// Fraction of the remaining lane distance covered per second
    pub const LANE_CHANGE_RATE: f32 = 8.0;
    /// Snap threshold for lane changes (in lane widths)
    pub const LANE_SNAP_EPSILON: f32 = 0.01;

    /// Spawn interval ramp (seconds)
    pub const SPAWN_INTERVAL_START: f32 = 1.5;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.6;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.01;

    /// Smallest projected scale (far objects stay a visible speck)
    pub const MIN_SCALE: f32 = 0.1;

    /// Collision rewards
    pub const COIN_SCORE: u64 = 100;
    pub const TIME_BONUS_SECS: f32 = 15.0;

    /// Feedback effects
    pub const PARTICLES_PER_BURST: usize = 10;
    pub const PARTICLE_LIFE_SECS: f32 = 0.5;
    pub const PARTICLE_GRAVITY: f32 = 1080.0;
    pub const FLOATING_TEXT_LIFE_SECS: f32 = 1.0;
    pub const FLOATING_TEXT_RISE: f32 = 60.0;

    /// Road-marking scroll period (depth units)
    pub const MARKING_SPACING: f32 = 100.0;
    /// HUD turns the timer red at or below this
    pub const TIMER_WARNING_SECS: f32 = 5.0;

    /// Viewport layout
    pub const HORIZON_FRACTION: f32 = 0.35;
    pub const ROAD_WIDTH_FRACTION: f32 = 0.7;
    pub const MAX_ROAD_WIDTH: f32 = 600.0;
    /// Distance of the player car's center above the bottom edge (pixels)
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
}

/// Clamp a (possibly out of range) lane index into the road
#[inline]
pub fn clamp_lane(lane: i64) -> usize {
    lane.clamp(0, consts::LANE_COUNT as i64 - 1) as usize
}

/// Nearest lane index for a continuous lane-unit position
#[inline]
pub fn nearest_lane(pos: f32) -> usize {
    clamp_lane(pos.round() as i64)
}
