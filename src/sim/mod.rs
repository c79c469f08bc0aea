//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No clock, storage, rendering or platform dependencies

pub mod effects;
pub mod projection;
pub mod spawner;
pub mod state;
pub mod tick;

pub use effects::{FeedbackEffect, Particle, Tone};
pub use projection::{Projection, Viewport, depth_progress, project, scale_for_depth};
pub use spawner::{SpawnSchedule, Spawner, kind_for_roll};
pub use state::{
    GameEvent, LaneDirection, ObjectKind, Player, RaceState, RoadObject, SessionPhase, SpeedState,
};
pub use tick::tick;
