//! Race state and core simulation types
//!
//! Everything a frame of the race touches lives here. Host concerns (clock,
//! storage, drawing) stay outside in `session` and `platform`.

use serde::{Deserialize, Serialize};

use super::effects::FeedbackEffect;
use super::projection::{Projection, Viewport, project};
use super::spawner::{SpawnSchedule, Spawner};
use crate::consts::*;
use crate::nearest_lane;

/// Lifecycle of a single race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting on the start screen
    #[default]
    NotStarted,
    /// Countdown running
    Running,
    /// Time ran out
    Ended,
}

/// Player velocity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedState {
    #[default]
    Normal,
    /// Set by obstacle hits, expires after `SLOW_DURATION_SECS`
    Slowed,
    /// No in-game trigger yet; reserved for power-ups
    Boosted,
}

impl SpeedState {
    /// Forward speed in depth units per second
    pub fn speed(self) -> f32 {
        match self {
            SpeedState::Slowed => SLOWED_SPEED,
            SpeedState::Normal => NORMAL_SPEED,
            SpeedState::Boosted => BOOSTED_SPEED,
        }
    }

    /// HUD label
    pub fn label(self) -> &'static str {
        match self {
            SpeedState::Slowed => "SLOWED",
            SpeedState::Normal => "NORMAL",
            SpeedState::Boosted => "BOOST",
        }
    }
}

/// Lane change command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane, updated once the car settles into `target_lane`
    pub lane: usize,
    /// Lane the car is steering toward
    pub target_lane: usize,
    /// Continuous horizontal position in lane units (0.0 = leftmost lane center)
    pub pos: f32,
    pub speed_state: SpeedState,
    /// Seconds left on the current slow effect
    pub slow_remaining: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: START_LANE,
            target_lane: START_LANE,
            pos: START_LANE as f32,
            speed_state: SpeedState::Normal,
            slow_remaining: 0.0,
        }
    }
}

impl Player {
    /// Shift the target lane one step. Returns false at the road edge.
    pub fn request_lane_change(&mut self, direction: LaneDirection) -> bool {
        let next = match direction {
            LaneDirection::Left => self.target_lane.checked_sub(1),
            LaneDirection::Right => Some(self.target_lane + 1).filter(|&l| l < LANE_COUNT),
        };
        match next {
            Some(lane) => {
                self.target_lane = lane;
                true
            }
            None => false,
        }
    }

    /// Ease the car toward the target lane center.
    ///
    /// The step factor is capped at 1 so a long frame lands on the target
    /// instead of overshooting it.
    pub fn move_toward_target(&mut self, dt: f32) {
        let target = self.target_lane as f32;
        let diff = target - self.pos;
        if diff.abs() > LANE_SNAP_EPSILON {
            self.pos += diff * (LANE_CHANGE_RATE * dt).min(1.0);
        }
        if (target - self.pos).abs() <= LANE_SNAP_EPSILON {
            self.pos = target;
            self.lane = self.target_lane;
        }
    }

    /// Lane the car visually occupies right now (used for collisions)
    pub fn effective_lane(&self) -> usize {
        nearest_lane(self.pos)
    }

    pub fn speed(&self) -> f32 {
        self.speed_state.speed()
    }

    /// Obstacle hit: slow down and (re)start the slow timer
    pub fn slow_down(&mut self) {
        self.speed_state = SpeedState::Slowed;
        self.slow_remaining = SLOW_DURATION_SECS;
    }

    /// Count down the slow effect. Returns true on the frame it expires.
    pub fn tick_slow(&mut self, dt: f32) -> bool {
        if self.speed_state != SpeedState::Slowed {
            return false;
        }
        self.slow_remaining -= dt;
        if self.slow_remaining <= 0.0 {
            self.slow_remaining = 0.0;
            self.speed_state = SpeedState::Normal;
            return true;
        }
        false
    }
}

/// Road object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Obstacle,
    Coin,
    TimeBonus,
}

/// An object travelling down the road toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub lane: usize,
    /// Distance ahead of the player (MAX_DEPTH = horizon, 0 = at the car)
    pub depth: f32,
    pub collected: bool,
    /// Screen placement from the last projection
    pub projection: Projection,
}

impl RoadObject {
    pub fn new(id: u32, kind: ObjectKind, lane: usize, depth: f32, viewport: &Viewport) -> Self {
        Self {
            id,
            kind,
            lane,
            depth,
            collected: false,
            projection: project(depth, lane, viewport),
        }
    }

    /// Move toward the player and refresh the projection
    pub fn advance(&mut self, distance: f32, viewport: &Viewport) {
        self.depth -= distance;
        self.reproject(viewport);
    }

    pub fn reproject(&mut self, viewport: &Viewport) {
        self.projection = project(self.depth, self.lane, viewport);
    }

    pub fn in_collision_band(&self) -> bool {
        self.depth > COLLISION_NEAR && self.depth < COLLISION_FAR
    }
}

/// Things that happened during a tick (for logging, HUD feedback, tests)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObjectKind, lane: usize },
    /// Object reached the car without interacting
    Passed { id: u32 },
    ObstacleHit { id: u32, lane: usize },
    CoinCollected { id: u32, lane: usize },
    TimeBonusCollected { id: u32, lane: usize },
    SlowExpired,
    TimeUp,
}

/// Complete race state for one session
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Seed the spawner and effects were created from
    pub seed: u64,
    pub phase: SessionPhase,
    /// Countdown (seconds)
    pub time_remaining: f32,
    pub score: u64,
    pub player: Player,
    /// Live road objects in spawn order
    pub objects: Vec<RoadObject>,
    /// Live feedback effects
    pub effects: Vec<FeedbackEffect>,
    /// Total distance driven (drives road-marking scroll)
    pub distance: f32,
    pub schedule: SpawnSchedule,
    pub viewport: Viewport,
    pub(crate) spawner: Spawner,
    next_id: u32,
}

impl RaceState {
    /// Fresh state waiting for the first start
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            phase: SessionPhase::NotStarted,
            time_remaining: START_TIME_SECS,
            score: 0,
            player: Player::default(),
            objects: Vec::new(),
            effects: Vec::new(),
            distance: 0.0,
            schedule: SpawnSchedule::default(),
            viewport,
            spawner: Spawner::new(seed),
            next_id: 1,
        }
    }

    /// Fresh state with the countdown already running
    pub fn started(seed: u64, viewport: Viewport) -> Self {
        Self {
            phase: SessionPhase::Running,
            ..Self::new(seed, viewport)
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a random object at the far end of the road
    pub fn spawn_object(&mut self) -> &RoadObject {
        let id = self.next_entity_id();
        let object = self.spawner.spawn(id, &self.viewport);
        self.objects.push(object);
        &self.objects[self.objects.len() - 1]
    }

    /// Place a specific object on the road (power-ups, tests, replays)
    pub fn place_object(&mut self, kind: ObjectKind, lane: usize, depth: f32) -> u32 {
        let id = self.next_entity_id();
        let lane = lane.min(LANE_COUNT - 1);
        let depth = depth.clamp(0.0, MAX_DEPTH);
        self.objects
            .push(RoadObject::new(id, kind, lane, depth, &self.viewport));
        id
    }

    /// Force a speed tier (the only way into `Boosted` for now)
    pub fn set_speed_state(&mut self, speed_state: SpeedState) {
        match speed_state {
            SpeedState::Slowed => self.player.slow_down(),
            other => {
                self.player.speed_state = other;
                self.player.slow_remaining = 0.0;
            }
        }
    }

    /// Swap the viewport and reproject everything on the road
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for object in &mut self.objects {
            object.reproject(&viewport);
        }
    }

    /// Road-marking scroll offset
    pub fn marking_offset(&self) -> f32 {
        self.distance % MARKING_SPACING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_change_clamps_at_edges() {
        let mut player = Player::default();
        assert!(player.request_lane_change(LaneDirection::Right));
        assert!(!player.request_lane_change(LaneDirection::Right));
        assert_eq!(player.target_lane, LANE_COUNT - 1);

        assert!(player.request_lane_change(LaneDirection::Left));
        assert!(player.request_lane_change(LaneDirection::Left));
        assert!(!player.request_lane_change(LaneDirection::Left));
        assert_eq!(player.target_lane, 0);
    }

    #[test]
    fn test_move_toward_target_never_overshoots() {
        let mut player = Player::default();
        player.request_lane_change(LaneDirection::Right);

        // Absurdly long frame lands exactly on the target
        player.move_toward_target(5.0);
        assert_eq!(player.pos, 2.0);
        assert_eq!(player.lane, 2);
    }

    #[test]
    fn test_move_toward_target_converges_monotonically() {
        let mut player = Player::default();
        player.request_lane_change(LaneDirection::Left);

        let mut last = player.pos;
        for _ in 0..120 {
            player.move_toward_target(1.0 / 60.0);
            assert!(player.pos <= last);
            assert!(player.pos >= 0.0);
            last = player.pos;
        }
        assert_eq!(player.pos, 0.0);
        assert_eq!(player.lane, 0);
    }

    #[test]
    fn test_effective_lane_follows_position_mid_transition() {
        let mut player = Player::default();
        player.request_lane_change(LaneDirection::Right);
        player.pos = 1.6;
        assert_eq!(player.lane, 1);
        assert_eq!(player.effective_lane(), 2);
    }

    #[test]
    fn test_speed_tiers_ordered() {
        assert!(SpeedState::Slowed.speed() < SpeedState::Normal.speed());
        assert!(SpeedState::Normal.speed() < SpeedState::Boosted.speed());
    }

    #[test]
    fn test_slow_expires_once() {
        let mut player = Player::default();
        player.slow_down();
        let mut expirations = 0;
        for _ in 0..400 {
            if player.tick_slow(0.01) {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert_eq!(player.speed_state, SpeedState::Normal);
    }

    #[test]
    fn test_place_object_clamps_inputs() {
        let mut state = RaceState::new(1, Viewport::default());
        let id = state.place_object(ObjectKind::Coin, 9, MAX_DEPTH * 2.0);
        let object = &state.objects[0];
        assert_eq!(object.id, id);
        assert_eq!(object.lane, LANE_COUNT - 1);
        assert_eq!(object.depth, MAX_DEPTH);
    }

    #[test]
    fn test_boosted_is_reachable() {
        let mut state = RaceState::started(1, Viewport::default());
        state.set_speed_state(SpeedState::Boosted);
        assert_eq!(state.player.speed(), BOOSTED_SPEED);
        state.set_speed_state(SpeedState::Slowed);
        assert_eq!(state.player.slow_remaining, SLOW_DURATION_SECS);
    }
}
