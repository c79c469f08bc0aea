//! Road object spawning
//!
//! Objects appear at the horizon in a random lane. Kind is drawn from a
//! fixed table: 50% obstacle, 30% coin, 20% time bonus.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::projection::Viewport;
use super::state::{ObjectKind, RoadObject};
use crate::consts::*;

/// Map a uniform [0, 1) roll onto an object kind
pub fn kind_for_roll(roll: f32) -> ObjectKind {
    if roll < 0.5 {
        ObjectKind::Obstacle
    } else if roll < 0.8 {
        ObjectKind::Coin
    } else {
        ObjectKind::TimeBonus
    }
}

/// Seeded object generator
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn roll_lane(&mut self) -> usize {
        self.rng.random_range(0..LANE_COUNT)
    }

    pub fn roll_kind(&mut self) -> ObjectKind {
        kind_for_roll(self.rng.random::<f32>())
    }

    /// New object at the far end of the road
    pub fn spawn(&mut self, id: u32, viewport: &Viewport) -> RoadObject {
        let lane = self.roll_lane();
        let kind = self.roll_kind();
        RoadObject::new(id, kind, lane, MAX_DEPTH, viewport)
    }

    /// Shared RNG for cosmetic randomness (particle spread)
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// Spawn cadence with a difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    /// Seconds since the last spawn
    pub timer: f32,
    /// Current gap between spawns
    pub interval: f32,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            timer: 0.0,
            interval: SPAWN_INTERVAL_START,
        }
    }
}

impl SpawnSchedule {
    /// Accumulate `dt`. Returns true when a spawn is due; the timer resets and
    /// the interval shrinks one step toward the floor.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer > self.interval {
            self.timer = 0.0;
            self.interval = (self.interval - SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_FLOOR);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_thresholds() {
        assert_eq!(kind_for_roll(0.0), ObjectKind::Obstacle);
        assert_eq!(kind_for_roll(0.4999), ObjectKind::Obstacle);
        assert_eq!(kind_for_roll(0.5), ObjectKind::Coin);
        assert_eq!(kind_for_roll(0.7999), ObjectKind::Coin);
        assert_eq!(kind_for_roll(0.8), ObjectKind::TimeBonus);
        assert_eq!(kind_for_roll(0.9999), ObjectKind::TimeBonus);
    }

    #[test]
    fn test_spawn_at_max_depth_in_valid_lane() {
        let mut spawner = Spawner::new(7);
        let vp = Viewport::default();
        for id in 0..200 {
            let object = spawner.spawn(id, &vp);
            assert_eq!(object.depth, MAX_DEPTH);
            assert!(object.lane < LANE_COUNT);
            assert!(!object.collected);
        }
    }

    #[test]
    fn test_kind_distribution_roughly_matches_table() {
        let mut spawner = Spawner::new(42);
        let mut counts = [0usize; 3];
        let n = 20_000;
        for _ in 0..n {
            let idx = match spawner.roll_kind() {
                ObjectKind::Obstacle => 0,
                ObjectKind::Coin => 1,
                ObjectKind::TimeBonus => 2,
            };
            counts[idx] += 1;
        }
        let frac = |c: usize| c as f32 / n as f32;
        assert!((frac(counts[0]) - 0.5).abs() < 0.03);
        assert!((frac(counts[1]) - 0.3).abs() < 0.03);
        assert!((frac(counts[2]) - 0.2).abs() < 0.03);
    }

    #[test]
    fn test_every_lane_gets_used() {
        let mut spawner = Spawner::new(3);
        let mut seen = [false; LANE_COUNT];
        for _ in 0..300 {
            seen[spawner.roll_lane()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let vp = Viewport::default();
        let mut a = Spawner::new(99);
        let mut b = Spawner::new(99);
        for id in 0..50 {
            let (x, y) = (a.spawn(id, &vp), b.spawn(id, &vp));
            assert_eq!((x.kind, x.lane), (y.kind, y.lane));
        }
    }

    #[test]
    fn test_schedule_fires_after_interval() {
        let mut schedule = SpawnSchedule::default();
        assert!(!schedule.advance(1.0));
        assert!(!schedule.advance(0.5)); // exactly at interval: not yet
        assert!(schedule.advance(0.01));
        assert_eq!(schedule.timer, 0.0);
        assert!((schedule.interval - (SPAWN_INTERVAL_START - SPAWN_INTERVAL_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_schedule_interval_floors() {
        let mut schedule = SpawnSchedule::default();
        let mut last = schedule.interval;
        for _ in 0..500 {
            schedule.advance(schedule.interval + 0.001);
            assert!(schedule.interval <= last);
            assert!(schedule.interval >= SPAWN_INTERVAL_FLOOR);
            last = schedule.interval;
        }
        assert_eq!(schedule.interval, SPAWN_INTERVAL_FLOOR);
    }
}
