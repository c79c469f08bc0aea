//! Race session lifecycle
//!
//! `Game` wraps the deterministic `RaceState` with the host-facing concerns:
//! wall-clock race duration, pause bookkeeping, best-time persistence, and the
//! read-only snapshot renderers draw from. The host drives it; there is no
//! loop in here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TIMER_WARNING_SECS;
use crate::persistence::{BestTimeRecord, BestTimeStore};
use crate::platform::Clock;
use crate::renderer::RenderSink;
use crate::sim::{
    FeedbackEffect, GameEvent, LaneDirection, Player, RaceState, RoadObject, SessionPhase,
    Viewport, tick,
};

/// Final numbers for the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub score: u64,
    /// Wall-clock race duration minus pauses, rounded to a tenth of a second
    pub race_secs: f64,
    /// Best time after this race
    pub best_secs: u32,
    pub new_record: bool,
}

impl RaceResult {
    pub fn race_time_text(&self) -> String {
        format!("{:.1}s", self.race_secs)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub phase: SessionPhase,
    pub paused: bool,
    pub player: &'a Player,
    /// Where the car is drawn
    pub player_screen: Vec2,
    /// Live objects, farthest first (painter's order)
    pub objects: Vec<&'a RoadObject>,
    pub effects: &'a [FeedbackEffect],
    pub time_remaining: f32,
    pub score: u64,
    pub best_secs: u32,
    pub marking_offset: f32,
    pub viewport: Viewport,
    pub result: Option<&'a RaceResult>,
}

impl Snapshot<'_> {
    pub fn timer_text(&self) -> String {
        format!("{:.1}", self.time_remaining)
    }

    pub fn timer_warning(&self) -> bool {
        self.phase == SessionPhase::Running && self.time_remaining <= TIMER_WARNING_SECS
    }

    pub fn speed_label(&self) -> &'static str {
        self.player.speed_state.label()
    }
}

/// One player's game: the current race plus its host collaborators
pub struct Game<C: Clock, S: BestTimeStore> {
    clock: C,
    store: S,
    race: RaceState,
    viewport: Viewport,
    best_secs: u32,
    started_at_ms: f64,
    /// Set while paused
    paused_at_ms: Option<f64>,
    total_paused_ms: f64,
    result: Option<RaceResult>,
}

impl<C: Clock, S: BestTimeStore> Game<C, S> {
    /// Load the best time and wait on the start screen
    pub fn new(clock: C, store: S, viewport: Viewport) -> Self {
        let best_secs = match store.load_best_time() {
            Ok(secs) => secs,
            Err(err) => {
                log::warn!("Could not load best time, starting from 0: {}", err);
                0
            }
        };
        log::info!("Best time on record: {}s", best_secs);

        Self {
            clock,
            store,
            race: RaceState::new(0, viewport),
            viewport,
            best_secs,
            started_at_ms: 0.0,
            paused_at_ms: None,
            total_paused_ms: 0.0,
            result: None,
        }
    }

    /// Begin a fresh race, discarding anything left from the previous one
    pub fn start(&mut self, seed: u64) {
        self.race = RaceState::started(seed, self.viewport);
        self.started_at_ms = self.clock.now_ms();
        self.paused_at_ms = None;
        self.total_paused_ms = 0.0;
        self.result = None;
        log::info!("Race started (seed {})", seed);
    }

    /// Advance one frame. Does nothing while paused or outside a race.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.paused_at_ms.is_some() {
            return Vec::new();
        }
        let events = tick(&mut self.race, dt);
        if self.race.phase == SessionPhase::Ended && self.result.is_none() {
            self.end();
        }
        events
    }

    /// Close out the race: measure it and update the best time
    fn end(&mut self) {
        let elapsed_ms =
            (self.clock.now_ms() - self.started_at_ms - self.total_paused_ms).max(0.0);
        let race_secs = (elapsed_ms / 100.0).round() / 10.0;
        let whole_secs = race_secs.floor() as u32;

        let new_record = whole_secs > self.best_secs;
        if new_record {
            self.best_secs = whole_secs;
            let record = BestTimeRecord::new(whole_secs, self.clock.now_ms());
            if let Err(err) = self.store.save(&record) {
                log::warn!("Could not save best time: {}", err);
            }
            log::info!("New best time: {}s", whole_secs);
        }

        log::info!(
            "Race over: {:.1}s, score {}",
            race_secs,
            self.race.score
        );
        self.result = Some(RaceResult {
            score: self.race.score,
            race_secs,
            best_secs: self.best_secs,
            new_record,
        });
    }

    /// Freeze the race. Only meaningful while running.
    pub fn pause(&mut self) -> bool {
        if self.race.phase != SessionPhase::Running || self.paused_at_ms.is_some() {
            return false;
        }
        self.paused_at_ms = Some(self.clock.now_ms());
        log::info!("Paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        let Some(paused_at) = self.paused_at_ms.take() else {
            return false;
        };
        let paused_for = (self.clock.now_ms() - paused_at).max(0.0);
        self.total_paused_ms += paused_for;
        log::info!("Resumed after {:.0}ms", paused_for);
        true
    }

    /// Host went hidden (tab switch, minimize)
    pub fn on_suspend(&mut self) {
        self.pause();
    }

    /// Host visible again
    pub fn on_resume(&mut self) {
        self.resume();
    }

    /// Steer one lane over. Ignored outside a running, unpaused race.
    pub fn request_lane_change(&mut self, direction: LaneDirection) -> bool {
        if self.race.phase != SessionPhase::Running || self.paused_at_ms.is_some() {
            return false;
        }
        self.race.player.request_lane_change(direction)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.race.set_viewport(self.viewport);
    }

    pub fn phase(&self) -> SessionPhase {
        self.race.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at_ms.is_some()
    }

    pub fn race(&self) -> &RaceState {
        &self.race
    }

    /// Direct access for power-ups, replays and tests
    pub fn race_mut(&mut self) -> &mut RaceState {
        &mut self.race
    }

    pub fn best_time(&self) -> u32 {
        self.best_secs
    }

    pub fn result(&self) -> Option<&RaceResult> {
        self.result.as_ref()
    }

    /// Total time spent paused this race (ms)
    pub fn total_paused_ms(&self) -> f64 {
        self.total_paused_ms
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let mut objects: Vec<&RoadObject> = self.race.objects.iter().collect();
        objects.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        Snapshot {
            phase: self.race.phase,
            paused: self.is_paused(),
            player: &self.race.player,
            player_screen: self.viewport.player_screen_pos(self.race.player.pos),
            objects,
            effects: &self.race.effects,
            time_remaining: self.race.time_remaining,
            score: self.race.score,
            best_secs: self.best_secs,
            marking_offset: self.race.marking_offset(),
            viewport: self.viewport,
            result: self.result.as_ref(),
        }
    }

    /// Hand the current frame to a renderer
    pub fn render<R: RenderSink + ?Sized>(&self, sink: &mut R) {
        sink.draw(&self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::ManualClock;
    use crate::sim::ObjectKind;

    const DT: f32 = 1.0 / 60.0;

    fn game(store: MemoryStore) -> (Game<ManualClock, MemoryStore>, ManualClock) {
        let clock = ManualClock::new(10_000.0);
        (Game::new(clock.clone(), store, Viewport::default()), clock)
    }

    /// Drive frames in lockstep with the wall clock until the race ends
    fn run_out(game: &mut Game<ManualClock, MemoryStore>, clock: &ManualClock) {
        while game.phase() == SessionPhase::Running {
            clock.advance(DT as f64 * 1000.0);
            game.race_mut().objects.clear();
            game.update(DT);
        }
    }

    #[test]
    fn test_starts_on_start_screen() {
        let (mut game, _) = game(MemoryStore::new());
        assert_eq!(game.phase(), SessionPhase::NotStarted);
        assert!(game.update(DT).is_empty());
        assert!(!game.pause());
        assert!(!game.request_lane_change(LaneDirection::Left));
    }

    #[test]
    fn test_lane_change_ignored_after_end() {
        let (mut game, clock) = game(MemoryStore::new());
        game.start(1);
        run_out(&mut game, &clock);
        assert_eq!(game.phase(), SessionPhase::Ended);

        let target = game.race().player.target_lane;
        assert!(!game.request_lane_change(LaneDirection::Left));
        assert_eq!(game.race().player.target_lane, target);
    }

    #[test]
    fn test_new_record_is_saved() {
        let (mut game, clock) = game(MemoryStore::with_best_time(10));
        game.start(1);
        run_out(&mut game, &clock);

        let result = game.result().unwrap().clone();
        assert!(result.new_record);
        assert!((result.race_secs - 30.0).abs() <= 0.1);
        assert_eq!(game.best_time(), result.best_secs);
        assert_eq!(game.store().saves, 1);
        let saved = game.store().record.as_ref().unwrap();
        assert_eq!(saved.best_secs, result.best_secs);
        assert_eq!(saved.timestamp, clock.now_ms());
    }

    #[test]
    fn test_tying_the_record_is_not_a_new_record() {
        let (mut first, clock) = game(MemoryStore::new());
        first.start(5);
        run_out(&mut first, &clock);
        let whole = first.result().unwrap().race_secs.floor() as u32;

        let (mut second, clock) = game(MemoryStore::with_best_time(whole));
        second.start(5);
        run_out(&mut second, &clock);
        let result = second.result().unwrap();
        assert!(!result.new_record);
        assert_eq!(result.best_secs, whole);
        assert_eq!(second.store().saves, 0);
    }

    #[test]
    fn test_slower_than_record_not_saved() {
        let (mut game, clock) = game(MemoryStore::with_best_time(500));
        game.start(1);
        run_out(&mut game, &clock);

        let result = game.result().unwrap();
        assert!(!result.new_record);
        assert_eq!(result.best_secs, 500);
        assert_eq!(game.store().saves, 0);
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let (mut game, clock) = game(MemoryStore::unavailable());
        assert_eq!(game.best_time(), 0);
        game.start(1);
        run_out(&mut game, &clock);
        assert_eq!(game.phase(), SessionPhase::Ended);
        assert!(game.result().is_some());
    }

    #[test]
    fn test_paused_time_excluded_from_race_time() {
        let (mut game, clock) = game(MemoryStore::new());
        game.start(1);
        for _ in 0..60 {
            clock.advance(DT as f64 * 1000.0);
            game.update(DT);
        }
        assert!(game.pause());
        clock.advance(5_000.0);
        assert!(game.resume());
        assert_eq!(game.total_paused_ms(), 5_000.0);

        run_out(&mut game, &clock);
        let result = game.result().unwrap();
        assert!(result.race_secs < 31.0, "race took {}", result.race_secs);
    }

    #[test]
    fn test_restart_discards_previous_race() {
        let (mut game, clock) = game(MemoryStore::new());
        game.start(1);
        game.race_mut().place_object(ObjectKind::Coin, 1, 130.0);
        game.update(DT);
        assert!(game.race().score > 0);
        run_out(&mut game, &clock);

        game.start(2);
        let race = game.race();
        assert_eq!(race.phase, SessionPhase::Running);
        assert_eq!(race.score, 0);
        assert!(race.objects.is_empty());
        assert!(race.effects.is_empty());
        assert!(game.result().is_none());
    }

    #[test]
    fn test_snapshot_orders_far_to_near() {
        let (mut game, _) = game(MemoryStore::new());
        game.start(1);
        game.race_mut().place_object(ObjectKind::Coin, 0, 500.0);
        game.race_mut().place_object(ObjectKind::Obstacle, 2, 2500.0);
        game.race_mut().place_object(ObjectKind::TimeBonus, 1, 1200.0);

        let snapshot = game.snapshot();
        let depths: Vec<f32> = snapshot.objects.iter().map(|o| o.depth).collect();
        assert_eq!(depths, vec![2500.0, 1200.0, 500.0]);
        assert_eq!(snapshot.speed_label(), "NORMAL");
        assert_eq!(snapshot.timer_text(), "30.0");
        assert!(!snapshot.timer_warning());
    }

    #[test]
    fn test_resize_reprojects_objects() {
        let (mut game, _) = game(MemoryStore::new());
        game.start(1);
        game.race_mut().place_object(ObjectKind::Coin, 2, 0.0);
        game.resize(1600.0, 1000.0);
        let object = &game.race().objects[0];
        assert_eq!(object.projection.screen.y, 1000.0);
    }
}
