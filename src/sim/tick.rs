//! Per-frame simulation step
//!
//! Advances the race by a variable `dt` (seconds). The host calls this once per
//! rendered frame while the race is running and not paused.

use super::effects::FeedbackEffect;
use super::state::{GameEvent, ObjectKind, RaceState, RoadObject, SessionPhase};
use crate::consts::*;

/// Advance the race by `dt` seconds and report what happened.
///
/// Non-positive (or NaN) `dt` is a no-op, as is ticking a race that is not
/// running.
pub fn tick(state: &mut RaceState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != SessionPhase::Running || !(dt > 0.0) {
        return events;
    }

    // Countdown
    state.time_remaining -= dt;
    if state.time_remaining <= 0.0 {
        state.time_remaining = 0.0;
        state.phase = SessionPhase::Ended;
        events.push(GameEvent::TimeUp);
        return events;
    }

    // Slow effect
    if state.player.tick_slow(dt) {
        log::debug!("Slow effect expired");
        events.push(GameEvent::SlowExpired);
    }

    let speed = state.player.speed();

    state.player.move_toward_target(dt);
    state.distance += speed * dt;

    if state.schedule.advance(dt) {
        let next_in = state.schedule.interval;
        let object = state.spawn_object();
        log::debug!(
            "Spawned {:?} #{} in lane {} (next in {:.2}s)",
            object.kind,
            object.id,
            object.lane,
            next_in
        );
        events.push(GameEvent::Spawned {
            id: object.id,
            kind: object.kind,
            lane: object.lane,
        });
    }

    advance_objects(state, speed * dt, &mut events);

    for effect in &mut state.effects {
        effect.age(dt);
    }
    state.effects.retain(FeedbackEffect::is_alive);

    events
}

/// Move every object toward the car, retire the ones that passed, and resolve
/// collisions against the lane the car currently occupies on screen.
fn advance_objects(state: &mut RaceState, distance: f32, events: &mut Vec<GameEvent>) {
    let viewport = state.viewport;
    let player_lane = state.player.effective_lane();
    let mut hits: Vec<RoadObject> = Vec::new();

    state.objects = std::mem::take(&mut state.objects)
        .into_iter()
        .filter_map(|mut object| {
            object.advance(distance, &viewport);

            if object.depth <= 0.0 {
                events.push(GameEvent::Passed { id: object.id });
                return None;
            }

            if object.in_collision_band() && object.lane == player_lane && !object.collected {
                object.collected = true;
                hits.push(object);
                return None;
            }

            Some(object)
        })
        .collect();

    for object in &hits {
        resolve_collision(state, object, events);
    }
}

/// Apply the outcome for one object the car ran into
fn resolve_collision(state: &mut RaceState, object: &RoadObject, events: &mut Vec<GameEvent>) {
    let (id, lane) = (object.id, object.lane);

    let event = match object.kind {
        ObjectKind::Obstacle => {
            state.player.slow_down();
            GameEvent::ObstacleHit { id, lane }
        }
        ObjectKind::Coin => {
            state.score = state.score.saturating_add(COIN_SCORE);
            GameEvent::CoinCollected { id, lane }
        }
        ObjectKind::TimeBonus => {
            state.time_remaining += TIME_BONUS_SECS;
            GameEvent::TimeBonusCollected { id, lane }
        }
    };
    log::debug!("{:?} (score {}, {:.1}s left)", event, state.score, state.time_remaining);
    events.push(event);

    let effect = FeedbackEffect::burst(object.kind, object.projection.screen, state.spawner.rng());
    state.effects.push(effect);
}
