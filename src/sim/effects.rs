//! Collision feedback effects
//!
//! Each interaction spawns one effect: a floating label plus a short spark
//! burst. Purely cosmetic; nothing in the race reads them back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::ObjectKind;
use crate::consts::*;

/// Whether the feedback is good news or bad news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
}

impl ObjectKind {
    pub fn feedback_tone(self) -> Tone {
        match self {
            ObjectKind::Obstacle => Tone::Negative,
            ObjectKind::Coin | ObjectKind::TimeBonus => Tone::Positive,
        }
    }

    pub fn feedback_label(self) -> &'static str {
        match self {
            ObjectKind::Obstacle => "SLOWED!",
            ObjectKind::Coin => "+100",
            ObjectKind::TimeBonus => "+15s",
        }
    }
}

/// A spark for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub size: f32,
}

impl Particle {
    /// 0-1, 1 when fresh
    pub fn life_fraction(&self) -> f32 {
        (self.life / PARTICLE_LIFE_SECS).clamp(0.0, 1.0)
    }
}

/// Floating label + spark burst for one collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEffect {
    /// What was hit or collected
    pub source: ObjectKind,
    /// Label position (screen space)
    pub pos: Vec2,
    /// Seconds left
    pub life: f32,
    pub particles: Vec<Particle>,
}

impl FeedbackEffect {
    /// Spawn at the object's projected position
    pub fn burst(source: ObjectKind, at: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLES_PER_BURST)
            .map(|_| Particle {
                pos: at,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 600.0,
                    (rng.random::<f32>() - 0.5) * 600.0 - 300.0,
                ),
                life: PARTICLE_LIFE_SECS,
                size: 2.0 + rng.random::<f32>() * 5.0,
            })
            .collect();

        // Collectible labels float a little above the pickup
        let label_lift = match source.feedback_tone() {
            Tone::Positive => 20.0,
            Tone::Negative => 0.0,
        };

        Self {
            source,
            pos: at - Vec2::new(0.0, label_lift),
            life: FLOATING_TEXT_LIFE_SECS,
            particles,
        }
    }

    pub fn tone(&self) -> Tone {
        self.source.feedback_tone()
    }

    pub fn label(&self) -> &'static str {
        self.source.feedback_label()
    }

    /// 0-1, 1 when fresh
    pub fn life_fraction(&self) -> f32 {
        (self.life / FLOATING_TEXT_LIFE_SECS).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Drift the label, fly the sparks, drop dead sparks
    pub fn age(&mut self, dt: f32) {
        self.pos.y -= FLOATING_TEXT_RISE * dt;
        self.life -= dt;

        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.vel.y += PARTICLE_GRAVITY * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
