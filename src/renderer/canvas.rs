//! Canvas2D renderer (wasm builds)

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::RenderSink;
use super::shapes::{CAR_SIZE, lane_markings, object_size, road_quad};
use crate::session::Snapshot;
use crate::settings::Settings;
use crate::sim::{ObjectKind, SessionPhase, SpeedState, Tone};

const SKY: &str = "#16213e";
const ROAD: &str = "#2c3e50";
const MARKING: &str = "#ecf0f1";
const CAR: &str = "#e74c3c";
const OBSTACLE: &str = "#e74c3c";
const COIN: &str = "#f1c40f";
const TIME_BONUS: &str = "#3498db";

fn kind_color(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Obstacle => OBSTACLE,
        ObjectKind::Coin => COIN,
        ObjectKind::TimeBonus => TIME_BONUS,
    }
}

/// Draws snapshots onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub settings: Settings,
    /// Cheap per-frame jitter for speed lines
    frame: u32,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, settings: Settings) -> Self {
        Self {
            ctx,
            settings,
            frame: 0,
        }
    }

    fn draw_road(&self, snapshot: &Snapshot<'_>) {
        let vp = &snapshot.viewport;
        let ctx = &self.ctx;

        ctx.set_fill_style_str(SKY);
        ctx.fill_rect(0.0, 0.0, vp.width as f64, vp.height as f64);

        let quad = road_quad(vp);
        ctx.set_fill_style_str(ROAD);
        ctx.begin_path();
        ctx.move_to(quad.top_left.x as f64, quad.top_left.y as f64);
        ctx.line_to(quad.top_right.x as f64, quad.top_right.y as f64);
        ctx.line_to(quad.bottom_right.x as f64, quad.bottom_right.y as f64);
        ctx.line_to(quad.bottom_left.x as f64, quad.bottom_left.y as f64);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str(MARKING);
        for dash in lane_markings(vp, snapshot.marking_offset) {
            ctx.fill_rect(
                (dash.top.x - dash.width / 2.0) as f64,
                dash.top.y as f64,
                dash.width as f64,
                dash.length as f64,
            );
        }
    }

    fn draw_objects(&self, snapshot: &Snapshot<'_>) {
        let ctx = &self.ctx;
        for object in &snapshot.objects {
            let size = object_size(&object.projection) as f64;
            let (x, y) = (
                object.projection.screen.x as f64,
                object.projection.screen.y as f64,
            );
            ctx.set_fill_style_str(kind_color(object.kind));
            match object.kind {
                ObjectKind::Obstacle => ctx.fill_rect(x - size / 2.0, y - size, size, size),
                ObjectKind::Coin | ObjectKind::TimeBonus => {
                    ctx.begin_path();
                    let _ = ctx.arc(x, y - size / 2.0, size / 2.0, 0.0, TAU);
                    ctx.fill();
                }
            }
        }
    }

    fn draw_player(&self, snapshot: &Snapshot<'_>) {
        let pos = snapshot.player_screen;
        self.ctx.set_fill_style_str(CAR);
        if snapshot.player.speed_state == SpeedState::Slowed {
            self.ctx.set_global_alpha(0.6);
        }
        self.ctx.fill_rect(
            (pos.x - CAR_SIZE.x / 2.0) as f64,
            (pos.y - CAR_SIZE.y / 2.0) as f64,
            CAR_SIZE.x as f64,
            CAR_SIZE.y as f64,
        );
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_effects(&self, snapshot: &Snapshot<'_>) {
        let ctx = &self.ctx;
        ctx.set_font("bold 24px sans-serif");
        ctx.set_text_align("center");
        for effect in snapshot.effects {
            let color = match effect.tone() {
                Tone::Positive => kind_color(effect.source),
                Tone::Negative => OBSTACLE,
            };
            ctx.set_fill_style_str(color);

            if self.settings.effective_particles() {
                for p in &effect.particles {
                    ctx.set_global_alpha(p.life_fraction() as f64);
                    ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
                }
            }

            ctx.set_global_alpha(effect.life_fraction() as f64);
            let _ = ctx.fill_text(effect.label(), effect.pos.x as f64, effect.pos.y as f64);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_speed_lines(&mut self, snapshot: &Snapshot<'_>) {
        if !self.settings.effective_speed_lines()
            || snapshot.phase != SessionPhase::Running
            || snapshot.player.speed_state == SpeedState::Slowed
        {
            return;
        }
        self.frame = self.frame.wrapping_add(1);
        let vp = &snapshot.viewport;
        self.ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
        self.ctx.set_line_width(2.0);
        for i in 0..10u32 {
            let hash = self.frame.wrapping_mul(2654435761).wrapping_add(i * 7919);
            let x = (hash % 1000) as f64 / 1000.0 * vp.width as f64;
            let y = ((hash >> 10) % 1000) as f64 / 1000.0 * vp.height as f64;
            let len = 50.0 + ((hash >> 20) % 100) as f64;
            self.ctx.begin_path();
            self.ctx.move_to(x, y);
            self.ctx.line_to(x, y + len);
            self.ctx.stroke();
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.draw_road(snapshot);
        self.draw_objects(snapshot);
        self.draw_player(snapshot);
        self.draw_effects(snapshot);
        self.draw_speed_lines(snapshot);
    }
}
