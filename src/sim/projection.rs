//! Perspective projection for the pseudo-3D road
//!
//! Objects live in (depth, lane) space. The projector maps them onto the
//! screen: far objects shrink toward the horizon and the road's center line,
//! near objects grow toward the bottom edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Screen layout the road is projected into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn horizon_y(&self) -> f32 {
        self.height * HORIZON_FRACTION
    }

    /// Road width at the bottom of the screen
    #[inline]
    pub fn road_width(&self) -> f32 {
        (self.width * ROAD_WIDTH_FRACTION).min(MAX_ROAD_WIDTH)
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.road_width() / LANE_COUNT as f32
    }

    /// Horizontal offset of a lane-unit position from the road's center line
    #[inline]
    pub fn lane_offset(&self, lane_pos: f32) -> f32 {
        (lane_pos - (LANE_COUNT - 1) as f32 / 2.0) * self.lane_width()
    }

    /// Where the player's car is drawn
    pub fn player_screen_pos(&self, lane_pos: f32) -> Vec2 {
        Vec2::new(
            self.center_x() + self.lane_offset(lane_pos),
            self.height - PLAYER_BOTTOM_OFFSET,
        )
    }

    /// Inverse of `lane_offset` for a screen x at the car's row
    pub fn lane_pos_at(&self, screen_x: f32) -> f32 {
        (screen_x - self.center_x()) / self.lane_width() + (LANE_COUNT - 1) as f32 / 2.0
    }
}

/// Projected screen placement of a road object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Size multiplier (MIN_SCALE at the horizon, 1.0 at the car)
    pub scale: f32,
    pub screen: Vec2,
}

/// Linear approach factor: 0 at MAX_DEPTH, 1 at the car
#[inline]
pub fn depth_progress(depth: f32) -> f32 {
    1.0 - depth / MAX_DEPTH
}

/// Scale for a depth, floored so far objects never vanish or invert
#[inline]
pub fn scale_for_depth(depth: f32) -> f32 {
    depth_progress(depth).max(MIN_SCALE)
}

/// Project an object at `depth` in `lane` onto the screen
pub fn project(depth: f32, lane: usize, viewport: &Viewport) -> Projection {
    let progress = depth_progress(depth).clamp(0.0, 1.0);
    let scale = scale_for_depth(depth);

    let horizon = viewport.horizon_y();
    let y = horizon + (viewport.height - horizon) * progress;
    let x = viewport.center_x() + viewport.lane_offset(lane as f32) * scale;

    Projection {
        scale,
        screen: Vec2::new(x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_far_object_is_a_speck_at_horizon() {
        let vp = Viewport::new(1000.0, 800.0);
        let p = project(MAX_DEPTH, 0, &vp);
        assert_eq!(p.scale, MIN_SCALE);
        assert!((p.screen.y - vp.horizon_y()).abs() < 1e-3);
    }

    #[test]
    fn test_object_at_car_reaches_bottom() {
        let vp = Viewport::new(1000.0, 800.0);
        let p = project(0.0, 2, &vp);
        assert!((p.scale - 1.0).abs() < 1e-6);
        assert!((p.screen.y - vp.height).abs() < 1e-3);
        assert!((p.screen.x - (vp.center_x() + vp.lane_width())).abs() < 1e-3);
    }

    #[test]
    fn test_center_lane_stays_centered() {
        let vp = Viewport::default();
        for depth in [0.0, 750.0, 1500.0, 2999.0] {
            assert_eq!(project(depth, 1, &vp).screen.x, vp.center_x());
        }
    }

    #[test]
    fn test_road_width_capped() {
        let vp = Viewport::new(4000.0, 1000.0);
        assert_eq!(vp.road_width(), MAX_ROAD_WIDTH);
        assert_eq!(vp.lane_width(), MAX_ROAD_WIDTH / LANE_COUNT as f32);
    }

    #[test]
    fn test_lane_pos_roundtrip() {
        let vp = Viewport::new(900.0, 700.0);
        let x = vp.player_screen_pos(0.4).x;
        assert!((vp.lane_pos_at(x) - 0.4).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_scale_monotonic_and_floored(a in 0.0f32..MAX_DEPTH, b in 0.0f32..MAX_DEPTH) {
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(scale_for_depth(near) >= scale_for_depth(far));
            prop_assert!(scale_for_depth(far) >= MIN_SCALE);
        }

        #[test]
        fn prop_projection_deterministic(depth in 0.0f32..MAX_DEPTH, lane in 0usize..LANE_COUNT) {
            let vp = Viewport::new(1280.0, 720.0);
            prop_assert_eq!(project(depth, lane, &vp), project(depth, lane, &vp));
        }

        #[test]
        fn prop_side_lanes_converge_toward_center(
            a in 0.0f32..MAX_DEPTH,
            b in 0.0f32..MAX_DEPTH,
            right_edge in any::<bool>(),
        ) {
            let vp = Viewport::new(1280.0, 720.0);
            let lane = if right_edge { LANE_COUNT - 1 } else { 0 };
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            let near_off = (project(near, lane, &vp).screen.x - vp.center_x()).abs();
            let far_off = (project(far, lane, &vp).screen.x - vp.center_x()).abs();
            prop_assert!(far_off <= near_off + 1e-3, "{} at {} vs {} at {}", far_off, far, near_off, near);
            prop_assert!(far_off > 0.0);
        }

        #[test]
        fn prop_screen_y_between_horizon_and_bottom(depth in 0.0f32..MAX_DEPTH, lane in 0usize..LANE_COUNT) {
            let vp = Viewport::new(1280.0, 720.0);
            let p = project(depth, lane, &vp);
            prop_assert!(p.screen.y >= vp.horizon_y() - 1e-3);
            prop_assert!(p.screen.y <= vp.height + 1e-3);
        }
    }
}
