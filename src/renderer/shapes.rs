//! Road geometry for 2D drawing
//!
//! Pure functions of the viewport and scroll offset, so they work the same
//! in the browser and in tests.

use glam::Vec2;

use crate::consts::{LANE_COUNT, MARKING_SPACING};
use crate::sim::{Projection, Viewport};

/// Road width at the horizon relative to the bottom
const ROAD_TOP_FRACTION: f32 = 0.1;
/// Base object size before perspective scaling (pixels)
pub const OBJECT_BASE_SIZE: f32 = 60.0;
/// Player car footprint (pixels)
pub const CAR_SIZE: Vec2 = Vec2::new(60.0, 100.0);

/// Road surface as a trapezoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadQuad {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_right: Vec2,
    pub bottom_left: Vec2,
}

/// One dash of a lane divider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingDash {
    pub top: Vec2,
    pub length: f32,
    pub width: f32,
}

/// Road width at a screen row (`progress` 0 = horizon, 1 = bottom)
pub fn road_width_at(viewport: &Viewport, progress: f32) -> f32 {
    let bottom = viewport.road_width();
    let top = bottom * ROAD_TOP_FRACTION;
    top + (bottom - top) * progress.clamp(0.0, 1.0)
}

pub fn road_quad(viewport: &Viewport) -> RoadQuad {
    let cx = viewport.center_x();
    let top = road_width_at(viewport, 0.0) / 2.0;
    let bottom = road_width_at(viewport, 1.0) / 2.0;
    let horizon = viewport.horizon_y();
    RoadQuad {
        top_left: Vec2::new(cx - top, horizon),
        top_right: Vec2::new(cx + top, horizon),
        bottom_right: Vec2::new(cx + bottom, viewport.height),
        bottom_left: Vec2::new(cx - bottom, viewport.height),
    }
}

/// Dashes for every lane divider, scrolled by `offset`
pub fn lane_markings(viewport: &Viewport, offset: f32) -> Vec<MarkingDash> {
    let horizon = viewport.horizon_y();
    let span = viewport.height - horizon;
    let count = (span / MARKING_SPACING).ceil() as i32 + 2;
    let period = count as f32 * MARKING_SPACING;

    let mut dashes = Vec::new();
    for divider in 1..LANE_COUNT {
        let lane_offset = divider as f32 / LANE_COUNT as f32 - 0.5;
        for j in -1..count {
            let y = horizon + (j as f32 * MARKING_SPACING + offset).rem_euclid(period);
            if y <= horizon || y >= viewport.height {
                continue;
            }
            let progress = (y - horizon) / span;
            dashes.push(MarkingDash {
                top: Vec2::new(
                    viewport.center_x() + lane_offset * road_width_at(viewport, progress),
                    y,
                ),
                length: MARKING_SPACING * 0.4 * progress,
                width: 4.0 * progress,
            });
        }
    }
    dashes
}

/// On-screen size of a projected object
pub fn object_size(projection: &Projection) -> f32 {
    OBJECT_BASE_SIZE * projection.scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_road_narrows_toward_horizon() {
        let vp = Viewport::new(1000.0, 800.0);
        let quad = road_quad(&vp);
        let top = quad.top_right.x - quad.top_left.x;
        let bottom = quad.bottom_right.x - quad.bottom_left.x;
        assert!((bottom - vp.road_width()).abs() < 1e-3);
        assert!((top - vp.road_width() * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_markings_stay_on_road() {
        let vp = Viewport::new(1000.0, 800.0);
        for offset in [0.0, 37.5, 99.9] {
            let dashes = lane_markings(&vp, offset);
            assert!(!dashes.is_empty());
            for dash in dashes {
                assert!(dash.top.y > vp.horizon_y() && dash.top.y < vp.height);
                let half = road_width_at(&vp, 1.0) / 2.0;
                assert!((dash.top.x - vp.center_x()).abs() < half);
            }
        }
    }

    #[test]
    fn test_markings_scroll_with_offset() {
        let vp = Viewport::default();
        assert_ne!(lane_markings(&vp, 0.0), lane_markings(&vp, 50.0));
    }
}
