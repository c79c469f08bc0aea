//! Keyboard mapping
//!
//! Arrow keys and A/D steer; everything else is ignored.

use crate::sim::LaneDirection;

/// Lane command for a `KeyboardEvent.key` value
pub fn lane_direction_for_key(key: &str) -> Option<LaneDirection> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(LaneDirection::Left),
        "ArrowRight" | "d" | "D" => Some(LaneDirection::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_keys() {
        assert_eq!(lane_direction_for_key("ArrowLeft"), Some(LaneDirection::Left));
        assert_eq!(lane_direction_for_key("A"), Some(LaneDirection::Left));
        assert_eq!(lane_direction_for_key("d"), Some(LaneDirection::Right));
        assert_eq!(lane_direction_for_key("ArrowRight"), Some(LaneDirection::Right));
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ["ArrowUp", " ", "Enter", "w", ""] {
            assert_eq!(lane_direction_for_key(key), None);
        }
    }
}
