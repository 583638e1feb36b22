//! Rectangular scene bounds for the collision table
//!
//! The table spans from the origin to (width, height). A disk is inside
//! when its whole extent (center ± radius) lies within the rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{TABLE_HEIGHT, TABLE_WIDTH};

/// Which cushions a body touched during containment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub x: bool,
    pub y: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Axis-aligned scene rectangle anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new(TABLE_WIDTH, TABLE_HEIGHT)
    }
}

impl SceneBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a disk back inside the scene, reflecting the offending velocity
    /// component scaled by `restitution`.
    ///
    /// Each axis is handled independently, low edge first, so a disk wider
    /// than the scene ends pinned against the high edge.
    pub fn contain(
        &self,
        pos: &mut Vec2,
        vel: &mut Vec2,
        radius: f32,
        restitution: f32,
    ) -> WallHits {
        let mut hits = WallHits::default();

        if pos.x - radius < 0.0 {
            pos.x = radius;
            vel.x = -vel.x * restitution;
            hits.x = true;
        }
        if pos.x + radius > self.width {
            pos.x = self.width - radius;
            vel.x = -vel.x * restitution;
            hits.x = true;
        }
        if pos.y - radius < 0.0 {
            pos.y = radius;
            vel.y = -vel.y * restitution;
            hits.y = true;
        }
        if pos.y + radius > self.height {
            pos.y = self.height - radius;
            vel.y = -vel.y * restitution;
            hits.y = true;
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_inside_is_untouched() {
        let bounds = SceneBounds::default();
        let mut pos = Vec2::new(350.0, 200.0);
        let mut vel = Vec2::new(3.0, -1.0);

        let hits = bounds.contain(&mut pos, &mut vel, 20.0, 0.8);
        assert!(!hits.any());
        assert_eq!(pos, Vec2::new(350.0, 200.0));
        assert_eq!(vel, Vec2::new(3.0, -1.0));
    }

    #[test]
    fn test_contain_right_wall() {
        let bounds = SceneBounds::default();
        let mut pos = Vec2::new(695.0, 200.0);
        let mut vel = Vec2::new(10.0, 0.0);

        let hits = bounds.contain(&mut pos, &mut vel, 20.0, 0.8);
        assert!(hits.x && !hits.y);
        assert!((pos.x - 680.0).abs() < 1e-5);
        assert!((vel.x - (-8.0)).abs() < 1e-5);
    }

    #[test]
    fn test_contain_top_left_corner() {
        let bounds = SceneBounds::default();
        let mut pos = Vec2::new(-5.0, 3.0);
        let mut vel = Vec2::new(-4.0, -2.0);

        let hits = bounds.contain(&mut pos, &mut vel, 15.0, 0.5);
        assert!(hits.x && hits.y);
        assert_eq!(pos, Vec2::new(15.0, 15.0));
        assert!((vel.x - 2.0).abs() < 1e-5);
        assert!((vel.y - 1.0).abs() < 1e-5);
    }
}
