//! Star map coordinate system.
//!
//! Three spaces are in play:
//! - screen: pixels relative to the top-left corner of the map container
//! - world: the fixed 60000x60000 pixel plane markers live in
//! - grid: integer 120x120 world-pixel cells, which is what markers snap to
use std::fmt;

use serde::{Deserialize, Serialize};

// Grid cell edge length in world pixels
pub const CELL_SIZE: f64 = 120.0;

// World is a square of this many pixels per side, origin at the top-left
pub const WORLD_SIZE: f64 = 60_000.0;

/// An integer grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    pub fn new(x: i64, y: i64) -> Self {
        GridCell { x, y }
    }

    /// Markers may only be created in the non-negative quadrant.
    pub fn is_placeable(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// World-to-screen mapping: `screen = world * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Transform {
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Transform {
            offset_x,
            offset_y,
            scale,
        }
    }

    /// Convert container-relative screen pixels to world pixels.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    /// Convert world pixels to container-relative screen pixels.
    pub fn world_to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            world_x * self.scale + self.offset_x,
            world_y * self.scale + self.offset_y,
        )
    }

    /// The grid cell under a screen point.
    pub fn screen_to_grid(&self, screen_x: f64, screen_y: f64) -> GridCell {
        let (wx, wy) = self.screen_to_world(screen_x, screen_y);
        world_to_grid(wx, wy)
    }
}

/// Convert world pixels to the containing grid cell (floor, so -1px is cell -1).
pub fn world_to_grid(world_x: f64, world_y: f64) -> GridCell {
    GridCell {
        x: (world_x / CELL_SIZE).floor() as i64,
        y: (world_y / CELL_SIZE).floor() as i64,
    }
}

/// World position of a grid cell's top-left corner.
pub fn grid_to_world(cell: GridCell) -> (f64, f64) {
    (cell.x as f64 * CELL_SIZE, cell.y as f64 * CELL_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_screen_to_world_identity() {
        let t = Transform::new(0.0, 0.0, 1.0);
        let (wx, wy) = t.screen_to_world(250.0, 40.0);
        assert!((wx - 250.0).abs() < EPS);
        assert!((wy - 40.0).abs() < EPS);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_scale() {
        let t = Transform::new(-3000.0, -1000.0, 2.0);
        let (wx, wy) = t.screen_to_world(400.0, 300.0);
        assert!((wx - 1700.0).abs() < EPS);
        assert!((wy - 650.0).abs() < EPS);
    }

    #[test]
    fn test_world_screen_roundtrip() {
        let transforms = [
            Transform::new(0.0, 0.0, 1.0),
            Transform::new(-3000.0, -3000.0, 1.0),
            Transform::new(-123.45, -9876.5, 0.1),
            Transform::new(-59_000.0, -2.5, 3.0),
            Transform::new(-17.0, -42.0, 0.737),
        ];
        let points = [(0.0, 0.0), (1.5, 2.25), (30_000.0, 59_999.0), (-50.0, 777.7)];
        for t in &transforms {
            for &(x, y) in &points {
                let (sx, sy) = t.world_to_screen(x, y);
                let (wx, wy) = t.screen_to_world(sx, sy);
                assert!((wx - x).abs() < 1e-6, "x roundtrip failed for {t:?}");
                assert!((wy - y).abs() < 1e-6, "y roundtrip failed for {t:?}");
            }
        }
    }

    #[test]
    fn test_grid_inverse() {
        for gx in [-500, -1, 0, 1, 7, 499, 10_000] {
            for gy in [-3, 0, 5, 499] {
                let cell = GridCell::new(gx, gy);
                let (wx, wy) = grid_to_world(cell);
                assert_eq!(world_to_grid(wx, wy), cell);
            }
        }
    }

    #[test]
    fn test_world_to_grid_floors_negative() {
        assert_eq!(world_to_grid(-1.0, -0.01), GridCell::new(-1, -1));
        assert_eq!(world_to_grid(-120.0, 0.0), GridCell::new(-1, 0));
        assert_eq!(world_to_grid(-120.5, 0.0), GridCell::new(-2, 0));
    }

    #[test]
    fn test_world_to_grid_cell_interior() {
        assert_eq!(world_to_grid(0.0, 0.0), GridCell::new(0, 0));
        assert_eq!(world_to_grid(119.99, 239.99), GridCell::new(0, 1));
        assert_eq!(world_to_grid(120.0, 240.0), GridCell::new(1, 2));
    }

    #[test]
    fn test_screen_to_grid() {
        let t = Transform::new(-3000.0, -3000.0, 1.0);
        // screen (0,0) is world (3000,3000) = cell (25,25)
        assert_eq!(t.screen_to_grid(0.0, 0.0), GridCell::new(25, 25));
        assert_eq!(t.screen_to_grid(130.0, 10.0), GridCell::new(26, 25));
    }

    #[test]
    fn test_is_placeable() {
        assert!(GridCell::new(0, 0).is_placeable());
        assert!(GridCell::new(12, 499).is_placeable());
        assert!(!GridCell::new(-1, 3).is_placeable());
        assert!(!GridCell::new(3, -1).is_placeable());
    }

    #[test]
    fn test_grid_cell_display() {
        assert_eq!(GridCell::new(10, -5).to_string(), "10, -5");
    }
}
