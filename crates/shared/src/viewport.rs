use crate::gesture::Intent;
use crate::grid::{self, GridCell, Transform, WORLD_SIZE};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;

pub const DEFAULT_OFFSET: (f64, f64) = (-3000.0, -3000.0);
pub const DEFAULT_SCALE: f64 = 1.0;

/// Clamp an offset so the world square is never scrolled off any edge.
///
/// Per axis the allowed range is `[container - WORLD_SIZE * scale, 0]`. When the
/// container is larger than the scaled world that range is empty and the
/// offset pins to `0`.
pub fn clamp_offset(
    offset_x: f64,
    offset_y: f64,
    scale: f64,
    container_w: f64,
    container_h: f64,
) -> (f64, f64) {
    let extent = WORLD_SIZE * scale;
    let min_x = container_w - extent;
    let min_y = container_h - extent;
    (offset_x.max(min_x).min(0.0), offset_y.max(min_y).min(0.0))
}

/// Offset that keeps the world point under `anchor` in place when the scale
/// changes from `old_scale` to `new_scale`.
pub fn zoom_offset_at_anchor(
    anchor_x: f64,
    anchor_y: f64,
    old_scale: f64,
    new_scale: f64,
    offset_x: f64,
    offset_y: f64,
) -> (f64, f64) {
    let world_x = (anchor_x - offset_x) / old_scale;
    let world_y = (anchor_y - offset_y) / old_scale;
    (anchor_x - world_x * new_scale, anchor_y - world_y * new_scale)
}

/// Visible portion of the world, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pan offset, zoom scale and container size of the map.
///
/// Every mutation ends in [`Viewport::clamp`], so the offset invariant holds
/// whenever a caller can observe it.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
    container_w: f64,
    container_h: f64,
}

impl Viewport {
    pub fn new(container_w: f64, container_h: f64) -> Self {
        Self::with_state(DEFAULT_OFFSET, DEFAULT_SCALE, container_w, container_h)
    }

    pub fn with_state(offset: (f64, f64), scale: f64, container_w: f64, container_h: f64) -> Self {
        let mut vp = Viewport {
            offset_x: offset.0,
            offset_y: offset.1,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            container_w: container_w.max(0.0),
            container_h: container_h.max(0.0),
        };
        vp.clamp();
        vp
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn container_size(&self) -> (f64, f64) {
        (self.container_w, self.container_h)
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.offset_x, self.offset_y, self.scale)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.container_w / 2.0, self.container_h / 2.0)
    }

    /// Shift by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
        self.clamp();
    }

    /// Set the offset to `origin + delta`. Drags use this with the offset
    /// captured at pointer-down so repeated clamping cannot accumulate drift.
    pub fn pan_from(&mut self, origin: (f64, f64), dx: f64, dy: f64) {
        self.offset_x = origin.0 + dx;
        self.offset_y = origin.1 + dy;
        self.clamp();
    }

    /// Multiply the scale by `factor`, keeping the world point under the
    /// screen anchor fixed.
    pub fn zoom_at(&mut self, anchor_x: f64, anchor_y: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let (ox, oy) = zoom_offset_at_anchor(
            anchor_x,
            anchor_y,
            old_scale,
            new_scale,
            self.offset_x,
            self.offset_y,
        );
        self.scale = new_scale;
        self.offset_x = ox;
        self.offset_y = oy;
        self.clamp();
    }

    /// Center the container on a grid cell at the current scale.
    pub fn jump_to(&mut self, cell: GridCell) {
        let (wx, wy) = grid::grid_to_world(cell);
        let (cx, cy) = self.center();
        self.offset_x = cx - wx * self.scale;
        self.offset_y = cy - wy * self.scale;
        self.clamp();
    }

    pub fn resize(&mut self, container_w: f64, container_h: f64) {
        self.container_w = container_w.max(0.0);
        self.container_h = container_h.max(0.0);
        self.clamp();
    }

    /// Apply a viewport intent. Returns false for intents that are not
    /// about the viewport (taps, long-presses) and leaves state untouched.
    pub fn apply(&mut self, intent: &Intent) -> bool {
        match *intent {
            Intent::PanBy { origin, dx, dy } => {
                self.pan_from(origin, dx, dy);
                true
            }
            Intent::ZoomAt { x, y, factor } => {
                self.zoom_at(x, y, factor);
                true
            }
            _ => false,
        }
    }

    pub fn visible_world_rect(&self) -> WorldRect {
        let (left, top) = self.transform().screen_to_world(0.0, 0.0);
        WorldRect {
            left,
            top,
            width: self.container_w / self.scale,
            height: self.container_h / self.scale,
        }
    }

    fn clamp(&mut self) {
        let (x, y) = clamp_offset(
            self.offset_x,
            self.offset_y,
            self.scale,
            self.container_w,
            self.container_h,
        );
        self.offset_x = x;
        self.offset_y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_new_uses_default_state() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.offset(), DEFAULT_OFFSET);
        assert!((vp.scale() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_clamp_prevents_positive_offset() {
        let (x, y) = clamp_offset(50.0, 10.0, 1.0, 800.0, 600.0);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn test_clamp_prevents_scrolling_past_far_edge() {
        let (x, y) = clamp_offset(-70_000.0, -70_000.0, 1.0, 800.0, 600.0);
        assert!((x - (800.0 - WORLD_SIZE)).abs() < EPS);
        assert!((y - (600.0 - WORLD_SIZE)).abs() < EPS);
    }

    #[test]
    fn test_clamp_container_larger_than_world_pins_to_zero() {
        // At 0.1 the world is 6000px wide, narrower than this container
        let (x, y) = clamp_offset(-100.0, 40.0, 0.1, 8000.0, 7000.0);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn test_clamp_idempotent() {
        let cases = [
            (-70_000.0, 300.0, 1.0, 800.0, 600.0),
            (-1234.5, -99.0, 2.5, 1920.0, 1080.0),
            (-5.0, -5.0, 0.1, 8000.0, 100.0),
            (12.0, -30_000.0, 0.37, 640.0, 480.0),
        ];
        for (ox, oy, s, w, h) in cases {
            let once = clamp_offset(ox, oy, s, w, h);
            let twice = clamp_offset(once.0, once.1, s, w, h);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_pan_by_accumulates_and_clamps() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan_by(100.0, -50.0);
        assert_eq!(vp.offset(), (-2900.0, -3050.0));
        vp.pan_by(10_000.0, 0.0);
        assert_eq!(vp.offset().0, 0.0);
    }

    #[test]
    fn test_pan_from_uses_origin() {
        let mut vp = Viewport::new(800.0, 600.0);
        let origin = vp.offset();
        vp.pan_from(origin, 10.0, 10.0);
        vp.pan_from(origin, 20.0, 5.0);
        assert_eq!(vp.offset(), (-2980.0, -2995.0));
    }

    #[test]
    fn test_pan_from_no_drift_after_clamped_overshoot() {
        let mut vp = Viewport::with_state((-100.0, -100.0), 1.0, 800.0, 600.0);
        let origin = vp.offset();
        // Overshoot past the left edge then come back
        vp.pan_from(origin, 500.0, 0.0);
        assert_eq!(vp.offset().0, 0.0);
        vp.pan_from(origin, 50.0, 0.0);
        assert_eq!(vp.offset().0, -50.0);
    }

    #[test]
    fn test_zoom_preserves_anchor() {
        let mut vp = Viewport::new(800.0, 600.0);
        let anchor = (321.0, 123.0);
        let before = vp.transform().screen_to_world(anchor.0, anchor.1);
        vp.zoom_at(anchor.0, anchor.1, 1.7);
        let after = vp.transform().screen_to_world(anchor.0, anchor.1);
        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
        assert!((vp.scale() - 1.7).abs() < EPS);
    }

    #[test]
    fn test_zoom_out_preserves_anchor() {
        let mut vp = Viewport::with_state((-20_000.0, -20_000.0), 2.0, 1024.0, 768.0);
        let before = vp.transform().screen_to_world(512.0, 384.0);
        vp.zoom_at(512.0, 384.0, 0.5);
        let after = vp.transform().screen_to_world(512.0, 384.0);
        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
    }

    #[test]
    fn test_zoom_scale_bounds() {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..100 {
            vp.zoom_at(400.0, 300.0, 1.5);
            assert!(vp.scale() <= MAX_SCALE);
        }
        assert!((vp.scale() - MAX_SCALE).abs() < EPS);
        for _ in 0..100 {
            vp.zoom_at(400.0, 300.0, 0.5);
            assert!(vp.scale() >= MIN_SCALE);
        }
        assert!((vp.scale() - MIN_SCALE).abs() < EPS);
    }

    #[test]
    fn test_zoom_ignores_bad_factor() {
        let mut vp = Viewport::new(800.0, 600.0);
        let before = vp.clone();
        vp.zoom_at(10.0, 10.0, 0.0);
        vp.zoom_at(10.0, 10.0, f64::NAN);
        vp.zoom_at(10.0, 10.0, -2.0);
        assert_eq!(vp, before);
    }

    #[test]
    fn test_zoom_result_is_clamped() {
        // Zooming out near the origin must not leave a positive offset
        let mut vp = Viewport::with_state((0.0, 0.0), 1.0, 800.0, 600.0);
        vp.zoom_at(400.0, 300.0, 0.5);
        let (x, y) = vp.offset();
        assert!(x <= 0.0 && y <= 0.0);
    }

    #[test]
    fn test_jump_to_centers_cell() {
        let mut vp = Viewport::with_state((-3000.0, -3000.0), 1.0, 800.0, 600.0);
        let cell = GridCell::new(10, 5);
        vp.jump_to(cell);
        let (wx, wy) = grid::grid_to_world(cell);
        let (sx, sy) = vp.transform().world_to_screen(wx, wy);
        assert!((sx - 400.0).abs() < EPS);
        assert!((sy - 300.0).abs() < EPS);
    }

    #[test]
    fn test_jump_to_respects_scale() {
        let mut vp = Viewport::with_state((-3000.0, -3000.0), 2.0, 800.0, 600.0);
        vp.jump_to(GridCell::new(100, 100));
        let (sx, sy) = vp.transform().world_to_screen(12_000.0, 12_000.0);
        assert!((sx - 400.0).abs() < EPS);
        assert!((sy - 300.0).abs() < EPS);
        assert!((vp.scale() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_jump_to_origin_is_clamped() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.jump_to(GridCell::new(0, 0));
        assert_eq!(vp.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_resize_reclamps() {
        let mut vp = Viewport::with_state((800.0 - WORLD_SIZE, 0.0), 1.0, 800.0, 600.0);
        vp.resize(1600.0, 600.0);
        assert!((vp.offset().0 - (1600.0 - WORLD_SIZE)).abs() < EPS);
    }

    #[test]
    fn test_apply_ignores_non_viewport_intents() {
        let mut vp = Viewport::new(800.0, 600.0);
        let before = vp.clone();
        assert!(!vp.apply(&Intent::TapAt(GridCell::new(1, 1))));
        assert!(!vp.apply(&Intent::LongPressMarker(4)));
        assert_eq!(vp, before);
    }

    #[test]
    fn test_apply_pan_and_zoom() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(vp.apply(&Intent::PanBy {
            origin: (-3000.0, -3000.0),
            dx: 30.0,
            dy: -30.0
        }));
        assert_eq!(vp.offset(), (-2970.0, -3030.0));
        assert!(vp.apply(&Intent::ZoomAt {
            x: 400.0,
            y: 300.0,
            factor: 2.0
        }));
        assert!((vp.scale() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_visible_world_rect() {
        let vp = Viewport::with_state((-3000.0, -1500.0), 2.0, 800.0, 600.0);
        let r = vp.visible_world_rect();
        assert!((r.left - 1500.0).abs() < EPS);
        assert!((r.top - 750.0).abs() < EPS);
        assert!((r.width - 400.0).abs() < EPS);
        assert!((r.height - 300.0).abs() < EPS);
    }
}
