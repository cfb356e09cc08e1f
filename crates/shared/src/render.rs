use crate::grid::CELL_SIZE;
use crate::viewport::Viewport;

/// Background grid geometry for one frame, in world pixels.
///
/// Lines span `[start, end]` on each axis. `end` reaches one cell past the
/// visible far edge so panning never exposes an unlined strip.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    pub start_x: f64,
    pub end_x: f64,
    pub start_y: f64,
    pub end_y: f64,
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
    /// World-space stroke width that renders as 1 screen pixel.
    pub line_width: f64,
}

/// First line at or before a visible edge.
pub fn first_line_at_or_before(edge: f64) -> f64 {
    (edge / CELL_SIZE).floor() * CELL_SIZE
}

fn line_positions(start: f64, end: f64) -> Vec<f64> {
    let count = ((end - start) / CELL_SIZE).floor().max(0.0) as usize;
    (0..=count).map(|i| start + i as f64 * CELL_SIZE).collect()
}

pub fn grid_lines(viewport: &Viewport) -> GridLines {
    let visible = viewport.visible_world_rect();
    let start_x = first_line_at_or_before(visible.left);
    let start_y = first_line_at_or_before(visible.top);
    let end_x = start_x + visible.width + CELL_SIZE;
    let end_y = start_y + visible.height + CELL_SIZE;

    GridLines {
        start_x,
        end_x,
        start_y,
        end_y,
        vertical: line_positions(start_x, end_x),
        horizontal: line_positions(start_y, end_y),
        line_width: 1.0 / viewport.scale(),
    }
}
