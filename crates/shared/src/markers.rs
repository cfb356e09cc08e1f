use thiserror::Error;

use crate::gesture::HitTarget;
use crate::grid::{self, GridCell, Transform};
use crate::models::Marker;

/// Markers are drawn as a 50x50 screen-pixel box centered on their cell corner.
pub const MARKER_SIZE: f64 = 50.0;
pub const MARKER_CENTER_OFFSET: f64 = MARKER_SIZE / 2.0;

/// How long the jump highlight stays on screen.
pub const JUMP_HIGHLIGHT_MS: u32 = 5_000;

/// Top-left screen position of a marker's box.
pub fn marker_screen_position(marker: &Marker, transform: &Transform) -> (f64, f64) {
    let (wx, wy) = grid::grid_to_world(GridCell::new(marker.x, marker.y));
    let (sx, sy) = transform.world_to_screen(wx, wy);
    (sx - MARKER_CENTER_OFFSET, sy - MARKER_CENTER_OFFSET)
}

/// Which marker, if any, is under a screen point. Later markers are drawn on
/// top, so they win ties.
pub fn hit_test(markers: &[Marker], x: f64, y: f64, transform: &Transform) -> HitTarget {
    markers
        .iter()
        .rev()
        .find(|m| {
            let (left, top) = marker_screen_position(m, transform);
            x >= left && x < left + MARKER_SIZE && y >= top && y < top + MARKER_SIZE
        })
        .map_or(HitTarget::Grid, |m| HitTarget::Marker(m.id))
}

/// Display label: the name, or the coordinates for unnamed markers.
pub fn marker_label(marker: &Marker) -> String {
    match marker.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("({}, {})", marker.x, marker.y),
    }
}

/// Hover text for a marker: its details, or a placeholder when it has none.
pub fn marker_details(marker: &Marker) -> &str {
    match marker.details.as_deref() {
        Some(details) if !details.trim().is_empty() => details,
        _ => "No details",
    }
}

/// Star list contents: markers whose label or details contain `query`
/// (case-insensitive), sorted by label.
pub fn filter_markers<'a>(markers: &'a [Marker], query: &str) -> Vec<&'a Marker> {
    let needle = query.trim().to_lowercase();
    let mut hits: Vec<(String, &Marker)> = markers
        .iter()
        .filter_map(|m| {
            let label = marker_label(m).to_lowercase();
            let haystack = format!("{} {}", label, m.details.as_deref().unwrap_or("")).to_lowercase();
            haystack.contains(&needle).then_some((label, m))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0));
    hits.into_iter().map(|(_, m)| m).collect()
}

/// Whether a freshly fetched list differs from what is on screen.
pub fn markers_changed(current: &[Marker], fetched: &[Marker]) -> bool {
    current != fetched
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JumpError {
    #[error("Please enter valid coordinates")]
    InvalidCoordinates,
}

/// Parse the jump-to form fields into a grid cell.
pub fn parse_jump_target(x: &str, y: &str) -> Result<GridCell, JumpError> {
    let gx = x
        .trim()
        .parse::<i64>()
        .map_err(|_| JumpError::InvalidCoordinates)?;
    let gy = y
        .trim()
        .parse::<i64>()
        .map_err(|_| JumpError::InvalidCoordinates)?;
    Ok(GridCell::new(gx, gy))
}
