//! Thin DOM helpers around `web_sys`. The math they feed lives in
//! `starmap_shared`, so only the conversions below are unit tested.

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Get the bounding client rect of an element by id.
pub fn element_rect(element_id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(element_id)?;
    Some(element.get_bounding_client_rect())
}

/// Container-relative coordinates of a client point, using the live layout.
pub fn client_to_element(client_x: f64, client_y: f64, element_id: &str) -> Option<(f64, f64)> {
    let rect = element_rect(element_id)?;
    Some(client_to_container(
        client_x,
        client_y,
        rect.left(),
        rect.top(),
    ))
}

/// Monotonic milliseconds for gesture timing. Falls back to 0 outside a
/// browser, which disables timing-based gestures rather than failing.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Whether the page is in a background tab.
pub fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.hidden())
        .unwrap_or(false)
}

/// Native confirmation prompt. Declines when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_container_origin() {
        let (x, y) = client_to_container(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_offset() {
        let (x, y) = client_to_container(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_negative_when_outside() {
        let (x, y) = client_to_container(10.0, 5.0, 40.0, 20.0);
        assert!((x + 30.0).abs() < 1e-9);
        assert!((y + 15.0).abs() < 1e-9);
    }
}
