use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use starmap_shared::gesture::{self, GestureInterpreter, Intent, PointerEvent, PointerPhase};
use starmap_shared::grid::{self, GridCell, Transform};
use starmap_shared::markers::{
    hit_test, marker_details, marker_label, marker_screen_position, MARKER_SIZE,
};
use starmap_shared::models::{Marker, MarkerId};
use starmap_shared::render::{self, GridLines};
use starmap_shared::viewport::Viewport;

use crate::coords;

pub const MAP_CONTAINER_ID: &str = "star-map-container";

/// Diameter of the ring drawn around a jumped-to cell, in screen pixels.
const HIGHLIGHT_SIZE: f64 = 80.0;

/// Offset of the hover readout from the cursor.
const TOOLTIP_OFFSET: f64 = 14.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Resize the viewport to the live container, if it is laid out.
fn sync_container_size(viewport: &mut Signal<Viewport>) {
    let Some(rect) = coords::element_rect(MAP_CONTAINER_ID) else {
        return;
    };
    let (w, h) = (rect.width(), rect.height());
    if viewport.read().container_size() != (w, h) {
        viewport.write().resize(w, h);
    }
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Mouse presses and releases only count for the primary button. Touch, pen
/// and mouse moves always pass.
fn accepts_button(pointer_type: &str, phase: PointerPhase, button: Option<MouseButton>) -> bool {
    if pointer_type != "mouse" {
        return true;
    }
    match phase {
        PointerPhase::Down | PointerPhase::Up => button == Some(MouseButton::Primary),
        PointerPhase::Move | PointerPhase::Cancel => true,
    }
}

fn pointer_event(
    data: &PointerData,
    phase: PointerPhase,
    marker_list: &[Marker],
    transform: &Transform,
) -> Option<PointerEvent> {
    if !accepts_button(&data.pointer_type(), phase, data.trigger_button()) {
        return None;
    }
    let client = data.client_coordinates();
    let (x, y) = coords::client_to_element(client.x, client.y, MAP_CONTAINER_ID)?;
    let target = hit_test(marker_list, x, y, transform);
    Some(
        PointerEvent::new(data.pointer_id(), x, y, phase, coords::now_ms())
            .on(target)
            .with_ctrl(data.modifiers().ctrl()),
    )
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

/// Build the grid overlay as an SVG string. Lines are laid out in world
/// pixels inside a group carrying the viewport transform.
fn build_grid_svg(lines: &GridLines, transform: &Transform) -> String {
    let mut svg = String::with_capacity(64 * (lines.vertical.len() + lines.horizontal.len()));
    let ox = transform.offset_x;
    let oy = transform.offset_y;
    let s = transform.scale;
    let sw = lines.line_width;

    svg.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" class="grid-layer">"#);
    svg.push_str(&format!(
        r#"<g transform="translate({ox} {oy}) scale({s})" stroke="rgba(255,255,255,0.12)" stroke-width="{sw}">"#
    ));
    build_vertical_lines(&mut svg, lines);
    build_horizontal_lines(&mut svg, lines);
    svg.push_str("</g></svg>");
    svg
}

fn build_vertical_lines(svg: &mut String, lines: &GridLines) {
    let (y1, y2) = (lines.start_y, lines.end_y);
    for &x in &lines.vertical {
        svg.push_str(&format!(r#"<line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/>"#));
    }
}

fn build_horizontal_lines(svg: &mut String, lines: &GridLines) {
    let (x1, x2) = (lines.start_x, lines.end_x);
    for &y in &lines.horizontal {
        svg.push_str(&format!(r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}"/>"#));
    }
}

/// Top-left of the highlight ring so it centers on the cell corner.
fn highlight_position(cell: GridCell, transform: &Transform) -> (f64, f64) {
    let (wx, wy) = grid::grid_to_world(cell);
    let (sx, sy) = transform.world_to_screen(wx, wy);
    (sx - HIGHLIGHT_SIZE / 2.0, sy - HIGHLIGHT_SIZE / 2.0)
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    markers: Signal<Vec<Marker>>,
    viewport: Signal<Viewport>,
    highlight: Signal<Option<GridCell>>,
    on_create: EventHandler<GridCell>,
    on_edit: EventHandler<MarkerId>,
    on_delete: EventHandler<MarkerId>,
) -> Element {
    let mut gestures = use_signal(GestureInterpreter::default);
    // Container-relative cursor position and the cell under it
    let mut hover = use_signal(|| None::<(f64, f64, GridCell)>);

    // Route one pointer event through the interpreter and act on its intents
    let mut dispatch = move |data: &PointerData, phase: PointerPhase| {
        if phase == PointerPhase::Down {
            sync_container_size(&mut viewport);
        }
        let transform = viewport.read().transform();
        let Some(event) = pointer_event(data, phase, &markers.read(), &transform) else {
            return;
        };

        let intents = {
            let vp = viewport.read();
            gestures.write().handle(&event, &vp)
        };
        for intent in intents {
            match intent {
                Intent::PanBy { .. } | Intent::ZoomAt { .. } => {
                    viewport.write().apply(&intent);
                }
                Intent::DoubleTapAt(cell) => {
                    if cell.is_placeable() {
                        on_create.call(cell);
                    }
                }
                Intent::TapMarker(id) => on_edit.call(id),
                Intent::LongPressMarker(id) => on_delete.call(id),
                Intent::TapAt(_) => {}
            }
        }

        if phase == PointerPhase::Move && gestures.read().active_pointers() == 0 {
            let cell = transform.screen_to_grid(event.x, event.y);
            hover.set(Some((event.x, event.y, cell)));
        } else if gestures.read().is_panning() {
            hover.set(None);
        }
    };

    let transform = viewport.read().transform();

    // Only rebuilt when the viewport moves
    let grid_svg = use_memo(move || {
        let vp = viewport.read();
        build_grid_svg(&render::grid_lines(&vp), &vp.transform())
    });

    let marker_views: Vec<(MarkerId, f64, f64, String, String)> = markers
        .read()
        .iter()
        .map(|m| {
            let (left, top) = marker_screen_position(m, &transform);
            (m.id, left, top, marker_label(m), marker_details(m).to_string())
        })
        .collect();

    let highlight_pos = (*highlight.read()).map(|cell| highlight_position(cell, &transform));
    let tooltip = (*hover.read()).map(|(x, y, cell)| (x + TOOLTIP_OFFSET, y + TOOLTIP_OFFSET, cell));
    let container_class = if gestures.read().is_panning() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",
            style: "touch-action: none;",

            onmounted: move |_| sync_container_size(&mut viewport),
            onresize: move |_| sync_container_size(&mut viewport),

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                sync_container_size(&mut viewport);
                let delta_y = wheel_delta_y(evt.data().delta());
                let intent = gesture::wheel_intent(delta_y, &viewport.read());
                if let Some(intent) = intent {
                    viewport.write().apply(&intent);
                }
            },

            onpointerdown: move |evt: Event<PointerData>| {
                evt.prevent_default();
                dispatch(&evt.data(), PointerPhase::Down);
            },
            onpointermove: move |evt: Event<PointerData>| {
                dispatch(&evt.data(), PointerPhase::Move);
            },
            onpointerup: move |evt: Event<PointerData>| {
                dispatch(&evt.data(), PointerPhase::Up);
            },
            onpointercancel: move |evt: Event<PointerData>| {
                dispatch(&evt.data(), PointerPhase::Cancel);
            },
            onpointerleave: move |evt: Event<PointerData>| {
                hover.set(None);
                // A mouse dragged out of the map ends its gesture
                if gestures.read().active_pointers() > 0 {
                    dispatch(&evt.data(), PointerPhase::Cancel);
                }
            },
            oncontextmenu: move |evt: Event<MouseData>| evt.prevent_default(),

            div {
                class: "grid-wrapper",
                dangerous_inner_html: "{grid_svg}",
            }

            for (id, left, top, label, details) in marker_views {
                div {
                    key: "{id}",
                    class: "marker",
                    title: "{details}",
                    style: "left: {left}px; top: {top}px; width: {MARKER_SIZE}px; height: {MARKER_SIZE}px;",
                    span { class: "marker-label", "{label}" }
                }
            }

            if let Some((hx, hy)) = highlight_pos {
                div {
                    class: "jump-highlight",
                    style: "left: {hx}px; top: {hy}px; width: {HIGHLIGHT_SIZE}px; height: {HIGHLIGHT_SIZE}px;",
                }
            }

            if let Some((tx, ty, cell)) = tooltip {
                div {
                    class: "coord-tooltip",
                    style: "left: {tx}px; top: {ty}px;",
                    "{cell}"
                }
            }
        }
    }
}
