use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use starmap_shared::grid::GridCell;
use starmap_shared::markers::{markers_changed, JUMP_HIGHLIGHT_MS};
use starmap_shared::models::{Marker, MarkerId};
use starmap_shared::viewport::Viewport;

use crate::api;
use crate::components::help_overlay::HelpOverlay;
use crate::components::jump_form::JumpForm;
use crate::components::map_view::MapView;
use crate::components::marker_dialog::{DialogTarget, MarkerDialog};
use crate::components::star_list::StarList;
use crate::coords;

const POLL_INTERVAL_MS: u32 = 2_000;

const DELETE_PROMPT: &str = "Delete this marker?";

/// Re-fetch the marker list and replace it only when it changed. A failed
/// fetch counts as an empty list for this cycle.
async fn refresh_markers(mut markers: Signal<Vec<Marker>>) {
    let fetched = match api::fetch_markers().await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(error = %e, "fetching markers failed");
            Vec::new()
        }
    };
    let changed = markers_changed(&markers.read(), &fetched);
    if changed {
        markers.set(fetched);
    }
}

#[component]
pub fn StarMapPage() -> Element {
    let markers = use_signal(Vec::<Marker>::new);
    let mut viewport = use_signal(|| Viewport::new(0.0, 0.0));
    let mut highlight = use_signal(|| None::<GridCell>);
    let mut highlight_token = use_signal(|| 0u64);
    let mut dialog = use_signal(|| None::<DialogTarget>);
    let mut show_help = use_signal(|| false);

    // Live updates; background tabs skip their turn
    use_future(move || async move {
        loop {
            if !coords::document_hidden() {
                refresh_markers(markers).await;
            }
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });

    // Center on a cell and ring it for a few seconds. A newer jump owns the ring.
    let mut jump_to = move |cell: GridCell| {
        viewport.write().jump_to(cell);
        highlight.set(Some(cell));
        let token = {
            let mut t = highlight_token.write();
            *t += 1;
            *t
        };
        spawn(async move {
            TimeoutFuture::new(JUMP_HIGHLIGHT_MS).await;
            if *highlight_token.read() == token {
                highlight.set(None);
            }
        });
    };

    let on_edit = move |id: MarkerId| {
        let found = markers.read().iter().find(|m| m.id == id).cloned();
        if let Some(marker) = found {
            dialog.set(Some(DialogTarget::Edit(marker)));
        }
    };

    let on_delete = move |id: MarkerId| {
        if !coords::confirm(DELETE_PROMPT) {
            return;
        }
        spawn(async move {
            match api::delete_marker(id).await {
                Ok(_) => tracing::info!(id, "marker deleted"),
                Err(e) => tracing::warn!(id, error = %e, "deleting marker failed"),
            }
            refresh_markers(markers).await;
        });
    };

    let current_dialog = dialog
        .read()
        .clone()
        .map(|target| (dialog_key(&target), target));
    let star_count = markers.read().len();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Star Map" }
                span { class: "header-count", "{star_count} stars" }
                button {
                    class: "secondary help-button",
                    onclick: move |_| show_help.set(true),
                    "?"
                }
            }

            div { class: "sidebar",
                JumpForm { on_jump: move |cell| jump_to(cell) }
                StarList {
                    markers: markers,
                    on_select: move |m: Marker| jump_to(GridCell::new(m.x, m.y)),
                }
            }

            MapView {
                markers: markers,
                viewport: viewport,
                highlight: highlight,
                on_create: move |cell: GridCell| dialog.set(Some(DialogTarget::Create(cell))),
                on_edit: on_edit,
                on_delete: on_delete,
            }

            if let Some((key, target)) = current_dialog {
                MarkerDialog {
                    key: "{key}",
                    target: target,
                    on_close: move |_| dialog.set(None),
                    on_saved: move |saved: Marker| {
                        tracing::info!(id = saved.id, "marker saved");
                        dialog.set(None);
                        spawn(refresh_markers(markers));
                    },
                }
            }

            HelpOverlay { show: show_help }
        }
    }
}

/// Remount the dialog when it switches to a different star or cell.
fn dialog_key(target: &DialogTarget) -> String {
    match target {
        DialogTarget::Create(cell) => format!("new-{}-{}", cell.x, cell.y),
        DialogTarget::Edit(m) => format!("edit-{}", m.id),
    }
}
