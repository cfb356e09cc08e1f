use dioxus::prelude::*;
use starmap_shared::grid::GridCell;
use starmap_shared::models::{Marker, MarkerUpdate, NewMarker, DEFAULT_MARKER_NAME};

use crate::api;

/// What the dialog is editing.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogTarget {
    Create(GridCell),
    Edit(Marker),
}

impl DialogTarget {
    fn title(&self) -> String {
        match self {
            DialogTarget::Create(cell) => format!("New star at ({cell})"),
            DialogTarget::Edit(m) => format!("Edit star at ({}, {})", m.x, m.y),
        }
    }

    fn initial_text(&self) -> (String, String) {
        match self {
            DialogTarget::Create(_) => (String::new(), String::new()),
            DialogTarget::Edit(m) => (
                m.name.clone().unwrap_or_default(),
                m.details.clone().unwrap_or_default(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SaveRequest {
    Create(NewMarker),
    Update(MarkerUpdate),
}

/// Build the request for the current form contents. A blank name on a new
/// star falls back to the default; edits send exactly what was typed.
fn save_request(target: &DialogTarget, name: &str, details: &str) -> SaveRequest {
    match target {
        DialogTarget::Create(cell) => {
            let name = if name.trim().is_empty() {
                DEFAULT_MARKER_NAME.to_string()
            } else {
                name.to_string()
            };
            SaveRequest::Create(NewMarker {
                x: cell.x,
                y: cell.y,
                name: Some(name),
                details: Some(details.to_string()),
            })
        }
        DialogTarget::Edit(m) => SaveRequest::Update(MarkerUpdate {
            id: m.id,
            name: Some(name.to_string()),
            details: Some(details.to_string()),
        }),
    }
}

async fn send(request: SaveRequest) -> Result<Marker, String> {
    match request {
        SaveRequest::Create(new) => api::create_marker(&new).await,
        SaveRequest::Update(update) => api::update_marker(&update).await,
    }
}

fn save_label(saving: bool) -> &'static str {
    if saving {
        "Saving..."
    } else {
        "Save"
    }
}

#[component]
pub fn MarkerDialog(
    target: DialogTarget,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Marker>,
) -> Element {
    let (initial_name, initial_details) = target.initial_text();
    let mut name = use_signal(move || initial_name);
    let mut details = use_signal(move || initial_details);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let title = target.title();
    let is_saving = *saving.read();
    let label = save_label(is_saving);

    let on_save = move |_: Event<MouseData>| {
        if *saving.read() {
            return;
        }
        let request = save_request(&target, &name.read(), &details.read());
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = send(request).await;
            // Re-enable regardless of outcome
            saving.set(false);
            match result {
                Ok(marker) => on_saved.call(marker),
                Err(e) => {
                    tracing::warn!(error = %e, "saving marker failed");
                    error.set(Some(e));
                }
            }
        });
    };

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "{title}" }
                label { "Name" }
                input {
                    r#type: "text",
                    placeholder: "{DEFAULT_MARKER_NAME}",
                    value: "{name}",
                    autofocus: true,
                    oninput: move |evt: Event<FormData>| name.set(evt.value()),
                }
                label { "Details" }
                textarea {
                    rows: "4",
                    value: "{details}",
                    oninput: move |evt: Event<FormData>| details.set(evt.value()),
                }
                if let Some(msg) = &*error.read() {
                    div { class: "dialog-error", "{msg}" }
                }
                div { class: "dialog-actions",
                    button {
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        disabled: is_saving,
                        onclick: on_save,
                        "{label}"
                    }
                }
            }
        }
    }
}
