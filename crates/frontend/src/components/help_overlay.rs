use dioxus::prelude::*;

/// (keys or gesture, action) rows for the controls table.
const MOUSE_CONTROLS: [(&str, &str); 5] = [
    ("Drag", "Pan the map"),
    ("Scroll", "Zoom around the center"),
    ("Double-click", "Place a star"),
    ("Click a star", "Edit name and details"),
    ("Ctrl + click a star", "Delete it"),
];

const TOUCH_CONTROLS: [(&str, &str); 5] = [
    ("Drag", "Pan the map"),
    ("Pinch", "Zoom around your fingers"),
    ("Double-tap", "Place a star"),
    ("Tap a star", "Edit name and details"),
    ("Hold a star", "Delete it"),
];

#[component]
pub fn HelpOverlay(show: Signal<bool>) -> Element {
    if !*show.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "help-overlay-backdrop",
            onclick: move |_| show.set(false),

            div {
                class: "help-overlay",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                h2 { "Help" }

                div { class: "shortcut-section",
                    h3 { "Mouse" }
                    for (keys, action) in MOUSE_CONTROLS {
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", kbd { "{keys}" } }
                            span { "{action}" }
                        }
                    }
                }

                div { class: "shortcut-section",
                    h3 { "Touch" }
                    for (keys, action) in TOUCH_CONTROLS {
                        div { class: "shortcut-row",
                            span { class: "shortcut-keys", kbd { "{keys}" } }
                            span { "{action}" }
                        }
                    }
                }

                div { class: "help-divider" }

                div { class: "help-info-section",
                    h3 { "Coordinates" }
                    p { "Each grid square is one cell. Stars sit on the corner of a cell and can only be placed where both coordinates are zero or positive. Hover the map to read the cell under the cursor." }
                }

                div { class: "help-info-section",
                    h3 { "Live updates" }
                    p { "The star list refreshes every two seconds while this tab is visible, so stars added by others appear on their own." }
                }

                button {
                    class: "close-help",
                    onclick: move |_| show.set(false),
                    "Close"
                }
            }
        }
    }
}
