use dioxus::prelude::*;
use starmap_shared::markers::{filter_markers, marker_label};
use starmap_shared::models::{Marker, MarkerId};

#[component]
pub fn StarList(markers: Signal<Vec<Marker>>, on_select: EventHandler<Marker>) -> Element {
    let mut query = use_signal(String::new);
    let mut active = use_signal(|| None::<MarkerId>);

    let entries: Vec<(Marker, String)> = {
        let all = markers.read();
        filter_markers(&all, &query.read())
            .into_iter()
            .map(|m| (m.clone(), marker_label(m)))
            .collect()
    };
    let total = markers.read().len();
    let shown = entries.len();

    rsx! {
        div { class: "panel star-list",
            h3 { "Stars" }
            input {
                r#type: "search",
                placeholder: "Search name or details...",
                value: "{query}",
                oninput: move |evt: Event<FormData>| query.set(evt.value()),
            }
            div { class: "star-count", "{shown} of {total}" }
            if entries.is_empty() {
                div { class: "star-empty", "No stars found" }
            }
            ul {
                for (marker, label) in entries {
                    li {
                        key: "{marker.id}",
                        class: entry_class(*active.read() == Some(marker.id)),
                        onclick: {
                            let marker = marker.clone();
                            move |_| {
                                active.set(Some(marker.id));
                                on_select.call(marker.clone());
                            }
                        },
                        span { class: "star-name", "{label}" }
                        span { class: "star-coords", "{marker.x}, {marker.y}" }
                    }
                }
            }
        }
    }
}

fn entry_class(is_active: bool) -> &'static str {
    if is_active {
        "star-entry active"
    } else {
        "star-entry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_class_marks_selection() {
        assert_eq!(entry_class(true), "star-entry active");
        assert_eq!(entry_class(false), "star-entry");
    }
}
