use dioxus::prelude::*;
use starmap_shared::grid::GridCell;
use starmap_shared::markers::parse_jump_target;

#[component]
pub fn JumpForm(on_jump: EventHandler<GridCell>) -> Element {
    let mut jump_x = use_signal(String::new);
    let mut jump_y = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let mut submit = move || match parse_jump_target(&jump_x.read(), &jump_y.read()) {
        Ok(cell) => {
            error.set(None);
            on_jump.call(cell);
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    rsx! {
        div { class: "panel jump-form",
            h3 { "Jump to" }
            div { class: "jump-row",
                input {
                    r#type: "number",
                    placeholder: "X",
                    value: "{jump_x}",
                    oninput: move |evt: Event<FormData>| jump_x.set(evt.value()),
                    onkeydown: move |evt: Event<KeyboardData>| {
                        if evt.key() == Key::Enter {
                            submit();
                        }
                    },
                }
                input {
                    r#type: "number",
                    placeholder: "Y",
                    value: "{jump_y}",
                    oninput: move |evt: Event<FormData>| jump_y.set(evt.value()),
                    onkeydown: move |evt: Event<KeyboardData>| {
                        if evt.key() == Key::Enter {
                            submit();
                        }
                    },
                }
                button {
                    onclick: move |_| submit(),
                    "Go"
                }
            }
            if let Some(msg) = &*error.read() {
                div { class: "form-error", "{msg}" }
            }
        }
    }
}
