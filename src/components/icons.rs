use dioxus::prelude::*;

/// Font Awesome glyph, e.g. `name: "fa-play"`.
#[component]
pub fn FaIcon(name: String, #[props(default)] style: String) -> Element {
    rsx! {
        i { class: "fas {name}", style: "{style}" }
    }
}
