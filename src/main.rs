// Only the wasm32 build wires the core into a page.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod error;
mod media;
mod player;

#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use components::MusicPlayer;
#[cfg(target_arch = "wasm32")]
use error::WidgetError;
#[cfg(target_arch = "wasm32")]
use player::PlaybackWidget;

#[cfg(target_arch = "wasm32")]
fn main() {
    dioxus::logger::initialize_default();

    if let Err(err) = host::document().and_then(|document| host::ensure_mount_point(&document)) {
        tracing::error!("music player not mounted: {err}");
        return;
    }

    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(host::MOUNT_ID))
        .launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    dioxus::logger::initialize_default();
    tracing::error!("bgm-widget runs inside a web page; build it for wasm32-unknown-unknown");
}

#[cfg(target_arch = "wasm32")]
#[component]
fn App() -> Element {
    let widget = use_hook(|| match start_widget() {
        Ok(widget) => Some(widget),
        Err(err) => {
            tracing::error!("music player failed to start: {err}");
            None
        }
    });

    match widget {
        Some(widget) => rsx! {
            MusicPlayer { widget }
        },
        None => rsx! {},
    }
}

/// Create the widget handle, load the configured track, and arm the
/// delayed autostart.
#[cfg(target_arch = "wasm32")]
fn start_widget() -> Result<PlaybackWidget, WidgetError> {
    let document = host::document()?;
    let config = host::config_from_page(&document);
    let widget = host::init_widget(&document, &config)?;
    host::schedule_autostart(widget.clone(), config.autostart_delay_ms);
    Ok(widget)
}
