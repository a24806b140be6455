use crate::components::FaIcon;
use crate::player::{slider_value, PlaybackWidget};
use dioxus::prelude::*;

mod controls;

use controls::{CloseButton, PlayPauseButton};

const PANEL_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; \
    background: rgba(0, 0, 0, 0.8); color: white; padding: 15px; border-radius: 10px; \
    z-index: 9999; backdrop-filter: blur(10px); border: 2px solid rgba(255, 255, 255, 0.2); \
    min-width: 250px; box-shadow: 0 5px 15px rgba(0,0,0,0.3); font-family: Arial, sans-serif;";
const ACCENT: &str = "#4cc9f0";
const MUTED: &str = "#aaa";

/// Floating control panel. Renders the widget's latest `PanelView` and
/// forwards control input back to the widget handle.
#[component]
pub fn MusicPlayer(widget: PlaybackWidget) -> Element {
    let view = use_signal(|| widget.view());

    use_hook({
        let widget = widget.clone();
        move || {
            widget.subscribe(move |snapshot| {
                let mut view = view;
                view.set(snapshot.clone());
            })
        }
    });

    let panel = view();
    let panel_style = if panel.visible {
        PANEL_STYLE.to_string()
    } else {
        format!("{PANEL_STYLE} display: none;")
    };
    let status_color = panel.status_tone.color();

    let on_seek_input = {
        let widget = widget.clone();
        move |e: Event<FormData>| {
            if let Some(percent) = slider_value(&e.value()) {
                widget.seek(percent);
            }
        }
    };

    let on_volume_change = {
        let widget = widget.clone();
        move |e: Event<FormData>| {
            if let Some(val) = slider_value(&e.value()) {
                widget.set_volume(val / 100.0);
            }
        }
    };

    rsx! {
        div { id: "music-player-panel", style: "{panel_style}",
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 10px;",
                div { style: "display: flex; align-items: center; gap: 10px;",
                    FaIcon { name: "fa-music".to_string(), style: format!("color: {ACCENT};") }
                    h3 { style: "margin: 0; font-size: 16px;", "{panel.title}" }
                }
                CloseButton { widget: widget.clone() }
            }

            // Song info
            div {
                id: "song-info",
                style: "margin-bottom: 15px; font-size: 13px; color: {MUTED};",
                div {
                    "Now Playing: "
                    span { id: "current-song", "{panel.song_label}" }
                }
                div {
                    id: "song-status",
                    style: "font-size: 11px; margin-top: 5px; color: {status_color};",
                    "{panel.status_text}"
                }
            }

            // Transport and progress
            div { style: "display: flex; align-items: center; gap: 15px; margin-bottom: 10px;",
                PlayPauseButton { widget: widget.clone(), playing: panel.is_playing }
                div { style: "flex: 1;",
                    div { style: "display: flex; justify-content: space-between; font-size: 12px; margin-bottom: 5px;",
                        span { id: "current-time", "{panel.elapsed_label}" }
                        span { id: "duration", "{panel.duration_label}" }
                    }
                    input {
                        id: "progress",
                        r#type: "range",
                        min: "0",
                        max: "100",
                        value: panel.progress_percent,
                        style: "width: 100%;",
                        oninput: on_seek_input,
                    }
                }
            }

            // Volume
            div { style: "display: flex; align-items: center; gap: 10px;",
                FaIcon { name: "fa-volume-down".to_string(), style: format!("color: {MUTED};") }
                input {
                    id: "volume-slider",
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: panel.volume_percent.round() as i32,
                    style: "flex: 1;",
                    oninput: on_volume_change,
                }
                FaIcon { name: "fa-volume-up".to_string(), style: format!("color: {MUTED};") }
            }

            div { style: "margin-top: 15px; font-size: 11px; color: #888; text-align: center;",
                FaIcon { name: "fa-info-circle".to_string() }
                " {panel.footer_note}"
            }
        }
    }
}
