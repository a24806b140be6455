use crate::components::FaIcon;
use crate::player::PlaybackWidget;
use dioxus::prelude::*;

const PLAY_BUTTON_STYLE: &str = "background: #4cc9f0; border: none; width: 40px; height: 40px; \
    border-radius: 50%; color: white; cursor: pointer; display: flex; align-items: center; \
    justify-content: center;";

/// Play/Pause button. The icon follows the mirrored play state only.
#[component]
pub(super) fn PlayPauseButton(widget: PlaybackWidget, playing: bool) -> Element {
    rsx! {
        button {
            id: "play-pause",
            r#type: "button",
            style: PLAY_BUTTON_STYLE,
            onclick: move |_| widget.toggle_playback(),
            if playing {
                FaIcon { name: "fa-pause".to_string() }
            } else {
                FaIcon { name: "fa-play".to_string() }
            }
        }
    }
}

/// Close button - hides the panel, audio keeps playing.
#[component]
pub(super) fn CloseButton(widget: PlaybackWidget) -> Element {
    rsx! {
        button {
            id: "close-music",
            r#type: "button",
            style: "background: none; border: none; color: white; cursor: pointer; font-size: 14px;",
            onclick: move |_| widget.close(),
            FaIcon { name: "fa-times".to_string() }
        }
    }
}
