//! Dioxus components for the floating music panel.

mod icons;
mod player;

pub use icons::*;
pub use player::*;
