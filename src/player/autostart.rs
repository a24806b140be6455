//! Autostart protocol: try to play once, otherwise wait for a user gesture.

use std::rc::Rc;

/// Where the autostart attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutostartPhase {
    /// Waiting for the startup delay to elapse.
    #[default]
    Idle,
    AttemptingAutoplay,
    /// Autoplay was refused; gesture listeners are armed.
    AwaitingGesture,
    Playing,
}

/// User interactions that count as permission to start audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Click,
    KeyDown,
    Scroll,
}

impl GestureKind {
    pub const ALL: [GestureKind; 3] = [GestureKind::Click, GestureKind::KeyDown, GestureKind::Scroll];

    pub fn event_name(self) -> &'static str {
        match self {
            GestureKind::Click => "click",
            GestureKind::KeyDown => "keydown",
            GestureKind::Scroll => "scroll",
        }
    }
}

pub type GestureHandler = Rc<dyn Fn(GestureKind)>;

/// Page-level listeners for the gesture fallback.
///
/// `arm` registers one listener per [`GestureKind`], all calling the same
/// handler. `disarm` removes every one of them and is safe to call from
/// inside the handler.
pub trait GestureSource {
    fn arm(&self, handler: GestureHandler);
    fn disarm(&self);
}
