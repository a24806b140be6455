//! The playable media capability the widget drives.

use std::rc::Rc;

use crate::error::WidgetError;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::HtmlAudioMedia;

/// State changes emitted by the media resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
    TimeUpdate,
    LoadedMetadata,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 5] = [
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::Ended,
        MediaEvent::TimeUpdate,
        MediaEvent::LoadedMetadata,
    ];

    /// DOM event name for this media event.
    pub fn event_name(self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::Ended => "ended",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::LoadedMetadata => "loadedmetadata",
        }
    }
}

/// Completion callback for a play request.
pub type PlayCallback = Box<dyn FnOnce(Result<(), WidgetError>)>;

/// Sink receiving every media event.
pub type MediaEventSink = Rc<dyn Fn(MediaEvent)>;

/// One streamable, seekable audio track.
///
/// Play requests are asynchronous: the outcome is delivered through the
/// callback, never awaited. Implementations must not hold internal borrows
/// while invoking the callback or the event sink.
pub trait MediaResource {
    fn set_source(&self, url: &str);
    fn source(&self) -> String;
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// Track length in seconds; NaN until metadata is known.
    fn duration(&self) -> f64;
    fn set_loop(&self, looping: bool);
    fn is_loop(&self) -> bool;
    fn play(&self, done: PlayCallback);
    fn pause(&self);
    fn subscribe(&self, sink: MediaEventSink);
}

/// Duration if the resource knows a usable one.
pub fn known_duration(media: &dyn MediaResource) -> Option<f64> {
    let duration = media.duration();
    (duration.is_finite() && duration > 0.0).then_some(duration)
}
