//! `HtmlAudioElement` binding for the media capability.

use std::cell::RefCell;

use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use super::{MediaEvent, MediaEventSink, MediaResource, PlayCallback};
use crate::error::{describe_js, WidgetError};

/// Detached audio element owned by one widget.
pub struct HtmlAudioMedia {
    audio: HtmlAudioElement,
    // Listener closures live as long as the element does.
    listeners: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl HtmlAudioMedia {
    pub fn new() -> Result<Self, WidgetError> {
        let audio = HtmlAudioElement::new()?;
        // Stream instead of buffering the whole file up front
        audio.set_attribute("preload", "metadata")?;
        Ok(Self {
            audio,
            listeners: RefCell::new(Vec::new()),
        })
    }
}

impl MediaResource for HtmlAudioMedia {
    fn set_source(&self, url: &str) {
        self.audio.set_src(url);
    }

    fn source(&self) -> String {
        self.audio.src()
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn set_loop(&self, looping: bool) {
        self.audio.set_loop(looping);
    }

    fn is_loop(&self) -> bool {
        self.audio.loop_()
    }

    fn play(&self, done: PlayCallback) {
        let promise = match self.audio.play() {
            Ok(promise) => promise,
            Err(err) => {
                done(Err(WidgetError::PlaybackRejected(describe_js(&err))));
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| WidgetError::PlaybackRejected(describe_js(&err)));
            done(result);
        });
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            tracing::warn!("pause request failed: {}", describe_js(&err));
        }
    }

    fn subscribe(&self, sink: MediaEventSink) {
        let mut listeners = self.listeners.borrow_mut();
        for event in MediaEvent::ALL {
            let sink = sink.clone();
            let closure = Closure::wrap(Box::new(move || sink(event)) as Box<dyn FnMut()>);
            if let Err(err) = self
                .audio
                .add_event_listener_with_callback(event.event_name(), closure.as_ref().unchecked_ref())
            {
                tracing::warn!(
                    "could not listen for {}: {}",
                    event.event_name(),
                    describe_js(&err)
                );
                continue;
            }
            listeners.push(closure);
        }
    }
}
