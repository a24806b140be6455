//! In-memory stand-ins for the audio element and the page gesture listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::autostart::{GestureHandler, GestureKind, GestureSource};
use crate::error::WidgetError;
use crate::media::{MediaEvent, MediaEventSink, MediaResource, PlayCallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayResponse {
    Accept,
    Reject,
    /// Keep the request pending until `resolve_pending`.
    Defer,
}

struct FakeState {
    src: String,
    volume: f64,
    current_time: f64,
    duration: f64,
    looping: bool,
    paused: bool,
    response: PlayResponse,
    play_requests: usize,
    pause_requests: usize,
}

#[derive(Default)]
struct FakeInner {
    state: RefCell<FakeState>,
    sinks: RefCell<Vec<MediaEventSink>>,
    pending: RefCell<Vec<PlayCallback>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            src: String::new(),
            volume: 1.0,
            current_time: 0.0,
            duration: f64::NAN,
            looping: false,
            paused: true,
            response: PlayResponse::Accept,
            play_requests: 0,
            pause_requests: 0,
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeMedia {
    inner: Rc<FakeInner>,
}

impl FakeMedia {
    pub fn respond_with(&self, response: PlayResponse) {
        self.inner.state.borrow_mut().response = response;
    }

    pub fn play_requests(&self) -> usize {
        self.inner.state.borrow().play_requests
    }

    pub fn pause_requests(&self) -> usize {
        self.inner.state.borrow().pause_requests
    }

    pub fn emit(&self, event: MediaEvent) {
        let sinks = self.inner.sinks.borrow().clone();
        for sink in sinks {
            sink(event);
        }
    }

    pub fn load_metadata(&self, duration: f64) {
        self.inner.state.borrow_mut().duration = duration;
        self.emit(MediaEvent::LoadedMetadata);
    }

    pub fn advance_to(&self, seconds: f64) {
        self.inner.state.borrow_mut().current_time = seconds;
        self.emit(MediaEvent::TimeUpdate);
    }

    pub fn resolve_pending(&self, accept: bool) {
        let pending = std::mem::take(&mut *self.inner.pending.borrow_mut());
        for done in pending {
            if accept {
                self.start();
                done(Ok(()));
            } else {
                done(Err(rejection()));
            }
        }
    }

    fn start(&self) {
        let was_paused = std::mem::replace(&mut self.inner.state.borrow_mut().paused, false);
        if was_paused {
            self.emit(MediaEvent::Play);
        }
    }
}

fn rejection() -> WidgetError {
    WidgetError::PlaybackRejected("NotAllowedError: play() requires a user gesture".to_string())
}

impl MediaResource for FakeMedia {
    fn set_source(&self, url: &str) {
        let mut state = self.inner.state.borrow_mut();
        state.src = url.to_string();
        state.current_time = 0.0;
        state.duration = f64::NAN;
    }

    fn source(&self) -> String {
        self.inner.state.borrow().src.clone()
    }

    fn volume(&self) -> f64 {
        self.inner.state.borrow().volume
    }

    fn set_volume(&self, volume: f64) {
        self.inner.state.borrow_mut().volume = volume;
    }

    fn current_time(&self) -> f64 {
        self.inner.state.borrow().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        self.inner.state.borrow_mut().current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.inner.state.borrow().duration
    }

    fn set_loop(&self, looping: bool) {
        self.inner.state.borrow_mut().looping = looping;
    }

    fn is_loop(&self) -> bool {
        self.inner.state.borrow().looping
    }

    fn play(&self, done: PlayCallback) {
        let response = {
            let mut state = self.inner.state.borrow_mut();
            state.play_requests += 1;
            state.response
        };
        match response {
            PlayResponse::Accept => {
                self.start();
                done(Ok(()));
            }
            PlayResponse::Reject => done(Err(rejection())),
            PlayResponse::Defer => self.inner.pending.borrow_mut().push(done),
        }
    }

    fn pause(&self) {
        let was_playing = {
            let mut state = self.inner.state.borrow_mut();
            state.pause_requests += 1;
            !std::mem::replace(&mut state.paused, true)
        };
        if was_playing {
            self.emit(MediaEvent::Pause);
        }
    }

    fn subscribe(&self, sink: MediaEventSink) {
        self.inner.sinks.borrow_mut().push(sink);
    }
}

#[derive(Default)]
struct GestureInner {
    handler: RefCell<Option<GestureHandler>>,
    arm_count: Cell<usize>,
    disarm_count: Cell<usize>,
}

#[derive(Clone, Default)]
pub struct FakeGestures {
    inner: Rc<GestureInner>,
}

impl FakeGestures {
    pub fn is_armed(&self) -> bool {
        self.inner.handler.borrow().is_some()
    }

    pub fn handler(&self) -> Option<GestureHandler> {
        self.inner.handler.borrow().clone()
    }

    pub fn arm_count(&self) -> usize {
        self.inner.arm_count.get()
    }

    pub fn disarm_count(&self) -> usize {
        self.inner.disarm_count.get()
    }

    /// Deliver a gesture if listeners are armed. Returns whether it was delivered.
    pub fn fire(&self, kind: GestureKind) -> bool {
        match self.handler() {
            Some(handler) => {
                handler(kind);
                true
            }
            None => false,
        }
    }
}

impl GestureSource for FakeGestures {
    fn arm(&self, handler: GestureHandler) {
        self.inner.arm_count.set(self.inner.arm_count.get() + 1);
        *self.inner.handler.borrow_mut() = Some(handler);
    }

    fn disarm(&self) {
        self.inner.disarm_count.set(self.inner.disarm_count.get() + 1);
        self.inner.handler.borrow_mut().take();
    }
}
