//! Playback widget core: player state, media event sync, and the
//! operations the control panel triggers.
//!
//! The widget never sets `is_playing` on its own. It only mirrors the
//! `play`/`pause`/`ended` events reported by the media resource.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{WidgetConfig, DEFAULT_TRACK_LABEL};
use crate::error::WidgetError;
use crate::media::{known_duration, MediaEvent, MediaResource};

pub mod autostart;
pub mod view;

#[cfg(test)]
mod testing;

pub use autostart::{AutostartPhase, GestureKind, GestureSource};
pub use view::{format_clock, PanelView, StatusTone};

use view::{STATUS_AWAITING_GESTURE, STATUS_MANUAL_BLOCKED};

/// Mutable state of one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub volume: f64,
    pub current_song_label: String,
    pub source_url: String,
    pub phase: AutostartPhase,
    // Set by load_track, consumed by the next loadedmetadata event.
    awaiting_metadata: bool,
}

/// Who asked for playback; decides how a rejection is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayOrigin {
    Manual,
    Autostart,
    Gesture,
}

pub type ViewObserver = Rc<dyn Fn(&PanelView)>;

struct Shared {
    media: Box<dyn MediaResource>,
    gestures: Box<dyn GestureSource>,
    rearm_on_manual_rejection: bool,
    state: RefCell<PlayerState>,
    view: RefCell<PanelView>,
    observers: RefCell<Vec<ViewObserver>>,
}

/// Handle to a running widget. Cloning shares the same media resource.
#[derive(Clone)]
pub struct PlaybackWidget {
    shared: Rc<Shared>,
}

impl PartialEq for PlaybackWidget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl PlaybackWidget {
    /// Take ownership of the media resource, apply the configured volume and
    /// loop flag, and start mirroring its state events.
    pub fn init(
        media: Box<dyn MediaResource>,
        gestures: Box<dyn GestureSource>,
        config: &WidgetConfig,
    ) -> Self {
        media.set_volume(config.initial_volume);
        media.set_loop(config.loop_track);

        let shared = Rc::new(Shared {
            media,
            gestures,
            rearm_on_manual_rejection: config.rearm_gesture_on_manual_rejection,
            state: RefCell::new(PlayerState {
                is_playing: false,
                volume: config.initial_volume,
                current_song_label: String::new(),
                source_url: String::new(),
                phase: AutostartPhase::Idle,
                awaiting_metadata: false,
            }),
            view: RefCell::new(PanelView::new(config)),
            observers: RefCell::new(Vec::new()),
        });

        let weak = Rc::downgrade(&shared);
        shared.media.subscribe(Rc::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                PlaybackWidget { shared }.handle_media_event(event);
            }
        }));

        PlaybackWidget { shared }
    }

    pub fn state(&self) -> PlayerState {
        self.shared.state.borrow().clone()
    }

    pub fn view(&self) -> PanelView {
        self.shared.view.borrow().clone()
    }

    pub fn phase(&self) -> AutostartPhase {
        self.shared.state.borrow().phase
    }

    /// Register an observer that receives every new panel snapshot.
    pub fn subscribe(&self, observer: impl Fn(&PanelView) + 'static) {
        self.shared.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Point the media resource at a new track. The duration label refreshes
    /// once the track's metadata arrives.
    pub fn load_track(&self, url: &str, label: Option<&str>) {
        let label = label.unwrap_or(DEFAULT_TRACK_LABEL).to_string();
        {
            let mut state = self.shared.state.borrow_mut();
            state.source_url = url.to_string();
            state.current_song_label = label.clone();
            state.awaiting_metadata = true;
        }
        self.shared.media.set_source(url);
        self.update_view(|view| view.song_label = label);
    }

    pub fn toggle_playback(&self) {
        let playing = self.shared.state.borrow().is_playing;
        if playing {
            self.shared.media.pause();
        } else {
            self.request_play(PlayOrigin::Manual);
        }
    }

    /// Store and apply a volume in 0.0..=1.0. Range is enforced by the
    /// slider, not here.
    pub fn set_volume(&self, volume: f64) {
        self.shared.state.borrow_mut().volume = volume;
        self.shared.media.set_volume(volume);
        self.update_view(|view| view.volume_percent = volume * 100.0);
    }

    /// Jump to a seek slider position in 0..=100.
    pub fn seek(&self, percent: f64) {
        match known_duration(&*self.shared.media) {
            Some(duration) => self.shared.media.set_current_time(percent / 100.0 * duration),
            None => tracing::debug!("seek to {percent}% ignored, duration not known yet"),
        }
    }

    pub fn refresh_progress_display(&self) {
        let Some(duration) = known_duration(&*self.shared.media) else {
            return;
        };
        let position = self.shared.media.current_time();
        self.update_view(|view| {
            view.progress_percent = position / duration * 100.0;
            view.elapsed_label = format_clock(position);
        });
    }

    pub fn refresh_duration_display(&self) {
        let Some(duration) = known_duration(&*self.shared.media) else {
            return;
        };
        self.update_view(|view| view.duration_label = format_clock(duration));
    }

    /// Hide the panel. Playback keeps going.
    pub fn close(&self) {
        self.update_view(|view| view.visible = false);
    }

    /// Try to start playback without a user gesture. Runs at most once.
    pub fn autostart(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != AutostartPhase::Idle {
                tracing::debug!("autostart skipped in phase {:?}", state.phase);
                return;
            }
            state.phase = AutostartPhase::AttemptingAutoplay;
        }
        self.request_play(PlayOrigin::Autostart);
    }

    fn handle_media_event(&self, event: MediaEvent) {
        match event {
            MediaEvent::Play => self.sync_play_state(true),
            MediaEvent::Pause | MediaEvent::Ended => self.sync_play_state(false),
            MediaEvent::TimeUpdate => self.refresh_progress_display(),
            MediaEvent::LoadedMetadata => {
                let pending = std::mem::take(&mut self.shared.state.borrow_mut().awaiting_metadata);
                if pending {
                    self.refresh_duration_display();
                }
            }
        }
    }

    fn sync_play_state(&self, playing: bool) {
        self.shared.state.borrow_mut().is_playing = playing;
        self.update_view(|view| view.show_play_state(playing));
    }

    fn request_play(&self, origin: PlayOrigin) {
        let weak = Rc::downgrade(&self.shared);
        self.shared.media.play(Box::new(move |result| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let widget = PlaybackWidget { shared };
            match result {
                Ok(()) => widget.on_play_started(origin),
                Err(err) => widget.on_play_rejected(origin, err),
            }
        }));
    }

    fn on_play_started(&self, origin: PlayOrigin) {
        if origin == PlayOrigin::Autostart {
            tracing::info!("music auto-started");
            let mut state = self.shared.state.borrow_mut();
            if state.phase == AutostartPhase::AttemptingAutoplay {
                state.phase = AutostartPhase::Playing;
            }
        }
    }

    fn on_play_rejected(&self, origin: PlayOrigin, err: WidgetError) {
        match origin {
            PlayOrigin::Autostart => {
                tracing::warn!("autoplay blocked, waiting for user interaction: {err}");
                self.update_view(|view| view.status_text = STATUS_AWAITING_GESTURE.to_string());
                self.arm_gesture_fallback();
            }
            PlayOrigin::Manual => {
                tracing::warn!("play request blocked: {err}");
                self.update_view(|view| view.status_text = STATUS_MANUAL_BLOCKED.to_string());
                if self.shared.rearm_on_manual_rejection {
                    self.arm_gesture_fallback();
                }
            }
            PlayOrigin::Gesture => {
                tracing::warn!("play request after user gesture blocked: {err}");
                self.update_view(|view| view.status_text = STATUS_MANUAL_BLOCKED.to_string());
            }
        }
    }

    fn arm_gesture_fallback(&self) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase == AutostartPhase::AwaitingGesture {
                return;
            }
            state.phase = AutostartPhase::AwaitingGesture;
        }
        let weak = Rc::downgrade(&self.shared);
        self.shared.gestures.arm(Rc::new(move |kind| {
            if let Some(shared) = weak.upgrade() {
                PlaybackWidget { shared }.on_gesture(kind);
            }
        }));
    }

    /// First gesture wins: every listener is removed and at most one play
    /// request is issued, however many gestures land in the same tick.
    fn on_gesture(&self, kind: GestureKind) {
        let playing = {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != AutostartPhase::AwaitingGesture {
                return;
            }
            state.phase = AutostartPhase::Playing;
            state.is_playing
        };
        self.shared.gestures.disarm();
        if playing {
            tracing::debug!("{} gesture ignored, already playing", kind.event_name());
            return;
        }
        tracing::debug!("starting playback after {} gesture", kind.event_name());
        self.request_play(PlayOrigin::Gesture);
    }

    fn update_view(&self, apply: impl FnOnce(&mut PanelView)) {
        let snapshot = {
            let mut view = self.shared.view.borrow_mut();
            apply(&mut view);
            view.clone()
        };
        let observers = self.shared.observers.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }
}

/// Parse a 0..=100 range input value.
pub fn slider_value(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}
