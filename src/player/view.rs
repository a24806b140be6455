use crate::config::WidgetConfig;

/// Status text shown while playback is running.
pub const STATUS_PLAYING: &str = "Playing";
pub const STATUS_PAUSED: &str = "Paused";
/// Status after a rejected play button press.
pub const STATUS_MANUAL_BLOCKED: &str = "Click play to start music";
/// Status after autoplay was refused.
pub const STATUS_AWAITING_GESTURE: &str = "Click play button to start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Accent,
    Muted,
}

impl StatusTone {
    pub fn color(self) -> &'static str {
        match self {
            StatusTone::Accent => "#4cc9f0",
            StatusTone::Muted => "#aaa",
        }
    }
}

/// Everything the control panel displays. The UI renders this as data and
/// never reaches into the media resource itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub visible: bool,
    pub title: String,
    pub footer_note: String,
    pub song_label: String,
    pub status_text: String,
    pub status_tone: StatusTone,
    pub is_playing: bool,
    pub elapsed_label: String,
    pub duration_label: String,
    /// Seek slider position in 0..=100.
    pub progress_percent: f64,
    /// Volume slider position in 0..=100.
    pub volume_percent: f64,
}

impl PanelView {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            visible: true,
            title: config.title.clone(),
            footer_note: config.footer_note.clone(),
            song_label: "-".to_string(),
            status_text: STATUS_PAUSED.to_string(),
            status_tone: StatusTone::Muted,
            is_playing: false,
            elapsed_label: format_clock(0.0),
            duration_label: format_clock(0.0),
            progress_percent: 0.0,
            volume_percent: config.initial_volume * 100.0,
        }
    }

    pub(crate) fn show_play_state(&mut self, playing: bool) {
        self.is_playing = playing;
        if playing {
            self.status_text = STATUS_PLAYING.to_string();
            self.status_tone = StatusTone::Accent;
        } else {
            self.status_text = STATUS_PAUSED.to_string();
            self.status_tone = StatusTone::Muted;
        }
    }
}

/// `m:ss` clock label for a position in seconds.
pub fn format_clock(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds_to_two_digits() {
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(5.0), "0:05");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(59.99), "0:59");
        assert_eq!(format_clock(3725.4), "62:05");
    }

    #[test]
    fn clock_treats_unknown_positions_as_zero() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn clock_matches_floor_formula_for_whole_range() {
        for s in 0..=7200u32 {
            let expected = format!("{}:{:02}", s / 60, s % 60);
            assert_eq!(format_clock(f64::from(s) + 0.5), expected);
        }
    }

    #[test]
    fn initial_view_reflects_config() {
        let view = PanelView::new(&WidgetConfig::default());
        assert!(view.visible);
        assert_eq!(view.song_label, "-");
        assert_eq!(view.status_text, STATUS_PAUSED);
        assert_eq!(view.elapsed_label, "0:00");
        assert_eq!(view.duration_label, "0:00");
        assert_eq!(view.volume_percent, 50.0);
    }
}
