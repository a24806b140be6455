use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Element id of the optional JSON override block on the host page.
pub const CONFIG_ELEMENT_ID: &str = "music-player-config";

/// Label used by `load_track` when the caller has none.
pub const DEFAULT_TRACK_LABEL: &str = "Background Music";

/// Widget settings. Every field has a default so a host page only needs to
/// override what it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub track_url: String,
    pub track_label: String,
    pub title: String,
    pub initial_volume: f64,
    pub loop_track: bool,
    pub autostart_delay_ms: u32,
    pub icon_stylesheet: String,
    pub footer_note: String,
    /// Arm the gesture fallback when a play button press is rejected too.
    pub rearm_gesture_on_manual_rejection: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            track_url: "https://ditzabcd.github.io/all/bukanaku.mp3".to_string(),
            track_label: "Background Music - Portfolio".to_string(),
            title: DEFAULT_TRACK_LABEL.to_string(),
            initial_volume: 0.5,
            loop_track: true,
            autostart_delay_ms: 2000,
            icon_stylesheet:
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css"
                    .to_string(),
            footer_note: "Music will auto-play & loop".to_string(),
            rearm_gesture_on_manual_rejection: false,
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self, WidgetError> {
        let config: WidgetConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(WidgetError::VolumeOutOfRange(self.initial_volume));
        }
        Ok(())
    }

    /// Parse an optional override block, falling back to defaults when the
    /// block is absent, blank, or invalid.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config =
            WidgetConfig::from_json(r#"{"track_url":"https://example.com/a.mp3"}"#).unwrap();
        assert_eq!(config.track_url, "https://example.com/a.mp3");
        assert_eq!(config.initial_volume, 0.5);
        assert_eq!(config.autostart_delay_ms, 2000);
        assert!(config.loop_track);
        assert!(!config.rearm_gesture_on_manual_rejection);
    }

    #[test]
    fn volume_outside_unit_range_is_rejected() {
        let err = WidgetConfig::from_json(r#"{"initial_volume":1.5}"#).unwrap_err();
        assert!(matches!(err, WidgetError::VolumeOutOfRange(v) if v == 1.5));
    }

    #[test]
    fn malformed_override_falls_back_to_defaults() {
        assert_eq!(WidgetConfig::from_override(Some("{not json")), WidgetConfig::default());
        assert_eq!(WidgetConfig::from_override(Some("   ")), WidgetConfig::default());
        assert_eq!(WidgetConfig::from_override(None), WidgetConfig::default());
    }

    #[test]
    fn valid_override_is_used() {
        let config = WidgetConfig::from_override(Some(r#"{"track_label":"Track A"}"#));
        assert_eq!(config.track_label, "Track A");
    }
}
