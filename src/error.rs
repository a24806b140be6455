use thiserror::Error;

/// Failures the widget can observe from the host page or its config.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The platform refused a play request (usually autoplay policy).
    #[error("playback request rejected: {0}")]
    PlaybackRejected(String),
    #[error("invalid widget config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("initial volume {0} is outside 0.0..=1.0")]
    VolumeOutOfRange(f64),
    #[error("host page is missing {0}")]
    MissingHost(&'static str),
    #[error("dom operation failed: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let name = String::from(err.name());
        let message = String::from(err.message());
        if name.is_empty() {
            return message;
        }
        return format!("{name}: {message}");
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WidgetError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        WidgetError::Dom(describe_js(&value))
    }
}
