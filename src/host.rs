//! Host page integration: where the panel mounts, the icon font, the
//! document-level gesture listeners, and the autostart timer.

use std::cell::RefCell;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document};

use crate::config::{WidgetConfig, CONFIG_ELEMENT_ID};
use crate::error::{describe_js, WidgetError};
use crate::media::HtmlAudioMedia;
use crate::player::autostart::GestureHandler;
use crate::player::{GestureKind, GestureSource, PlaybackWidget};

/// Id of the container the panel renders into.
pub const MOUNT_ID: &str = "music-player";

pub fn document() -> Result<Document, WidgetError> {
    window()
        .ok_or(WidgetError::MissingHost("window"))?
        .document()
        .ok_or(WidgetError::MissingHost("document"))
}

/// Append the panel container to `<body>` unless the page already has one.
pub fn ensure_mount_point(document: &Document) -> Result<(), WidgetError> {
    if document.get_element_by_id(MOUNT_ID).is_some() {
        return Ok(());
    }
    let body = document.body().ok_or(WidgetError::MissingHost("<body>"))?;
    let container = document.create_element("div")?;
    container.set_id(MOUNT_ID);
    body.append_child(&container)?;
    Ok(())
}

/// Load the icon font stylesheet unless some Font Awesome link is present.
pub fn ensure_icon_stylesheet(document: &Document, href: &str) -> Result<(), WidgetError> {
    if document
        .query_selector(r#"link[href*="font-awesome"]"#)?
        .is_some()
    {
        return Ok(());
    }
    let head = document.head().ok_or(WidgetError::MissingHost("<head>"))?;
    let link = document.create_element("link")?;
    link.set_attribute("rel", "stylesheet")?;
    link.set_attribute("href", href)?;
    head.append_child(&link)?;
    Ok(())
}

/// Read the optional JSON override block from the page.
pub fn config_from_page(document: &Document) -> WidgetConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    WidgetConfig::from_override(raw.as_deref())
}

/// Gesture listeners registered on the document.
pub struct DocumentGestures {
    document: Document,
    armed: RefCell<Vec<(GestureKind, Closure<dyn FnMut()>)>>,
}

impl DocumentGestures {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            armed: RefCell::new(Vec::new()),
        }
    }
}

impl GestureSource for DocumentGestures {
    fn arm(&self, handler: GestureHandler) {
        self.disarm();
        let mut armed = self.armed.borrow_mut();
        for kind in GestureKind::ALL {
            let handler = handler.clone();
            let closure = Closure::wrap(Box::new(move || handler(kind)) as Box<dyn FnMut()>);
            let added = self
                .document
                .add_event_listener_with_callback(kind.event_name(), closure.as_ref().unchecked_ref());
            match added {
                Ok(()) => armed.push((kind, closure)),
                Err(err) => tracing::warn!(
                    "could not listen for {}: {}",
                    kind.event_name(),
                    describe_js(&err)
                ),
            }
        }
    }

    fn disarm(&self) {
        let armed = std::mem::take(&mut *self.armed.borrow_mut());
        for (kind, closure) in armed {
            if let Err(err) = self.document.remove_event_listener_with_callback(
                kind.event_name(),
                closure.as_ref().unchecked_ref(),
            ) {
                tracing::warn!(
                    "could not remove {} listener: {}",
                    kind.event_name(),
                    describe_js(&err)
                );
            }
        }
    }
}

/// Build the widget against the real page: audio element, gesture
/// listeners, icon font, and the configured track.
pub fn init_widget(document: &Document, config: &WidgetConfig) -> Result<PlaybackWidget, WidgetError> {
    let media = HtmlAudioMedia::new()?;
    let gestures = DocumentGestures::new(document.clone());
    let widget = PlaybackWidget::init(Box::new(media), Box::new(gestures), config);

    if let Err(err) = ensure_icon_stylesheet(document, &config.icon_stylesheet) {
        tracing::warn!("icon font not injected: {err}");
    }
    widget.load_track(&config.track_url, Some(&config.track_label));
    Ok(widget)
}

/// Attempt autoplay once the delay elapses. Not cancellable.
pub fn schedule_autostart(widget: PlaybackWidget, delay_ms: u32) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(delay_ms).await;
        widget.autostart();
    });
}
