//! `HtmlMediaElement` as a pool handle

use crate::{MediaError, MediaHandle, MediaKind, MediaResult, MediaSource};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlMediaElement};

/// Class placed on every pooled element so placements can be found again
pub const MARKER_CLASS: &str = "media-pool-element";

/// Browser media element managed by a pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomMedia(HtmlMediaElement);

impl DomMedia {
    /// Create a detached `<video>` or `<audio>` element
    pub fn create(document: &Document, kind: MediaKind) -> Result<Self, JsValue> {
        let element = document.create_element(kind.tag_name())?;
        Ok(Self(element.dyn_into::<HtmlMediaElement>()?))
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.0
    }
}

impl From<HtmlMediaElement> for DomMedia {
    fn from(element: HtmlMediaElement) -> Self {
        Self(element)
    }
}

/// Best-effort message for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn host_error(value: JsValue) -> MediaError {
    MediaError::Host(describe(&value))
}

impl MediaHandle for DomMedia {
    type Parent = Element;

    fn find_managed(parent: &Element) -> Option<Self> {
        parent
            .query_selector(&format!(".{}", MARKER_CLASS))
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlMediaElement>().ok())
            .map(Self)
    }

    fn configure(&self) -> MediaResult<()> {
        let element = &self.0;
        element.set_attribute("muted", "").map_err(host_error)?;
        element.set_attribute("playsinline", "").map_err(host_error)?;
        element
            .set_attribute("webkit-playsinline", "")
            .map_err(host_error)?;
        element.class_list().add_1(MARKER_CLASS).map_err(host_error)
    }

    fn parent(&self) -> Option<Element> {
        self.0.parent_element()
    }

    fn append_to(&self, parent: &Element) -> MediaResult<()> {
        parent.append_child(&self.0).map(drop).map_err(host_error)
    }

    fn replace(&self, _parent: &Element, existing: &Self) -> MediaResult<()> {
        // The existing element may sit deeper than a direct child
        existing
            .0
            .replace_with_with_node_1(&self.0)
            .map_err(host_error)
    }

    fn detach(&self) -> MediaResult<()> {
        if let Some(parent) = self.0.parent_node() {
            parent.remove_child(&self.0).map_err(host_error)?;
        }
        Ok(())
    }

    fn set_sources(&self, sources: &[MediaSource]) -> MediaResult<()> {
        while let Some(child) = self.0.last_child() {
            self.0.remove_child(&child).map_err(host_error)?;
        }

        let document = self
            .0
            .owner_document()
            .ok_or_else(|| MediaError::Host("media element has no owner document".to_string()))?;

        for source in sources {
            let element = document.create_element("source").map_err(host_error)?;
            element.set_attribute("src", &source.url).map_err(host_error)?;
            element
                .set_attribute("type", &source.mime)
                .map_err(host_error)?;
            self.0.append_child(&element).map_err(host_error)?;
        }
        Ok(())
    }

    fn load(&self) -> MediaResult<()> {
        self.0.load();
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) -> LocalBoxFuture<'static, MediaResult<()>> {
        let element = self.0.clone();
        async move {
            let promise = element
                .play()
                .map_err(|e| MediaError::PlayRejected(describe(&e)))?;
            JsFuture::from(promise)
                .await
                .map(drop)
                .map_err(|e| MediaError::PlayRejected(describe(&e)))
        }
        .boxed_local()
    }

    fn pause(&self) -> MediaResult<()> {
        self.0.pause().map_err(host_error)
    }

    fn is_muted(&self) -> bool {
        self.0.muted()
    }

    fn set_muted(&self, muted: bool) -> MediaResult<()> {
        self.0.set_muted(muted);
        if muted {
            self.0.set_attribute("muted", "").map_err(host_error)
        } else {
            self.0.remove_attribute("muted").map_err(host_error)
        }
    }

    fn position(&self) -> f64 {
        self.0.current_time()
    }

    fn set_position(&self, seconds: f64) -> MediaResult<()> {
        self.0.set_current_time(seconds);
        Ok(())
    }
}
