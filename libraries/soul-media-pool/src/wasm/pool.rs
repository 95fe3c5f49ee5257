//! WASM-compatible MediaPool wrapper

use super::dom::DomMedia;
use super::scheduler::BrowserScheduler;
use crate::{MediaKind, MediaPool, MediaSource, PoolConfig};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlMediaElement};

/// WASM-compatible media pool
///
/// This wraps the core MediaPool with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmMediaPool {
    inner: MediaPool<DomMedia>,
}

#[wasm_bindgen]
impl WasmMediaPool {
    /// Create a pool of `size` video elements
    pub fn video(size: usize) -> Result<WasmMediaPool, JsValue> {
        Self::create(MediaKind::Video, PoolConfig::for_kind(MediaKind::Video).with_size(size))
    }

    /// Create a pool of `size` audio elements
    pub fn audio(size: usize) -> Result<WasmMediaPool, JsValue> {
        Self::create(MediaKind::Audio, PoolConfig::for_kind(MediaKind::Audio).with_size(size))
    }

    /// Create a pool from a config object (`{ size, defaultSource }`)
    ///
    /// `kind` is "video" or "audio". Missing fields fall back to the
    /// defaults for that kind.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(kind: &str, config: JsValue) -> Result<WasmMediaPool, JsValue> {
        let kind = match kind {
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            _ => return Err(JsValue::from_str("Invalid media kind. Use 'video' or 'audio'")),
        };

        let config = if config.is_undefined() || config.is_null() {
            PoolConfig::for_kind(kind)
        } else {
            let has_source = js_sys::Reflect::has(&config, &JsValue::from_str("defaultSource"))?;
            let mut parsed: PoolConfig = serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
            if !has_source {
                parsed.default_source = kind.default_source();
            }
            parsed
        };

        Self::create(kind, config)
    }

    // ===== Allocation =====

    /// Place pooled media under `parent` with the given sources
    ///
    /// `sources` is an array of `{ url, mime }` (or `{ url, mimeType }`).
    #[wasm_bindgen(js_name = initializeNode)]
    pub fn initialize_node(
        &mut self,
        parent: &Element,
        sources: JsValue,
    ) -> Result<HtmlMediaElement, JsValue> {
        let sources: Vec<MediaSource> = serde_wasm_bindgen::from_value(sources)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse sources: {}", e)))?;

        self.inner
            .acquire(parent, sources)
            .map(|media| media.element().clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Return media to the pool
    pub fn release(&mut self, media: HtmlMediaElement) {
        self.inner.free(&DomMedia::from(media));
    }

    /// Return all placed media to the pool
    #[wasm_bindgen(js_name = releaseAll)]
    pub fn release_all(&mut self) {
        self.inner.free_all();
    }

    // ===== Playback Control =====

    /// Set the active media (or `null` to clear)
    #[wasm_bindgen(js_name = setCurrent)]
    pub fn set_current(&mut self, media: Option<HtmlMediaElement>) {
        let media = media.map(DomMedia::from);
        self.inner.set_active(media.as_ref());
    }

    pub fn play(&self, media: HtmlMediaElement) {
        self.inner.play(&DomMedia::from(media));
    }

    pub fn pause(&self, media: HtmlMediaElement) {
        self.inner.pause(&DomMedia::from(media));
    }

    pub fn restart(&self, media: HtmlMediaElement) {
        self.inner.restart(&DomMedia::from(media));
    }

    // ===== Volume Control =====

    pub fn mute(&mut self) {
        self.inner.mute_all();
    }

    /// Unmute (first call also unlocks autoplay on every element)
    pub fn unmute(&mut self) {
        self.inner.unmute_all();
    }

    // ===== State Queries =====

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Get pool state as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or(JsValue::NULL)
    }
}

impl WasmMediaPool {
    fn create(kind: MediaKind, config: PoolConfig) -> Result<WasmMediaPool, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let handles = (0..config.size)
            .map(|_| DomMedia::create(&document, kind))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            inner: MediaPool::new(config.default_source, handles, Rc::new(BrowserScheduler)),
        })
    }
}
