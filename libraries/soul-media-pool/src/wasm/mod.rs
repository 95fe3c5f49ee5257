//! WASM bindings for soul-media-pool
//!
//! This module binds the pool to browser `<video>`/`<audio>` elements and
//! exports a JavaScript-facing pool object.

pub mod dom;
pub mod pool;
pub mod scheduler;

pub use dom::{DomMedia, MARKER_CLASS};
pub use pool::WasmMediaPool;
pub use scheduler::BrowserScheduler;
