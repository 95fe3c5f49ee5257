//! Browser event loop as a [`Scheduler`]

use crate::scheduler::defer_or_else;
use crate::Scheduler;
use futures::future::LocalBoxFuture;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Defers with `setTimeout(0)` and drives futures with the microtask queue
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn defer(&self, job: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            // Workers have no window; a spawned future still runs after this turn
            wasm_bindgen_futures::spawn_local(async move { job() });
            return;
        };

        defer_or_else(
            job,
            |trampoline| {
                let callback = Closure::once_into_js(move || trampoline());
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref(),
                        0,
                    )
                    .map(drop)
            },
            |job, e| {
                warn!("setTimeout failed, running media task as a future: {:?}", e);
                wasm_bindgen_futures::spawn_local(async move { job() });
            },
        );
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
