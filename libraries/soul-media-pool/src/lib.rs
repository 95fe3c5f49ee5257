//! Soul Player - Media Pool
//!
//! Shares a small, fixed set of media elements between any number of
//! media slots on a page.
//!
//! This crate provides:
//! - Per-element task queues (one operation in flight, FIFO, failures isolated)
//! - Placement with reuse: a slot that already hosts pooled media keeps it
//! - Forced recycling of the oldest placement when the pool runs dry
//! - Active-handle tracking (pause previous, rewind new)
//! - Pool-wide mute/unmute with a one-time autoplay "bless"
//!
//! # Architecture
//!
//! `soul-media-pool` is platform-agnostic:
//! - The media element and document tree are reached through [`MediaHandle`]
//! - The event loop is reached through [`Scheduler`]
//! - The `wasm` feature provides both for browsers (`HtmlMediaElement`,
//!   `setTimeout`)
//!
//! # Example: Placing media
//!
//! ```rust,ignore
//! use soul_media_pool::{LocalScheduler, MediaPool, MediaSource, Scheduler};
//! use std::rc::Rc;
//!
//! let scheduler = Rc::new(LocalScheduler::new());
//! let mut pool = MediaPool::video(3, scheduler.clone() as Rc<dyn Scheduler>, || {
//!     MyVideoElement::create()
//! });
//!
//! let media = pool.acquire(&slot, vec![MediaSource::new("/intro.mp4", "video/mp4")])?;
//! pool.set_active(Some(&media));
//! pool.play(&media);
//!
//! // Pump the loop: deferred tasks run here
//! scheduler.run_until_idle();
//! ```

mod error;
mod handle;
mod pool;
mod queue;
mod scheduler;
mod task;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{MediaError, MediaResult, PoolError, Result};
pub use handle::MediaHandle;
pub use pool::MediaPool;
pub use queue::TaskQueue;
pub use scheduler::{LocalScheduler, Scheduler};
pub use task::{Execution, MediaTask};
pub use types::{MediaKind, MediaSource, PoolConfig, PoolSnapshot};
