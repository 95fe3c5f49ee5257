//! Deferred execution primitive
//!
//! Task queues never block. Deferred tasks and suspended run contracts are
//! handed to a [`Scheduler`] that owns the event loop of the host.

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::RefCell;
use tracing::warn;

/// Single-threaded event loop used by task queues
pub trait Scheduler {
    /// Run `job` after the current turn has finished
    fn defer(&self, job: Box<dyn FnOnce()>);

    /// Drive `future` to completion on the current thread
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}

/// Hand `job` to `schedule`, or to `fallback` when `schedule` refuses it
///
/// `schedule` only receives a trampoline. The job stays reachable until
/// scheduling succeeded, so it runs exactly once either way.
#[cfg(any(feature = "wasm", test))]
pub(crate) fn defer_or_else<E>(
    job: Box<dyn FnOnce()>,
    schedule: impl FnOnce(Box<dyn FnOnce()>) -> Result<(), E>,
    fallback: impl FnOnce(Box<dyn FnOnce()>, E),
) {
    use std::rc::Rc;

    let slot = Rc::new(RefCell::new(Some(job)));
    let scheduled = Rc::clone(&slot);
    let trampoline: Box<dyn FnOnce()> = Box::new(move || {
        let job = scheduled.borrow_mut().take();
        if let Some(job) = job {
            job();
        }
    });

    if let Err(e) = schedule(trampoline) {
        let job = slot.borrow_mut().take();
        if let Some(job) = job {
            fallback(job, e);
        }
    }
}

/// Scheduler backed by a `futures` [`LocalPool`]
///
/// Nothing runs until [`run_until_idle`](Self::run_until_idle) is called,
/// which makes it suitable for native hosts that pump their own loop and
/// for deterministic tests.
pub struct LocalScheduler {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl LocalScheduler {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
        }
    }

    /// Run every deferred job and spawned future until none can make progress
    ///
    /// Futures waiting on something outside the pool stay parked.
    ///
    /// # Panics
    /// Panics if called from inside a job this scheduler is running.
    pub fn run_until_idle(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}

impl Default for LocalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for LocalScheduler {
    fn defer(&self, job: Box<dyn FnOnce()>) {
        self.spawn_local(Box::pin(async move { job() }));
    }

    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(future) {
            warn!("Failed to spawn media task: {}", e);
        }
    }
}
