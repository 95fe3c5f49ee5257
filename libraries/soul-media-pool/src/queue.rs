//! Per-handle task queue
//!
//! Serializes every operation against one handle:
//!
//! ```text
//! enqueue ──► [ t1 | t2 | t3 ] ──► run t1 ──► run t2 ──► ... ──► idle
//!                                  (one at a time, FIFO)
//! ```
//!
//! A failing task is logged and skipped; the queue always moves on.

use crate::error::MediaResult;
use crate::handle::MediaHandle;
use crate::scheduler::Scheduler;
use crate::task::{Execution, MediaTask};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, warn};

/// Ordered task queue bound to a single handle
///
/// Clones share the same queue.
pub struct TaskQueue<H: MediaHandle> {
    handle: H,
    state: Rc<RefCell<QueueState<H::Parent>>>,
    scheduler: Rc<dyn Scheduler>,
}

struct QueueState<P> {
    pending: VecDeque<MediaTask<P>>,

    /// A task is running or scheduled to run
    running: bool,

    completed: u64,
    failed: u64,
}

/// Outcome of starting one task
enum Step {
    /// Finished in the current turn
    Done,

    /// Parked on the scheduler; the queue resumes when it resolves
    Suspended,
}

impl<H: MediaHandle> TaskQueue<H> {
    pub fn new(handle: H, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            handle,
            state: Rc::new(RefCell::new(QueueState {
                pending: VecDeque::new(),
                running: false,
                completed: 0,
                failed: 0,
            })),
            scheduler,
        }
    }

    /// Handle this queue owns
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Append a task
    ///
    /// Starts executing right away when the queue was idle.
    pub fn enqueue(&self, task: MediaTask<H::Parent>) {
        let start = {
            let mut state = self.state.borrow_mut();
            state.pending.push_back(task);
            !std::mem::replace(&mut state.running, true)
        };
        if start {
            self.drain();
        }
    }

    /// Number of tasks waiting (excludes the one in flight)
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// True when nothing is running or waiting
    pub fn is_idle(&self) -> bool {
        !self.state.borrow().running
    }

    /// Tasks that finished successfully
    pub fn completed(&self) -> u64 {
        self.state.borrow().completed
    }

    /// Tasks whose run contract failed
    pub fn failed(&self) -> u64 {
        self.state.borrow().failed
    }

    /// Start pending tasks until one has to wait or none remain
    fn drain(&self) {
        loop {
            let next = self.state.borrow_mut().pending.pop_front();
            let Some(task) = next else {
                self.state.borrow_mut().running = false;
                return;
            };

            match task.execution() {
                Execution::Immediate => {
                    if let Step::Suspended = self.run(task) {
                        return;
                    }
                }
                Execution::Deferred => {
                    let queue = self.clone();
                    self.scheduler.defer(Box::new(move || {
                        if let Step::Done = queue.run(task) {
                            queue.drain();
                        }
                    }));
                    return;
                }
            }
        }
    }

    fn run(&self, task: MediaTask<H::Parent>) -> Step {
        let name = task.name();
        let handle = self.handle.clone();
        let mut future: LocalBoxFuture<'static, MediaResult<()>> =
            Box::pin(async move { task.run(&handle).await });

        if let Some(result) = future.as_mut().now_or_never() {
            self.finish(name, result);
            return Step::Done;
        }

        debug!("Media task '{}' suspended", name);
        let queue = self.clone();
        self.scheduler.spawn_local(Box::pin(async move {
            let result = future.await;
            queue.finish(name, result);
            queue.drain();
        }));
        Step::Suspended
    }

    fn finish(&self, name: &'static str, result: MediaResult<()>) {
        let mut state = self.state.borrow_mut();
        match result {
            Ok(()) => state.completed += 1,
            Err(e) => {
                state.failed += 1;
                warn!("Media task '{}' failed: {}", name, e);
            }
        }
    }
}

impl<H: MediaHandle> Clone for TaskQueue<H> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            state: Rc::clone(&self.state),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}
