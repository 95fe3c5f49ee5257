//! Media pool - allocation and broadcast
//!
//! Shares a fixed set of handles between any number of page locations.
//! Placing a handle when none is free recycles the oldest placement.

use crate::{
    error::{PoolError, Result},
    handle::MediaHandle,
    queue::TaskQueue,
    scheduler::Scheduler,
    task::MediaTask,
    types::{MediaKind, MediaSource, PoolConfig, PoolSnapshot},
};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Fixed-size pool of reusable media handles
///
/// Every handle is always in exactly one of two sets:
/// ```text
/// available:   [C, D]        free, oldest freed first
/// unavailable: [A, B]        placed, oldest placed first
/// ```
/// `current` is the handle playback commands are focused on, if any.
pub struct MediaPool<H: MediaHandle> {
    default_source: MediaSource,

    /// One queue per owned handle, in construction order
    queues: Vec<TaskQueue<H>>,

    available: Vec<H>,
    unavailable: Vec<H>,

    current: Option<H>,

    /// Applies to handles as they are played; starts muted
    muted: bool,

    /// Bless probe already broadcast (never reset)
    blessed: bool,
}

impl<H: MediaHandle> MediaPool<H> {
    /// Create a pool over an existing set of handles
    ///
    /// Each handle is muted, configured for inline playback, marked as
    /// pool-managed and queued to load `default_source`.
    pub fn new(default_source: MediaSource, handles: Vec<H>, scheduler: Rc<dyn Scheduler>) -> Self {
        let mut queues = Vec::with_capacity(handles.len());

        for handle in &handles {
            if let Err(e) = handle.set_muted(true).and_then(|()| handle.configure()) {
                warn!("Failed to configure pooled media: {}", e);
            }
            let queue = TaskQueue::new(handle.clone(), Rc::clone(&scheduler));
            queue.enqueue(MediaTask::SetSources(vec![default_source.clone()]));
            queue.enqueue(MediaTask::Load);
            queues.push(queue);
        }

        info!("Media pool created with {} handles", handles.len());

        Self {
            default_source,
            queues,
            available: handles,
            unavailable: Vec::new(),
            current: None,
            muted: true,
            blessed: false,
        }
    }

    /// Create a pool of `config.size` handles built by `factory`
    pub fn from_config(
        config: PoolConfig,
        scheduler: Rc<dyn Scheduler>,
        factory: impl FnMut() -> H,
    ) -> Self {
        let handles = std::iter::repeat_with(factory).take(config.size).collect();
        Self::new(config.default_source, handles, scheduler)
    }

    /// Video pool of `size` handles parked on a blank video
    pub fn video(size: usize, scheduler: Rc<dyn Scheduler>, factory: impl FnMut() -> H) -> Self {
        Self::from_config(
            PoolConfig::for_kind(MediaKind::Video).with_size(size),
            scheduler,
            factory,
        )
    }

    /// Audio pool of `size` handles parked on a blank audio clip
    pub fn audio(size: usize, scheduler: Rc<dyn Scheduler>, factory: impl FnMut() -> H) -> Self {
        Self::from_config(
            PoolConfig::for_kind(MediaKind::Audio).with_size(size),
            scheduler,
            factory,
        )
    }

    // ===== Allocation =====

    /// Place a handle under `parent` playing from `sources`
    ///
    /// Returns the handle already placed under `parent` if there is one.
    /// Otherwise takes a free handle, recycling the oldest placement when
    /// none is free.
    ///
    /// The lookup sees the document as it is now. Placements still waiting
    /// in a handle's queue are invisible to it, so hosts should let the
    /// scheduler run before asking again for the same parent.
    pub fn acquire(&mut self, parent: &H::Parent, sources: Vec<MediaSource>) -> Result<H> {
        if let Some(existing) = H::find_managed(parent) {
            debug!("Parent already hosts pooled media, reusing it");
            // Freed but never moved: take it back so it is not handed out twice
            if let Some(index) = self.available.iter().position(|h| *h == existing) {
                self.available.remove(index);
                self.unavailable.push(existing.clone());
            }
            return Ok(existing);
        }

        if self.available.is_empty() {
            if let Some(oldest) = self.unavailable.first().cloned() {
                debug!("No free media, recycling the oldest placement");
                self.free(&oldest);
            }
        }

        if self.available.is_empty() {
            return Err(PoolError::Exhausted { size: self.size() });
        }
        let handle = self.available.remove(0);
        self.unavailable.push(handle.clone());

        if let Some(queue) = self.queue(&handle) {
            queue.enqueue(MediaTask::Detach);
            queue.enqueue(MediaTask::AttachTo(parent.clone()));
            queue.enqueue(MediaTask::SetSources(sources));
            queue.enqueue(MediaTask::Load);
        }

        Ok(handle)
    }

    /// Return a handle to the free set
    ///
    /// Pauses and rewinds it. Freeing a free handle only re-queues the
    /// pause and rewind.
    pub fn free(&mut self, handle: &H) {
        let Some(queue) = self.queue(handle) else {
            warn!("Ignoring free of media not owned by this pool");
            return;
        };
        queue.enqueue(MediaTask::Pause);
        queue.enqueue(MediaTask::Seek(0.0));

        self.unavailable.retain(|h| h != handle);
        if !self.available.contains(handle) {
            self.available.push(handle.clone());
        }
    }

    /// Free every placed handle
    pub fn free_all(&mut self) {
        let placed = self.unavailable.clone();
        for handle in &placed {
            self.free(handle);
        }
    }

    // ===== Playback =====

    /// Focus playback on `handle`, or on nothing
    ///
    /// The previous active handle is paused. The new one is rewound.
    /// A handle this pool does not own leaves the active handle unchanged.
    pub fn set_active(&mut self, handle: Option<&H>) {
        match handle {
            Some(handle) => {
                let Some(queue) = self.queue(handle).cloned() else {
                    warn!("Ignoring activation of media not owned by this pool");
                    return;
                };
                if let Some(previous) = self.current.take() {
                    if &previous != handle {
                        self.pause(&previous);
                    }
                }
                self.current = Some(handle.clone());
                queue.enqueue(MediaTask::Seek(0.0));
            }
            None => {
                if let Some(previous) = self.current.take() {
                    self.pause(&previous);
                }
            }
        }
    }

    /// Play `handle`, unmuting it first if the pool is unmuted
    pub fn play(&self, handle: &H) {
        let Some(queue) = self.queue(handle) else {
            warn!("Ignoring play of media not owned by this pool");
            return;
        };
        if !self.muted {
            queue.enqueue(MediaTask::Unmute);
        }
        queue.enqueue(MediaTask::Play);
    }

    pub fn pause(&self, handle: &H) {
        let Some(queue) = self.queue(handle) else {
            warn!("Ignoring pause of media not owned by this pool");
            return;
        };
        queue.enqueue(MediaTask::Pause);
    }

    /// Rewind and play `handle`
    pub fn restart(&self, handle: &H) {
        let Some(queue) = self.queue(handle) else {
            warn!("Ignoring restart of media not owned by this pool");
            return;
        };
        queue.enqueue(MediaTask::Seek(0.0));
        queue.enqueue(MediaTask::Play);
    }

    // ===== Volume =====

    /// Mute every handle
    pub fn mute_all(&mut self) {
        for queue in &self.queues {
            queue.enqueue(MediaTask::Mute);
        }
        self.muted = true;
    }

    /// Unmute the active handle and let later plays unmute theirs
    ///
    /// The first call also blesses every handle.
    pub fn unmute_all(&mut self) {
        self.bless_once();
        if let Some(current) = &self.current {
            if let Some(queue) = self.queue(current) {
                queue.enqueue(MediaTask::Unmute);
            }
        }
        self.muted = false;
    }

    fn bless_once(&mut self) {
        if self.blessed {
            return;
        }
        debug!("Blessing {} pooled media", self.queues.len());
        for queue in &self.queues {
            queue.enqueue(MediaTask::Bless);
        }
        self.blessed = true;
    }

    // ===== State Queries =====

    /// Total number of handles
    pub fn size(&self) -> usize {
        self.queues.len()
    }

    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    pub fn in_use_len(&self) -> usize {
        self.unavailable.len()
    }

    pub fn is_in_use(&self, handle: &H) -> bool {
        self.unavailable.contains(handle)
    }

    pub fn owns(&self, handle: &H) -> bool {
        self.queue(handle).is_some()
    }

    /// Active handle, if any
    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_blessed(&self) -> bool {
        self.blessed
    }

    pub fn default_source(&self) -> &MediaSource {
        &self.default_source
    }

    /// All owned handles in construction order
    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.queues.iter().map(TaskQueue::handle)
    }

    /// Task queue for `handle`
    pub fn queue(&self, handle: &H) -> Option<&TaskQueue<H>> {
        self.queues.iter().find(|q| q.handle() == handle)
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            size: self.size(),
            available: self.available.len(),
            in_use: self.unavailable.len(),
            has_current: self.current.is_some(),
            muted: self.muted,
            blessed: self.blessed,
            failed_tasks: self.queues.iter().map(TaskQueue::failed).sum(),
        }
    }
}
