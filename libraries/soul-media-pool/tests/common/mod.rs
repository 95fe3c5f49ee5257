//! Shared test doubles for integration tests

#![allow(dead_code)]

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use soul_media_pool::{
    LocalScheduler, MediaError, MediaHandle, MediaPool, MediaResult, MediaSource, Scheduler,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared log of host calls, formatted as "<id>:<op>"
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Install a test subscriber once (honours RUST_LOG)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A page location that holds at most one media element
#[derive(Clone)]
pub struct Slot {
    pub name: String,
    child: Rc<RefCell<Option<TestMedia>>>,
}

impl Slot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            child: Rc::new(RefCell::new(None)),
        }
    }

    pub fn child(&self) -> Option<TestMedia> {
        self.child.borrow().clone()
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.child, &other.child)
    }
}

#[derive(Default)]
pub struct MediaState {
    pub slot: Option<Slot>,
    pub sources: Vec<MediaSource>,
    pub paused: bool,
    pub muted: bool,
    pub position: f64,
    pub managed: bool,
    pub reject_play: bool,
    pub hold_play: Option<oneshot::Receiver<()>>,
}

/// Fake media element
#[derive(Clone)]
pub struct TestMedia {
    pub id: usize,
    pub state: Rc<RefCell<MediaState>>,
    journal: Journal,
}

impl std::fmt::Debug for TestMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TestMedia({})", self.id)
    }
}

impl PartialEq for TestMedia {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl TestMedia {
    pub fn new(id: usize, journal: &Journal) -> Self {
        Self {
            id,
            state: Rc::new(RefCell::new(MediaState {
                paused: true,
                ..MediaState::default()
            })),
            journal: Rc::clone(journal),
        }
    }

    fn log(&self, op: impl std::fmt::Display) {
        self.journal.borrow_mut().push(format!("{}:{}", self.id, op));
    }

    pub fn slot_name(&self) -> Option<String> {
        self.state.borrow().slot.as_ref().map(|s| s.name.clone())
    }

    pub fn first_source(&self) -> Option<String> {
        self.state.borrow().sources.first().map(|s| s.url.clone())
    }

    pub fn hold_next_play(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().hold_play = Some(rx);
        tx
    }

    pub fn reject_play(&self) {
        self.state.borrow_mut().reject_play = true;
    }
}

impl MediaHandle for TestMedia {
    type Parent = Slot;

    fn find_managed(parent: &Slot) -> Option<Self> {
        parent.child().filter(|m| m.state.borrow().managed)
    }

    fn configure(&self) -> MediaResult<()> {
        self.state.borrow_mut().managed = true;
        Ok(())
    }

    fn parent(&self) -> Option<Slot> {
        self.state.borrow().slot.clone()
    }

    fn append_to(&self, parent: &Slot) -> MediaResult<()> {
        self.log(format_args!("attach:{}", parent.name));
        *parent.child.borrow_mut() = Some(self.clone());
        self.state.borrow_mut().slot = Some(parent.clone());
        Ok(())
    }

    fn replace(&self, parent: &Slot, existing: &Self) -> MediaResult<()> {
        self.log(format_args!("attach:{}", parent.name));
        existing.state.borrow_mut().slot = None;
        *parent.child.borrow_mut() = Some(self.clone());
        self.state.borrow_mut().slot = Some(parent.clone());
        Ok(())
    }

    fn detach(&self) -> MediaResult<()> {
        self.log("detach");
        let slot = self.state.borrow_mut().slot.take();
        if let Some(slot) = slot {
            slot.child.borrow_mut().take();
        }
        Ok(())
    }

    fn set_sources(&self, sources: &[MediaSource]) -> MediaResult<()> {
        self.log("sources");
        self.state.borrow_mut().sources = sources.to_vec();
        Ok(())
    }

    fn load(&self) -> MediaResult<()> {
        self.log("load");
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn play(&self) -> LocalBoxFuture<'static, MediaResult<()>> {
        self.log("play");
        let (gate, reject) = {
            let mut state = self.state.borrow_mut();
            (state.hold_play.take(), state.reject_play)
        };
        let state = Rc::clone(&self.state);
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if reject {
                return Err(MediaError::PlayRejected("autoplay blocked".to_string()));
            }
            state.borrow_mut().paused = false;
            Ok(())
        }
        .boxed_local()
    }

    fn pause(&self) -> MediaResult<()> {
        self.log("pause");
        self.state.borrow_mut().paused = true;
        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.state.borrow().muted
    }

    fn set_muted(&self, muted: bool) -> MediaResult<()> {
        self.log(if muted { "mute" } else { "unmute" });
        self.state.borrow_mut().muted = muted;
        Ok(())
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn set_position(&self, seconds: f64) -> MediaResult<()> {
        self.log(format_args!("seek:{}", seconds));
        self.state.borrow_mut().position = seconds;
        Ok(())
    }
}

/// Pool of `size` test handles with construction work already flushed
pub struct Harness {
    pub scheduler: Rc<LocalScheduler>,
    pub journal: Journal,
    pub pool: MediaPool<TestMedia>,
}

impl Harness {
    pub fn new(size: usize) -> Self {
        init_tracing();
        let scheduler = Rc::new(LocalScheduler::new());
        let journal = Journal::default();
        let factory_journal = Rc::clone(&journal);
        let mut ids = 0..;
        let pool = MediaPool::video(size, scheduler.clone() as Rc<dyn Scheduler>, move || {
            TestMedia::new(ids.next().unwrap_or_default(), &factory_journal)
        });
        scheduler.run_until_idle();
        journal.borrow_mut().clear();
        Self {
            scheduler,
            journal,
            pool,
        }
    }

    pub fn media(&self, index: usize) -> TestMedia {
        self.pool
            .handles()
            .nth(index)
            .cloned()
            .expect("index within pool size")
    }

    pub fn settle(&self) {
        self.scheduler.run_until_idle();
    }

    pub fn drain_journal(&self) -> Vec<String> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }

    /// Journal entries for one handle, without the id prefix
    pub fn ops_for(journal: &[String], id: usize) -> Vec<String> {
        let prefix = format!("{}:", id);
        journal
            .iter()
            .filter_map(|entry| entry.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

pub fn sources(url: &str) -> Vec<MediaSource> {
    vec![MediaSource::new(url, "video/mp4")]
}
