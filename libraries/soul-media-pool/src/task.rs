//! Media tasks
//!
//! Every operation the pool issues against a handle is one [`MediaTask`]
//! variant. [`MediaTask::run`] is the single interpreter for all of them.

use crate::error::MediaResult;
use crate::handle::MediaHandle;
use crate::types::MediaSource;
use std::fmt;

/// When a task runs relative to the turn that reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Same turn as the enqueue (or the completion of the previous task)
    Immediate,

    /// After yielding to the end of the event queue
    Deferred,
}

/// A unit of work against one handle
#[derive(Clone, PartialEq)]
pub enum MediaTask<P> {
    /// Replace the candidate source list
    SetSources(Vec<MediaSource>),

    /// Reload from the current sources
    Load,

    /// Place the handle under a parent
    AttachTo(P),

    /// Remove the handle from its parent
    Detach,

    /// Start playback if paused
    Play,

    Pause,

    Mute,

    Unmute,

    /// Set playback position in seconds
    Seek(f64),

    /// Toggle mute off and back on to unlock audio autoplay
    Bless,
}

impl<P> MediaTask<P> {
    /// Execution mode for this task
    ///
    /// Tree changes and the bless probe must be visible to the caller's
    /// turn, everything else is deferred.
    pub fn execution(&self) -> Execution {
        match self {
            MediaTask::AttachTo(_) | MediaTask::Detach | MediaTask::Bless => Execution::Immediate,
            _ => Execution::Deferred,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            MediaTask::SetSources(_) => "set_sources",
            MediaTask::Load => "load",
            MediaTask::AttachTo(_) => "attach",
            MediaTask::Detach => "detach",
            MediaTask::Play => "play",
            MediaTask::Pause => "pause",
            MediaTask::Mute => "mute",
            MediaTask::Unmute => "unmute",
            MediaTask::Seek(_) => "seek",
            MediaTask::Bless => "bless",
        }
    }

    /// Run this task against `handle`
    pub async fn run<H>(self, handle: &H) -> MediaResult<()>
    where
        H: MediaHandle<Parent = P>,
    {
        match self {
            MediaTask::SetSources(sources) => handle.set_sources(&sources),
            MediaTask::Load => handle.load(),
            MediaTask::AttachTo(parent) => attach(handle, &parent),
            MediaTask::Detach => handle.detach(),
            MediaTask::Play => {
                if !handle.is_paused() {
                    return Ok(());
                }
                handle.play().await
            }
            MediaTask::Pause => handle.pause(),
            MediaTask::Mute => handle.set_muted(true),
            MediaTask::Unmute => handle.set_muted(false),
            MediaTask::Seek(seconds) => handle.set_position(seconds),
            MediaTask::Bless => {
                let was_muted = handle.is_muted();
                handle.set_muted(false)?;
                if was_muted {
                    handle.set_muted(true)?;
                }
                Ok(())
            }
        }
    }
}

fn attach<H: MediaHandle>(handle: &H, parent: &H::Parent) -> MediaResult<()> {
    if handle.parent().as_ref() == Some(parent) {
        return Ok(());
    }
    match H::find_managed(parent) {
        Some(existing) => handle.replace(parent, &existing),
        None => handle.append_to(parent),
    }
}

impl<P> fmt::Debug for MediaTask<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaTask::SetSources(sources) => f.debug_tuple("SetSources").field(sources).finish(),
            MediaTask::Seek(seconds) => f.debug_tuple("Seek").field(seconds).finish(),
            other => f.write_str(other.name()),
        }
    }
}
