//! Platform-agnostic media handle trait
//!
//! Abstracts the host media element and the document tree it lives in
//! (browser `<video>`/`<audio>`, test doubles, etc.)

use crate::error::MediaResult;
use crate::types::MediaSource;
use futures::future::LocalBoxFuture;

/// One reusable playback element owned by a pool
///
/// Handles are cheap to clone and compare by identity: two clones of the
/// same element must be equal. Every method except [`play`](Self::play)
/// completes synchronously.
pub trait MediaHandle: Clone + PartialEq + 'static {
    /// Page location a handle can be placed under
    type Parent: Clone + PartialEq + 'static;

    /// Find the pool-managed handle already placed under `parent`, if any
    fn find_managed(parent: &Self::Parent) -> Option<Self>;

    /// One-time setup: inline playback flags and the pool-managed marker
    fn configure(&self) -> MediaResult<()>;

    /// Current parent, if the handle is placed
    fn parent(&self) -> Option<Self::Parent>;

    /// Append the handle as a child of `parent`
    fn append_to(&self, parent: &Self::Parent) -> MediaResult<()>;

    /// Put the handle in place of `existing` under `parent`
    fn replace(&self, parent: &Self::Parent, existing: &Self) -> MediaResult<()>;

    /// Remove the handle from its parent (no-op when detached)
    fn detach(&self) -> MediaResult<()>;

    /// Replace the candidate source list
    fn set_sources(&self, sources: &[MediaSource]) -> MediaResult<()>;

    /// Ask the host to (re)load from the current sources
    fn load(&self) -> MediaResult<()>;

    fn is_paused(&self) -> bool;

    /// Start playback
    ///
    /// Resolves once the host has accepted or rejected the request.
    fn play(&self) -> LocalBoxFuture<'static, MediaResult<()>>;

    fn pause(&self) -> MediaResult<()>;

    fn is_muted(&self) -> bool;

    fn set_muted(&self, muted: bool) -> MediaResult<()>;

    /// Playback position in seconds
    fn position(&self) -> f64;

    fn set_position(&self, seconds: f64) -> MediaResult<()>;
}
