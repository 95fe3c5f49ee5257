//! Error types for media pool management

use thiserror::Error;

/// Pool errors
#[derive(Debug, Error)]
pub enum PoolError {
    /// No handle could be made available for a placement
    #[error("Media pool exhausted: {size} handles, none available")]
    Exhausted { size: usize },
}

/// Errors raised by a media task while it runs against a handle
///
/// These never reach the caller of a pool operation. The task queue
/// logs them and moves on to the next task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// The host refused to start playback (e.g. autoplay policy)
    #[error("Play rejected: {0}")]
    PlayRejected(String),

    /// Any other failure reported by the host media primitive
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Result type for task run contracts
pub type MediaResult<T> = std::result::Result<T, MediaError>;
