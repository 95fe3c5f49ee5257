//! Core types for media pool management

use serde::{Deserialize, Serialize};

/// Empty WAV (44.1kHz mono, zero samples) used to park idle audio handles
pub const BLANK_AUDIO_SRC: &str =
    "data:audio/wav;base64,UklGRiQAAABXQVZFZm10IBAAAAABAAEARKwAAIhYAQACABAAZGF0YQAAAAA=";

/// Empty MP4 (ftyp + free + mdat) used to park idle video handles
pub const BLANK_VIDEO_SRC: &str =
    "data:video/mp4;base64,AAAAHGZ0eXBpc29tAAACAGlzb21pc28ybXA0MQAAAAhmcmVlAAAACG1kYXQ=";

/// Default number of handles per pool
pub const DEFAULT_POOL_SIZE: usize = 5;

/// A playable resource candidate
///
/// A handle receives an ordered list of these; the host picks the first
/// one it can play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Resource URL
    pub url: String,

    /// MIME type hint (e.g. `video/mp4`)
    #[serde(alias = "mimeType")]
    pub mime: String,
}

impl MediaSource {
    pub fn new(url: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime: mime.into(),
        }
    }
}

/// Kind of media element a pool manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `<video>` elements
    Video,

    /// `<audio>` elements
    Audio,
}

impl MediaKind {
    /// Element tag name for this kind
    pub fn tag_name(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }

    /// Blank source loaded into idle handles of this kind
    pub fn default_source(self) -> MediaSource {
        match self {
            MediaKind::Video => MediaSource::new(BLANK_VIDEO_SRC, "video/mp4"),
            MediaKind::Audio => MediaSource::new(BLANK_AUDIO_SRC, "audio/wav"),
        }
    }
}

/// Configuration for a media pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolConfig {
    /// Number of handles created up front (default: 5)
    pub size: usize,

    /// Source loaded into every handle at construction (default: blank video)
    pub default_source: MediaSource,
}

impl PoolConfig {
    /// Default configuration for the given media kind
    pub fn for_kind(kind: MediaKind) -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            default_source: kind.default_source(),
        }
    }

    /// Same configuration with a different pool size
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::for_kind(MediaKind::Video)
    }
}

/// Read-only view of pool state for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    /// Total handles owned by the pool
    pub size: usize,

    /// Handles free for placement
    pub available: usize,

    /// Handles currently placed
    pub in_use: usize,

    /// Whether an active handle is set
    pub has_current: bool,

    /// Global mute flag
    pub muted: bool,

    /// Whether the bless probe has been broadcast
    pub blessed: bool,

    /// Tasks that failed across all handle queues
    pub failed_tasks: u64,
}
