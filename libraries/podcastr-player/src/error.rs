//! Error types for media playback

use thiserror::Error;

/// Media handle errors
///
/// The surface never hands these to its caller. They are logged and, for a
/// rejected play, folded back into the store's playing flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The handle refused to start playback (autoplay policy, no source)
    #[error("Play rejected: {0}")]
    PlayRejected(String),

    /// The handle could not attach the source
    #[error("Failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },
}

/// Result type for media handle operations
pub type Result<T> = std::result::Result<T, MediaError>;
