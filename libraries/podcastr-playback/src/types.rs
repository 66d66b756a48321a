//! Core types for the playback store

use serde::{Deserialize, Serialize};

/// Episode information for queue management
///
/// Immutable once enqueued. Field contents are not validated by the store;
/// the caller that enqueues an episode is responsible for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title
    pub title: String,

    /// Credits / performers
    pub members: String,

    /// Thumbnail URI
    pub thumbnail: String,

    /// Episode length in seconds
    pub duration: u64,

    /// URI of the playable media resource
    pub url: String,
}

/// Configuration for the playback store
///
/// Every flag defaults to off so a fresh store starts idle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial loop flag (default: false)
    pub start_looping: bool,

    /// Initial shuffle flag (default: false)
    pub start_shuffling: bool,

    /// Fixed seed for the shuffle picker (default: seeded from entropy)
    pub shuffle_seed: Option<u64>,
}
