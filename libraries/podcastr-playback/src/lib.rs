//! Podcastr - Playback State
//!
//! The playback-state store behind the Podcastr player.
//!
//! This crate provides:
//! - The episode queue and the active index
//! - Transport flags (playing, looping, shuffling)
//! - Derived navigation (`has_next`, `has_previous`, current episode)
//! - Change events for UI synchronization
//!
//! # Architecture
//!
//! `podcastr-playback` knows nothing about media playback. It never touches
//! a media handle; the player surface reads this state and drives the handle.
//! The store is an explicit value owned by the host and passed by reference
//! to its consumers through [`PlaybackControl`].
//!
//! # Example
//!
//! ```rust
//! use podcastr_playback::{Episode, PlaybackStore};
//!
//! let mut store = PlaybackStore::default();
//!
//! let episode = |title: &str, duration| Episode {
//!     title: title.to_string(),
//!     members: "Diego Fernandes".to_string(),
//!     thumbnail: format!("https://example.com/{title}.jpg"),
//!     duration,
//!     url: format!("https://example.com/{title}.m4a"),
//! };
//!
//! store.play_list(vec![episode("a", 100), episode("b", 200)], 0);
//! assert!(store.has_next());
//!
//! store.play_next();
//! assert_eq!(store.current_episode_index(), 1);
//! assert!(!store.has_next());
//! assert!(store.has_previous());
//! ```

mod events;
mod shuffle;
mod store;
pub mod types;

// Public exports
pub use events::PlaybackEvent;
pub use shuffle::pick_random_index;
pub use store::{PlaybackControl, PlaybackState, PlaybackStore};
pub use types::{Episode, PlaybackConfig};
