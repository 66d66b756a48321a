//! Podcastr - Player Surface
//!
//! The transport surface of the Podcastr player: it binds one media handle
//! to the playback store and describes what the player should render.
//!
//! This crate provides:
//! - [`MediaHandle`], the platform-agnostic media playback abstraction
//! - Scoped listener registrations ([`ListenerRegistration`])
//! - [`PlayerSurface`], the store ↔ handle synchronization
//! - [`PlayerView`], a toolkit-independent render model
//! - [`SimulatedMedia`], a virtual-clock handle for headless hosts and tests
//! - `MM:SS` time labels
//!
//! # Example
//!
//! ```rust
//! use podcastr_playback::{Episode, PlaybackStore};
//! use podcastr_player::{PlayerSurface, SimulatedMedia, TransportControl};
//!
//! let episode = Episode {
//!     title: "Faladev #30".to_string(),
//!     members: "Diego e Richard".to_string(),
//!     thumbnail: "https://example.com/faladev.jpg".to_string(),
//!     duration: 3981,
//!     url: "https://example.com/faladev.m4a".to_string(),
//! };
//!
//! let mut media = SimulatedMedia::new();
//! media.add_source(episode.url.clone(), episode.duration);
//!
//! let mut store = PlaybackStore::default();
//! let mut surface = PlayerSurface::new(media);
//!
//! store.play(episode);
//! surface.sync(&mut store);
//! surface.pump(&mut store);
//!
//! surface.media_mut().advance(75.0);
//! surface.pump(&mut store);
//!
//! let view = surface.render(&store);
//! assert_eq!(view.elapsed_label, "01:15");
//! assert_eq!(view.duration_label, "66:21");
//!
//! surface.activate(TransportControl::PlayPause, &mut store);
//! assert!(!store.is_playing());
//! ```

mod error;
mod media;
mod simulated;
mod surface;
mod time_format;
pub mod view;

// Public exports
pub use error::{MediaError, Result};
pub use media::{ListenerKind, ListenerRegistration, ListenerRegistry, MediaEvent, MediaHandle};
pub use simulated::SimulatedMedia;
pub use surface::PlayerSurface;
pub use time_format::format_duration;
pub use view::{ButtonView, EpisodeView, PlayPauseIcon, PlayerView, ProgressView, TransportControl};
