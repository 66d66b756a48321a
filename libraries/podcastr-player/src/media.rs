//! Media handle abstraction
//!
//! The surface drives exactly one media handle: something that can load a
//! URL, play and pause it, seek, and report progress and end-of-track.
//! Browsers, native decoders and the in-process simulator all fit behind
//! [`MediaHandle`].
//!
//! Signal delivery is gated by listener registrations. A registration is a
//! guard: while it is alive the handle reports that kind of signal, and
//! dropping it releases the listener. There is no separate "remove" call
//! to forget, so re-registering on every load cannot pile up callbacks.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

/// Signals emitted by a media handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Enough of the source is loaded to start playback
    DataLoaded,

    /// Playback position moved
    TimeUpdate {
        /// Elapsed seconds reported by the handle
        current_time: f64,
    },

    /// Track reached its end (never emitted while looping)
    Ended,

    /// Playback started, by request or by native controls
    PlayStarted,

    /// Playback paused, by request, native controls, or end of track
    PauseStarted,

    /// Handle-level failure (network, decode)
    Error {
        /// Handle-provided description
        message: String,
    },
}

impl MediaEvent {
    /// Listener kind that must be registered for this event to be delivered
    ///
    /// Errors are always delivered.
    pub fn listener_kind(&self) -> Option<ListenerKind> {
        match self {
            MediaEvent::DataLoaded => Some(ListenerKind::DataLoaded),
            MediaEvent::TimeUpdate { .. } => Some(ListenerKind::TimeUpdate),
            MediaEvent::Ended => Some(ListenerKind::Ended),
            MediaEvent::PlayStarted | MediaEvent::PauseStarted => Some(ListenerKind::PlayState),
            MediaEvent::Error { .. } => None,
        }
    }
}

/// Kinds of signal a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    /// `DataLoaded`
    DataLoaded,
    /// `TimeUpdate`
    TimeUpdate,
    /// `Ended`
    Ended,
    /// `PlayStarted` and `PauseStarted`
    PlayState,
}

/// Live listener registration
///
/// Keep it alive for as long as the signal is wanted. Dropping it releases
/// the listener on the handle that issued it.
#[derive(Debug)]
#[must_use = "dropping a registration releases the listener immediately"]
pub struct ListenerRegistration {
    kind: ListenerKind,
    _token: Arc<()>,
}

impl ListenerRegistration {
    /// Kind of signal this registration listens for
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

/// Listener bookkeeping for media handle implementations
///
/// Holds weak references to registration tokens, so a released guard
/// drops out of every count without any call back into the registry.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<(ListenerKind, Weak<()>)>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kind`
    pub fn register(&mut self, kind: ListenerKind) -> ListenerRegistration {
        self.prune();

        let token = Arc::new(());
        self.entries.push((kind, Arc::downgrade(&token)));

        ListenerRegistration {
            kind,
            _token: token,
        }
    }

    /// Number of live listeners for `kind`
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.entries
            .iter()
            .filter(|(k, token)| *k == kind && token.strong_count() > 0)
            .count()
    }

    /// Whether at least one live listener exists for `kind`
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listener_count(kind) > 0
    }

    /// Whether `event` should be delivered
    pub fn accepts(&self, event: &MediaEvent) -> bool {
        match event.listener_kind() {
            Some(kind) => self.is_listening(kind),
            None => true,
        }
    }

    fn prune(&mut self) {
        self.entries.retain(|(_, token)| token.strong_count() > 0);
    }
}

/// Platform-agnostic media playback handle
///
/// Implementors own one playable source at a time. Commands are
/// fire-and-forget except `load` and `play`, which may be refused.
pub trait MediaHandle {
    /// Attach a new source, replacing the current one
    ///
    /// Does not start playback on its own. Signals the previous source
    /// queued but nobody drained yet must not survive the switch.
    fn load(&mut self, url: &str) -> Result<()>;

    /// Detach the current source, discarding its undrained signals
    fn unload(&mut self);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started (or was already running)
    /// * `Err(_)` - Refused, e.g. by an autoplay policy
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playback position to `seconds` from the start
    fn set_current_time(&mut self, seconds: u64);

    /// Current playback position in seconds
    ///
    /// Read back after a rewind, since not every source can seek.
    fn current_time(&self) -> f64;

    /// Restart the track on end instead of emitting `Ended`
    fn set_looping(&mut self, looping: bool);

    /// Listener registry gating signal delivery
    fn listeners(&mut self) -> &mut ListenerRegistry;

    /// Take all signals emitted since the last drain
    fn drain_events(&mut self) -> Vec<MediaEvent>;
}
