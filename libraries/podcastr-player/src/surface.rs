//! Player surface - binds one media handle to the playback store
//!
//! The surface reads store state and commands the handle (store → handle),
//! and turns handle signals back into store commands (handle → store). It
//! owns the elapsed-time progress value and produces the render model.
//!
//! The host owns both the store and the surface and passes the store in by
//! reference on every call:
//!
//! ```text
//! host ── play_list ──▶ store
//! host ── sync/pump ──▶ surface ── load/play/pause ──▶ media handle
//!                          ▲                               │
//!                          └──── DataLoaded/TimeUpdate ────┘
//!                                Ended/PlayStarted/...
//! ```

use crate::{
    media::{ListenerKind, ListenerRegistration, MediaEvent, MediaHandle},
    view::{PlayerView, TransportControl},
};
use podcastr_playback::PlaybackControl;
use tracing::{debug, warn};

/// Transport surface over a single media handle
pub struct PlayerSurface<M: MediaHandle> {
    media: M,

    /// Seconds elapsed in the current track
    progress: u64,

    /// Source currently attached to the handle
    loaded_url: Option<String>,

    /// Playing flag the handle was last driven to
    reconciled_playing: bool,

    /// Loop flag the handle was last driven to
    reconciled_looping: bool,

    /// Progress listener for the attached source; released on source change
    time_listener: Option<ListenerRegistration>,

    /// Listeners held for the surface's whole lifetime
    handlers: Vec<ListenerRegistration>,
}

impl<M: MediaHandle> PlayerSurface<M> {
    /// Take ownership of `media` and subscribe to its lifecycle signals
    pub fn new(mut media: M) -> Self {
        let handlers = vec![
            media.listeners().register(ListenerKind::DataLoaded),
            media.listeners().register(ListenerKind::Ended),
            media.listeners().register(ListenerKind::PlayState),
        ];

        Self {
            media,
            progress: 0,
            loaded_url: None,
            reconciled_playing: false,
            reconciled_looping: false,
            time_listener: None,
            handlers,
        }
    }

    // ===== Accessors =====

    /// Seconds elapsed in the current track
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Whether a progress listener is attached for the current source
    pub fn is_tracking_progress(&self) -> bool {
        self.time_listener.is_some()
    }

    /// Source URL attached to the handle
    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded_url.as_deref()
    }

    /// The underlying media handle
    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the media handle (clock, native controls)
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    // ===== Store → Handle =====

    /// Bring the handle in line with the store
    ///
    /// - a different current episode attaches its source (or detaches when
    ///   there is none) and auto-plays it
    /// - a changed playing flag plays or pauses the handle
    /// - a changed loop flag is forwarded to the handle
    pub fn sync<S: PlaybackControl + ?Sized>(&mut self, store: &mut S) {
        let state = store.state();
        let url = state.current_episode().map(|episode| episode.url.clone());
        let is_looping = state.is_looping();

        if is_looping != self.reconciled_looping {
            self.media.set_looping(is_looping);
            self.reconciled_looping = is_looping;
        }

        if url != self.loaded_url {
            // New sources autoplay; the flag only matters from here on
            self.reconciled_playing = store.state().is_playing();
            self.attach_source(url, store);
        }

        let is_playing = store.state().is_playing();
        if is_playing != self.reconciled_playing {
            self.reconciled_playing = is_playing;

            if self.loaded_url.is_some() {
                if is_playing {
                    self.start_playback(store);
                } else {
                    self.media.pause();
                }
            }
        }
    }

    fn attach_source<S: PlaybackControl + ?Sized>(&mut self, url: Option<String>, store: &mut S) {
        self.time_listener = None;
        self.progress = 0;

        // Undrained signals belong to the outgoing source
        let stale = self.media.drain_events();
        if !stale.is_empty() {
            debug!(count = stale.len(), "discarding signals from previous source");
        }

        let Some(url) = url else {
            self.media.unload();
            self.loaded_url = None;
            debug!("source detached");
            return;
        };

        let result = self.media.load(&url);
        match &result {
            Ok(()) => debug!(%url, "source attached"),
            Err(e) => warn!(error = %e, "failed to attach source"),
        }

        // Remembered even on failure, so the same source is not retried
        self.loaded_url = Some(url);
        if result.is_ok() {
            self.start_playback(store);
        }
    }

    fn start_playback<S: PlaybackControl + ?Sized>(&mut self, store: &mut S) {
        let started = match self.media.play() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "media handle refused to play");
                false
            }
        };
        self.reconciled_playing = started;
        store.set_playing_state(started);
    }

    // ===== Handle → Store =====

    /// React to one media signal
    pub fn handle_media_event<S: PlaybackControl + ?Sized>(
        &mut self,
        event: MediaEvent,
        store: &mut S,
    ) {
        match event {
            MediaEvent::DataLoaded => self.setup_progress_listener(),
            MediaEvent::TimeUpdate { current_time } => {
                if self.time_listener.is_some() {
                    self.progress = whole_seconds(current_time);
                }
            }
            MediaEvent::Ended => self.handle_episode_ended(store),
            MediaEvent::PlayStarted => store.set_playing_state(true),
            MediaEvent::PauseStarted => store.set_playing_state(false),
            MediaEvent::Error { message } => warn!(%message, "media handle error"),
        }
    }

    fn setup_progress_listener(&mut self) {
        // Release before re-registering so at most one is ever live
        self.time_listener = None;
        self.media.set_current_time(0);
        self.progress = whole_seconds(self.media.current_time());
        self.time_listener = Some(self.media.listeners().register(ListenerKind::TimeUpdate));
    }

    fn handle_episode_ended<S: PlaybackControl + ?Sized>(&mut self, store: &mut S) {
        if !store.state().has_next() {
            debug!("queue finished");
            store.clear_player_state();
            return;
        }

        store.play_next();

        // Shuffle can land on the episode that just ended; replay it
        let same_source = store
            .state()
            .current_episode()
            .is_some_and(|episode| Some(episode.url.as_str()) == self.loaded_url.as_deref());
        if same_source {
            debug!("replaying current episode");
            self.media.set_current_time(0);
            self.progress = whole_seconds(self.media.current_time());
            self.start_playback(store);
        }
    }

    /// Drain the handle's signals, react to each, then re-sync
    ///
    /// Syncs first as well, so a source change made on the store since the
    /// last call drops the old source's signals instead of applying them to
    /// the new episode.
    pub fn pump<S: PlaybackControl + ?Sized>(&mut self, store: &mut S) {
        self.sync(store);
        for event in self.media.drain_events() {
            self.handle_media_event(event, store);
        }
        self.sync(store);
    }

    // ===== User Input =====

    /// Seek to `amount` seconds
    ///
    /// Progress moves immediately instead of waiting for the handle's next
    /// time update.
    pub fn handle_seek(&mut self, amount: u64) {
        self.media.set_current_time(amount);
        self.progress = amount;
    }

    /// Press a transport button
    ///
    /// Disabled buttons do nothing. Returns whether the press went through.
    pub fn activate<S: PlaybackControl + ?Sized>(
        &mut self,
        control: TransportControl,
        store: &mut S,
    ) -> bool {
        if self.render(store).button(control).disabled {
            debug!(?control, "ignoring disabled control");
            return false;
        }

        match control {
            TransportControl::Shuffle => store.toggle_shuffle(),
            TransportControl::Previous => store.play_previous(),
            TransportControl::PlayPause => store.toggle_play(),
            TransportControl::Next => store.play_next(),
            TransportControl::Loop => store.toggle_loop(),
        }

        self.sync(store);
        true
    }

    // ===== Rendering =====

    /// Render model for the current store state and progress
    pub fn render<S: PlaybackControl + ?Sized>(&self, store: &S) -> PlayerView {
        PlayerView::render(store.state(), self.progress)
    }

    // ===== Teardown =====

    /// Release every listener, detach the source, and hand the media back
    pub fn detach(mut self) -> M {
        self.time_listener = None;
        self.handlers.clear();
        self.media.unload();
        debug!("surface detached");
        self.media
    }
}

/// Floor a handle-reported time to whole seconds
///
/// Saturating cast: negative and NaN both become 0.
fn whole_seconds(seconds: f64) -> u64 {
    seconds.floor() as u64
}
