//! Playback store - single source of truth for what is queued and how it plays
//!
//! Owns the episode queue, the active index and the transport flags. All
//! commands are total: none of them fail, none of them validate input.

use crate::{
    events::PlaybackEvent,
    shuffle::pick_random_index,
    types::{Episode, PlaybackConfig},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// Playback state aggregate
///
/// Only [`PlaybackStore`] mutates it. `has_next`, `has_previous` and the
/// current episode are derived on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    episode_list: Vec<Episode>,
    current_episode_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
}

impl PlaybackState {
    /// Queued episodes in playback order
    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    /// Active index; meaningless when it does not address the queue
    pub fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    /// Whether the transport intends playback
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the current track restarts on end
    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Whether "next" picks a random index
    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Episode at the active index, if the index addresses the queue
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    /// True when the active index is past the first slot
    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    /// True when shuffling, or when a later episode exists
    pub fn has_next(&self) -> bool {
        self.is_shuffling
            || self.current_episode_index.saturating_add(1) < self.episode_list.len()
    }
}

/// Capability interface over the playback store
///
/// Consumers such as the player surface take the store through this trait
/// by reference instead of reaching for shared global state.
pub trait PlaybackControl {
    /// Read-only view of the current state
    fn state(&self) -> &PlaybackState;

    /// Replace the queue with a single episode and start playing it
    fn play(&mut self, episode: Episode);

    /// Replace the queue with `episodes` and start playing at `index`
    fn play_list(&mut self, episodes: Vec<Episode>, index: usize);

    /// Flip the playing flag
    fn toggle_play(&mut self);

    /// Set the playing flag to match what the media handle actually did
    fn set_playing_state(&mut self, state: bool);

    /// Flip the loop flag
    fn toggle_loop(&mut self);

    /// Flip the shuffle flag
    fn toggle_shuffle(&mut self);

    /// Advance to the next (or a random) episode
    fn play_next(&mut self);

    /// Step back one episode
    fn play_previous(&mut self);

    /// Empty the queue and reset the index; flags are kept
    fn clear_player_state(&mut self);
}

/// Playback store
///
/// Created once per application and handed to its consumers explicitly.
///
/// ```rust
/// use podcastr_playback::{Episode, PlaybackStore};
///
/// let mut store = PlaybackStore::default();
/// let episode = Episode {
///     title: "Faladev #30".to_string(),
///     members: "Diego, Richard".to_string(),
///     thumbnail: "https://example.com/thumb.jpg".to_string(),
///     duration: 3981,
///     url: "https://example.com/ep.m4a".to_string(),
/// };
///
/// store.play(episode.clone());
/// assert!(store.is_playing());
/// assert_eq!(store.current_episode(), Some(&episode));
/// ```
pub struct PlaybackStore {
    state: PlaybackState,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackStore {
    /// Create a new store with an empty queue
    pub fn new(config: PlaybackConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: PlaybackState {
                is_looping: config.start_looping,
                is_shuffling: config.start_shuffling,
                ..PlaybackState::default()
            },
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Entry Points =====

    /// Replace the queue with a single episode, index 0, and start playing
    pub fn play(&mut self, episode: Episode) {
        debug!(title = %episode.title, "play single episode");
        self.replace_queue(vec![episode], 0);
    }

    /// Replace the queue with `episodes`, select `index`, and start playing
    ///
    /// `index` is not checked against the queue. An out-of-range index leaves
    /// the store without a current episode.
    pub fn play_list(&mut self, episodes: Vec<Episode>, index: usize) {
        debug!(length = episodes.len(), index, "play episode list");
        self.replace_queue(episodes, index);
    }

    fn replace_queue(&mut self, episodes: Vec<Episode>, index: usize) {
        let length = episodes.len();
        self.state.episode_list = episodes;
        self.state.current_episode_index = index;
        self.pending_events
            .push(PlaybackEvent::QueueReplaced { length, index });
        self.set_playing_state(true);
    }

    // ===== Transport Flags =====

    /// Flip the playing flag
    pub fn toggle_play(&mut self) {
        self.set_playing_state(!self.state.is_playing);
    }

    /// Set the playing flag directly
    ///
    /// Used to reconcile intent with what the media handle actually did,
    /// e.g. when autoplay is blocked or native controls paused the track.
    pub fn set_playing_state(&mut self, state: bool) {
        if self.state.is_playing == state {
            return;
        }
        self.state.is_playing = state;
        debug!(is_playing = state, "playing flag changed");
        self.pending_events
            .push(PlaybackEvent::PlayingChanged { is_playing: state });
    }

    /// Flip the loop flag
    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        debug!(is_looping = self.state.is_looping, "loop flag changed");
        self.pending_events.push(PlaybackEvent::LoopingChanged {
            is_looping: self.state.is_looping,
        });
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        debug!(is_shuffling = self.state.is_shuffling, "shuffle flag changed");
        self.pending_events.push(PlaybackEvent::ShufflingChanged {
            is_shuffling: self.state.is_shuffling,
        });
    }

    // ===== Navigation =====

    /// Advance the active index
    ///
    /// - shuffling: jump to a uniformly random index (may repeat the current one)
    /// - otherwise, if a later episode exists: step forward by one
    /// - otherwise: nothing; deciding to clear instead is up to the caller
    pub fn play_next(&mut self) {
        if self.state.is_shuffling {
            let next = pick_random_index(&mut self.rng, self.state.episode_list.len());
            self.move_to(next);
        } else if self.state.has_next() {
            self.move_to(self.state.current_episode_index + 1);
        }
    }

    /// Step back one episode if there is one before the active index
    pub fn play_previous(&mut self) {
        if self.state.has_previous() {
            self.move_to(self.state.current_episode_index - 1);
        }
    }

    fn move_to(&mut self, index: usize) {
        let from = self.state.current_episode_index;
        self.state.current_episode_index = index;
        if from != index {
            debug!(from, to = index, "active index changed");
            self.pending_events
                .push(PlaybackEvent::IndexChanged { from, to: index });
        }
    }

    /// Empty the queue and reset the index to 0
    ///
    /// Playing, looping and shuffling flags are left as they are.
    pub fn clear_player_state(&mut self) {
        self.state.episode_list.clear();
        self.state.current_episode_index = 0;
        debug!("player state cleared");
        self.pending_events.push(PlaybackEvent::Cleared);
    }

    // ===== State Queries =====

    /// Read-only view of the whole aggregate
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Queued episodes in playback order
    pub fn episode_list(&self) -> &[Episode] {
        self.state.episode_list()
    }

    /// Active index
    pub fn current_episode_index(&self) -> usize {
        self.state.current_episode_index()
    }

    /// Episode at the active index, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    /// Whether the transport intends playback
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Whether the current track restarts on end
    pub fn is_looping(&self) -> bool {
        self.state.is_looping()
    }

    /// Whether "next" picks a random index
    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling()
    }

    /// Whether a next episode is available
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Whether a previous episode is available
    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check for undrained events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl PlaybackControl for PlaybackStore {
    fn state(&self) -> &PlaybackState {
        &self.state
    }

    fn play(&mut self, episode: Episode) {
        PlaybackStore::play(self, episode);
    }

    fn play_list(&mut self, episodes: Vec<Episode>, index: usize) {
        PlaybackStore::play_list(self, episodes, index);
    }

    fn toggle_play(&mut self) {
        PlaybackStore::toggle_play(self);
    }

    fn set_playing_state(&mut self, state: bool) {
        PlaybackStore::set_playing_state(self, state);
    }

    fn toggle_loop(&mut self) {
        PlaybackStore::toggle_loop(self);
    }

    fn toggle_shuffle(&mut self) {
        PlaybackStore::toggle_shuffle(self);
    }

    fn play_next(&mut self) {
        PlaybackStore::play_next(self);
    }

    fn play_previous(&mut self) {
        PlaybackStore::play_previous(self);
    }

    fn clear_player_state(&mut self) {
        PlaybackStore::clear_player_state(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, duration: u64) -> Episode {
        Episode {
            title: title.to_string(),
            members: "Host".to_string(),
            thumbnail: format!("https://example.com/{}.jpg", title),
            duration,
            url: format!("https://example.com/{}.mp3", title),
        }
    }

    fn seeded() -> PlaybackStore {
        PlaybackStore::new(PlaybackConfig {
            shuffle_seed: Some(1),
            ..Default::default()
        })
    }

    #[test]
    fn new_store_is_idle() {
        let store = PlaybackStore::default();
        assert!(store.episode_list().is_empty());
        assert_eq!(store.current_episode_index(), 0);
        assert!(!store.is_playing());
        assert!(!store.is_looping());
        assert!(!store.is_shuffling());
        assert!(store.current_episode().is_none());
        assert!(!store.has_next());
        assert!(!store.has_previous());
    }

    #[test]
    fn config_seeds_flags() {
        let store = PlaybackStore::new(PlaybackConfig {
            start_looping: true,
            start_shuffling: true,
            shuffle_seed: None,
        });
        assert!(store.is_looping());
        assert!(store.is_shuffling());
        assert!(!store.is_playing());
    }

    #[test]
    fn play_replaces_queue_with_single_episode() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10), episode("b", 20)], 1);

        store.play(episode("c", 30));

        assert_eq!(store.episode_list().len(), 1);
        assert_eq!(store.current_episode_index(), 0);
        assert_eq!(store.current_episode().unwrap().title, "c");
        assert!(store.is_playing());
    }

    #[test]
    fn play_list_out_of_range_has_no_current_episode() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10)], 5);

        assert_eq!(store.current_episode_index(), 5);
        assert!(store.current_episode().is_none());
        assert!(store.has_previous());
        assert!(!store.has_next());
        assert!(store.is_playing());
    }

    #[test]
    fn toggle_shuffle_flips_only_shuffle_flag() {
        let mut store = seeded();
        store.play(episode("a", 10));
        assert!(store.is_playing());

        store.toggle_shuffle();
        assert!(store.is_shuffling());
        assert!(store.is_playing());

        store.toggle_shuffle();
        assert!(!store.is_shuffling());
        assert!(store.is_playing());
    }

    #[test]
    fn toggle_loop_flips_loop_flag() {
        let mut store = seeded();
        store.toggle_loop();
        assert!(store.is_looping());
        store.toggle_loop();
        assert!(!store.is_looping());
    }

    #[test]
    fn shuffle_makes_has_next_true_at_queue_end() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10), episode("b", 20)], 1);
        assert!(!store.has_next());

        store.toggle_shuffle();
        assert!(store.has_next());
    }

    #[test]
    fn shuffle_next_on_empty_queue_resets_index() {
        let mut store = seeded();
        store.toggle_shuffle();
        store.play_next();
        assert_eq!(store.current_episode_index(), 0);
        assert!(store.current_episode().is_none());
    }

    #[test]
    fn shuffle_onto_same_index_emits_nothing() {
        let mut store = seeded();
        store.play(episode("a", 10));
        store.toggle_shuffle();
        store.drain_events();

        store.play_next();

        assert_eq!(store.current_episode_index(), 0);
        assert!(!store.has_pending_events());
    }

    #[test]
    fn play_previous_at_start_is_noop() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10), episode("b", 20)], 0);
        store.drain_events();

        store.play_previous();

        assert_eq!(store.current_episode_index(), 0);
        assert!(!store.has_pending_events());
    }

    #[test]
    fn clear_keeps_flags() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10), episode("b", 20)], 1);
        store.toggle_loop();
        store.toggle_shuffle();

        store.clear_player_state();

        assert!(store.episode_list().is_empty());
        assert_eq!(store.current_episode_index(), 0);
        assert!(store.is_playing());
        assert!(store.is_looping());
        assert!(store.is_shuffling());
    }

    #[test]
    fn commands_emit_events() {
        let mut store = seeded();
        store.play_list(vec![episode("a", 10), episode("b", 20)], 0);
        store.play_next();
        store.toggle_play();
        store.clear_player_state();

        assert_eq!(
            store.drain_events(),
            vec![
                PlaybackEvent::QueueReplaced {
                    length: 2,
                    index: 0
                },
                PlaybackEvent::PlayingChanged { is_playing: true },
                PlaybackEvent::IndexChanged { from: 0, to: 1 },
                PlaybackEvent::PlayingChanged { is_playing: false },
                PlaybackEvent::Cleared,
            ]
        );
        assert!(!store.has_pending_events());
    }

    #[test]
    fn redundant_playing_state_emits_nothing() {
        let mut store = seeded();
        store.set_playing_state(false);
        assert!(!store.has_pending_events());
    }

    #[test]
    fn trait_object_drives_store() {
        let mut store = seeded();
        {
            let control: &mut dyn PlaybackControl = &mut store;
            control.play_list(vec![episode("a", 10), episode("b", 20)], 0);
            control.play_next();
            assert_eq!(control.state().current_episode_index(), 1);
        }
        assert_eq!(store.current_episode().unwrap().title, "b");
    }
}
