//! Render model for the player
//!
//! A plain-data description of what the player shows: the current episode
//! (or the empty-state placeholder), the progress track, the time labels,
//! and the enabled/active state of every transport button. Hosts turn this
//! into widgets; nothing here depends on a UI toolkit.

use crate::time_format::format_duration;
use podcastr_playback::PlaybackState;
use serde::Serialize;
use std::fmt;

/// Transport buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransportControl {
    Shuffle,
    Previous,
    PlayPause,
    Next,
    Loop,
}

impl TransportControl {
    /// Every control in display order
    pub const ALL: [TransportControl; 5] = [
        TransportControl::Shuffle,
        TransportControl::Previous,
        TransportControl::PlayPause,
        TransportControl::Next,
        TransportControl::Loop,
    ];
}

/// Icon shown on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayPauseIcon {
    /// Shown while paused
    Play,
    /// Shown while playing
    Pause,
}

/// State of one transport button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ButtonView {
    /// Button ignores activation
    pub disabled: bool,
    /// Button is highlighted (shuffle/loop engaged)
    pub active: bool,
}

/// Episode details shown above the controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeView {
    pub thumbnail: String,
    pub title: String,
    pub members: String,
}

/// Progress track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressView {
    /// Placeholder track, not interactive
    Inert,
    /// Seek control bounded to `[0, max]`
    Seekable { max: u64, value: u64 },
}

/// Everything the player renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    /// `None` renders the "pick an episode" placeholder
    pub episode: Option<EpisodeView>,
    pub progress: ProgressView,
    pub elapsed_label: String,
    pub duration_label: String,
    pub shuffle: ButtonView,
    pub previous: ButtonView,
    pub play_pause: ButtonView,
    pub play_pause_icon: PlayPauseIcon,
    pub next: ButtonView,
    pub repeat: ButtonView,
}

impl PlayerView {
    /// Build the view for `state` with `progress` seconds elapsed
    pub fn render(state: &PlaybackState, progress: u64) -> Self {
        let current = state.current_episode();
        let no_episode = current.is_none();

        let (episode, progress_view, duration) = match current {
            Some(episode) => (
                Some(EpisodeView {
                    thumbnail: episode.thumbnail.clone(),
                    title: episode.title.clone(),
                    members: episode.members.clone(),
                }),
                ProgressView::Seekable {
                    max: episode.duration,
                    value: progress,
                },
                episode.duration,
            ),
            None => (None, ProgressView::Inert, 0),
        };

        Self {
            episode,
            progress: progress_view,
            elapsed_label: format_duration(progress),
            duration_label: format_duration(duration),
            shuffle: ButtonView {
                disabled: no_episode || state.episode_list().len() == 1,
                active: state.is_shuffling(),
            },
            previous: ButtonView {
                disabled: no_episode || !state.has_previous(),
                active: false,
            },
            play_pause: ButtonView {
                disabled: no_episode,
                active: false,
            },
            play_pause_icon: if state.is_playing() {
                PlayPauseIcon::Pause
            } else {
                PlayPauseIcon::Play
            },
            next: ButtonView {
                disabled: no_episode || !state.has_next(),
                active: false,
            },
            repeat: ButtonView {
                disabled: no_episode,
                active: state.is_looping(),
            },
        }
    }

    /// State of a single transport button
    pub fn button(&self, control: TransportControl) -> ButtonView {
        match control {
            TransportControl::Shuffle => self.shuffle,
            TransportControl::Previous => self.previous,
            TransportControl::PlayPause => self.play_pause,
            TransportControl::Next => self.next,
            TransportControl::Loop => self.repeat,
        }
    }

    /// Whether every transport button is disabled
    pub fn all_disabled(&self) -> bool {
        TransportControl::ALL
            .iter()
            .all(|control| self.button(*control).disabled)
    }
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.episode {
            Some(episode) => write!(f, "{} ({})", episode.title, episode.members)?,
            None => write!(f, "<no episode>")?,
        }

        write!(f, " {} / {} ", self.elapsed_label, self.duration_label)?;

        let glyph = |control: TransportControl, label: &str| {
            let button = self.button(control);
            if button.disabled {
                "-".repeat(label.len())
            } else if button.active {
                label.to_uppercase()
            } else {
                label.to_string()
            }
        };

        let play_pause = match self.play_pause_icon {
            PlayPauseIcon::Play => "play",
            PlayPauseIcon::Pause => "pause",
        };

        write!(
            f,
            "[{} {} {} {} {}]",
            glyph(TransportControl::Shuffle, "shuf"),
            glyph(TransportControl::Previous, "prev"),
            glyph(TransportControl::PlayPause, play_pause),
            glyph(TransportControl::Next, "next"),
            glyph(TransportControl::Loop, "loop"),
        )
    }
}
