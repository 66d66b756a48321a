//! Headless playback session
//!
//! Runs a queue through the player surface on a simulated media handle,
//! advancing the virtual clock one tick at a time until the queue is
//! cleared or the tick budget runs out.

use crate::{config::CliConfig, error::Result};
use podcastr_playback::{Episode, PlaybackEvent, PlaybackStore};
use podcastr_player::{PlayerSurface, PlayerView, SimulatedMedia};
use std::{path::Path, thread, time::Duration};
use tracing::{debug, info, warn};

/// Outcome of a session
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Ticks the clock advanced
    pub ticks: usize,

    /// Queue ran to its end (false when the tick budget ran out)
    pub finished: bool,

    /// Every store event, in order
    pub events: Vec<PlaybackEvent>,

    /// Last rendered frame
    pub final_view: PlayerView,
}

impl SessionReport {
    /// Number of distinct sources started (initial episode included)
    pub fn episodes_started(&self) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    PlaybackEvent::QueueReplaced { .. } | PlaybackEvent::IndexChanged { .. }
                )
            })
            .count()
    }
}

/// Read a JSON array of episodes
pub fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let contents = std::fs::read_to_string(path)?;
    let episodes: Vec<Episode> = serde_json::from_str(&contents)?;
    debug!(count = episodes.len(), path = %path.display(), "episodes loaded");
    Ok(episodes)
}

/// Play `episodes` from `index` until the queue clears or `max_ticks` pass
pub fn run_session(episodes: Vec<Episode>, index: usize, config: &CliConfig) -> SessionReport {
    let mut media = SimulatedMedia::new();
    for episode in &episodes {
        media.add_source(episode.url.clone(), episode.duration);
    }

    let mut store = PlaybackStore::new(config.playback.clone());
    let mut surface = PlayerSurface::new(media);
    let mut events = Vec::new();

    store.play_list(episodes, index);
    surface.sync(&mut store);

    let mut ticks = 0;
    let mut finished = false;

    while ticks < config.max_ticks {
        surface.pump(&mut store);
        record_events(&mut store, &mut events);

        if store.current_episode().is_none() {
            finished = true;
            break;
        }

        info!("{}", surface.render(&store));

        surface.media_mut().advance(config.seconds_per_tick);
        ticks += 1;

        if config.tick_ms > 0 {
            thread::sleep(Duration::from_millis(config.tick_ms));
        }
    }

    if finished {
        info!(ticks, "queue finished");
    } else {
        // Flush what the last tick produced
        surface.pump(&mut store);
        record_events(&mut store, &mut events);
        warn!(ticks, "tick budget exhausted before the queue finished");
    }

    let final_view = surface.render(&store);
    let _media = surface.detach();

    SessionReport {
        ticks,
        finished,
        events,
        final_view,
    }
}

fn record_events(store: &mut PlaybackStore, events: &mut Vec<PlaybackEvent>) {
    for event in store.drain_events() {
        debug!(?event, "store event");
        events.push(event);
    }
}
