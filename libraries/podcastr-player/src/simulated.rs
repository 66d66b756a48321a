//! In-process media handle
//!
//! Plays nothing; advances a virtual clock instead. Emits the same signal
//! sequence a browser audio element does (time updates, then pause and
//! ended at the end of a non-looping track), so hosts and tests can run
//! the surface headless.

use crate::{
    error::{MediaError, Result},
    media::{ListenerRegistry, MediaEvent, MediaHandle},
};
use std::collections::HashMap;
use tracing::trace;

/// Virtual-clock media handle
#[derive(Debug)]
pub struct SimulatedMedia {
    /// Known sources and their lengths in seconds
    sources: HashMap<String, f64>,

    /// Attached source URL
    url: Option<String>,

    /// Length of the attached source
    duration: f64,

    /// Playback position in seconds
    position: f64,

    paused: bool,
    looping: bool,

    /// Refuse `play()` until a user gesture is simulated
    autoplay_blocked: bool,

    listeners: ListenerRegistry,
    pending_events: Vec<MediaEvent>,
}

impl SimulatedMedia {
    /// Create a handle with no known sources
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            url: None,
            duration: 0.0,
            position: 0.0,
            paused: true,
            looping: false,
            autoplay_blocked: false,
            listeners: ListenerRegistry::new(),
            pending_events: Vec::new(),
        }
    }

    /// Make `url` loadable with the given length
    pub fn add_source(&mut self, url: impl Into<String>, duration_secs: u64) {
        self.sources.insert(url.into(), duration_secs as f64);
    }

    /// Refuse playback requests, as a browser autoplay policy would
    pub fn block_autoplay(&mut self) {
        self.autoplay_blocked = true;
    }

    /// Lift the autoplay block, as a user gesture would
    pub fn allow_playback(&mut self) {
        self.autoplay_blocked = false;
    }

    /// Attached source URL
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the loop attribute is set
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Pause through "native controls", bypassing the surface
    pub fn native_pause(&mut self) {
        self.pause();
    }

    /// Advance the clock by `seconds` of playback
    ///
    /// Does nothing while paused or without a source.
    pub fn advance(&mut self, seconds: f64) {
        if self.paused || self.url.is_none() {
            return;
        }

        self.position += seconds;

        if self.position < self.duration {
            self.emit(MediaEvent::TimeUpdate {
                current_time: self.position,
            });
            return;
        }

        if self.looping {
            // A zero-length source just sits at 0
            self.position = if self.duration > 0.0 {
                self.position % self.duration
            } else {
                0.0
            };
            self.emit(MediaEvent::TimeUpdate {
                current_time: self.position,
            });
            return;
        }

        self.position = self.duration;
        self.emit(MediaEvent::TimeUpdate {
            current_time: self.position,
        });
        self.paused = true;
        self.emit(MediaEvent::PauseStarted);
        self.emit(MediaEvent::Ended);
    }

    fn emit(&mut self, event: MediaEvent) {
        if self.listeners.accepts(&event) {
            trace!(?event, "media event");
            self.pending_events.push(event);
        }
    }
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaHandle for SimulatedMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        let Some(&duration) = self.sources.get(url) else {
            self.unload();
            return Err(MediaError::LoadFailed {
                url: url.to_string(),
                reason: "unknown source".to_string(),
            });
        };

        self.pending_events.clear();
        self.url = Some(url.to_string());
        self.duration = duration;
        self.position = 0.0;
        self.paused = true;
        self.emit(MediaEvent::DataLoaded);
        Ok(())
    }

    fn unload(&mut self) {
        self.pending_events.clear();
        self.url = None;
        self.duration = 0.0;
        self.position = 0.0;
        self.paused = true;
    }

    fn play(&mut self) -> Result<()> {
        if self.url.is_none() {
            return Err(MediaError::PlayRejected("no source attached".to_string()));
        }
        if self.autoplay_blocked {
            return Err(MediaError::PlayRejected(
                "playback requires a user gesture".to_string(),
            ));
        }
        if self.paused {
            self.paused = false;
            self.emit(MediaEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(MediaEvent::PauseStarted);
        }
    }

    fn set_current_time(&mut self, seconds: u64) {
        if self.url.is_none() {
            return;
        }
        self.position = (seconds as f64).min(self.duration);
        self.emit(MediaEvent::TimeUpdate {
            current_time: self.position,
        });
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn listeners(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
