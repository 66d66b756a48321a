//! Store change events
//!
//! Emitted by every command that actually changes the playback state, so a
//! host can re-render without diffing the whole aggregate.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Queue replaced by `play` or `play_list`
    QueueReplaced {
        /// New queue length
        length: usize,
        /// Index selected in the new queue (may be out of range)
        index: usize,
    },

    /// Active index moved within the current queue
    IndexChanged {
        /// Previous index
        from: usize,
        /// New index
        to: usize,
    },

    /// Playback intent changed
    PlayingChanged {
        /// New value of the playing flag
        is_playing: bool,
    },

    /// Loop flag changed
    LoopingChanged {
        /// New value of the loop flag
        is_looping: bool,
    },

    /// Shuffle flag changed
    ShufflingChanged {
        /// New value of the shuffle flag
        is_shuffling: bool,
    },

    /// Queue emptied and index reset
    Cleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PlaybackEvent::IndexChanged { from: 0, to: 1 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"IndexChanged":{"from":0,"to":1}}"#);

        let back: PlaybackEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
