//! Random episode selection for shuffle mode
//!
//! Shuffle does not reorder the queue. Each "next" picks an index uniformly
//! from the whole queue, the current one included.

use rand::Rng;

/// Pick a uniformly random index in `[0, len)`
///
/// Returns 0 for an empty queue.
pub fn pick_random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    rng.gen_range(0..len)
}
