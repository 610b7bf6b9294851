pub mod clock;
pub mod series;

pub use clock::PlaybackClock;
pub use series::SeriesClock;

use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Outcome of a single render step's boundary correction.
///
/// Only the series clock cares about this; the public `render` surface
/// swallows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Boundary {
    /// Head stayed strictly inside bounds (or the clock was paused)
    None,
    /// Looping clock crossed a bound and wrapped back into range
    Wrapped,
    /// Non-looping clock ran past the start and was clamped + paused
    StoppedAtStart,
    /// Non-looping clock ran past the end and was clamped + paused
    StoppedAtEnd,
}
