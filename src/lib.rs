//! Playback timeline engine: a scrubbable, loopable, variable-speed time
//! cursor over a continuous interval or a recorded sample sequence.
//!
//! A host render loop drives a clock with [`PlaybackClock::render`] once per
//! frame; control surfaces seek, play, pause and retime it through the
//! mutators; presentation code only reads. [`SeriesClock`] binds the same
//! semantics to a concrete ascending timestamp series, with `O(log n)`
//! nearest-sample lookup and whole-series translation when a bound moves.

pub mod error;
pub mod playback;

pub use error::ClockError;
pub use playback::{PlaybackClock, PlaybackState, SeriesClock};
