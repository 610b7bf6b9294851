use thiserror::Error;

/// Failures surfaced by the playback clocks.
///
/// All variants are local, synchronous and caller-recoverable; nothing is
/// retried internally and none of these are fatal to the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    /// Duration was negative at construction or via `set_duration`
    #[error("duration must be non-negative, got {0}")]
    InvalidDuration(f64),

    /// `set_end` value was not strictly greater than the current start
    #[error("end time {end} must be greater than start time {start}")]
    InvalidBound { start: f64, end: f64 },

    /// `timestamp_at` called with an index outside the series
    #[error("index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Series was empty or not non-decreasing
    #[error("series must be non-empty and non-decreasing")]
    InvalidSeries,

    /// Mutation conflicts with state derived from the backing series
    #[error("unsupported mutation: {0}")]
    UnsupportedMutation(&'static str),
}
