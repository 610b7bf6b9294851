use crate::error::ClockError;
use crate::playback::{Boundary, PlaybackClock, PlaybackState};
use tracing::debug;

/// Playback clock bound to an ascending sequence of sample timestamps.
///
/// The series is authoritative: `start` and `end` are its first and last
/// elements and `duration` is derived, so moving a bound translates the
/// whole series instead of resizing the window (sample spacing is part of
/// the recording and must survive a retime).
///
/// Alongside the continuous head it keeps an `index` cache of the last
/// resolved sample, so consumers asking "which sample is active" do not pay
/// a search on frames where the head was not authoritatively moved.
#[derive(Debug, Clone)]
pub struct SeriesClock {
    clock: PlaybackClock,
    series: Vec<f64>,
    index: usize,
}

impl SeriesClock {
    /// Build a looping clock over `series`, which must be non-empty and
    /// non-decreasing.
    pub fn new(series: Vec<f64>) -> Result<Self, ClockError> {
        Self::with_loop(series, true)
    }

    pub fn with_loop(series: Vec<f64>, loop_enabled: bool) -> Result<Self, ClockError> {
        validate_series(&series)?;
        let start = series[0];
        let duration = series[series.len() - 1] - start;
        let clock = PlaybackClock::new(start, duration, loop_enabled)?;
        Ok(Self { clock, series, index: 0 })
    }

    pub fn series(&self) -> &[f64] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Last resolved sample index for the head.
    ///
    /// Freshness contract: the cache is guaranteed current only right after
    /// `set`, `step_forward`/`step_back`, or a `render` call that wrapped or
    /// stopped at a bound. A `render` that stays strictly inside bounds does
    /// not update it; call `index_of(now())` when the exact sample is needed
    /// every frame.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the greatest sample `<= timestamp`, or `None` when the
    /// timestamp precedes every sample. Binary search, `O(log n)`.
    pub fn index_of(&self, timestamp: f64) -> Option<usize> {
        self.series.partition_point(|&t| t <= timestamp).checked_sub(1)
    }

    pub fn timestamp_at(&self, index: usize) -> Result<f64, ClockError> {
        self.series
            .get(index)
            .copied()
            .ok_or(ClockError::IndexOutOfRange { index, len: self.series.len() })
    }

    /// Seek: clamp into bounds like the continuous clock, then refresh the
    /// index cache.
    pub fn set(&mut self, timestamp: f64) {
        self.clock.set(timestamp);
        self.index = self.resolved_index();
    }

    /// Retime the recording so it begins at `value`: every sample shifts by
    /// the same offset, preserving spacing and duration exactly.
    pub fn set_start(&mut self, value: f64) {
        self.shift(value - self.first());
    }

    /// Symmetric retime against the last sample.
    pub fn set_end(&mut self, value: f64) {
        self.shift(value - self.last());
    }

    /// The series defines the duration; there is no independent degree of
    /// freedom to set. Surfaced as an error so callers cannot mistake it
    /// for a successful no-op.
    pub fn set_duration(&mut self, _value: f64) -> Result<(), ClockError> {
        Err(ClockError::UnsupportedMutation(
            "duration is derived from the backing series",
        ))
    }

    /// Replace the backing series, taking ownership. Resets the index cache
    /// and resyncs the bounds from the new endpoints; the head is left for
    /// the caller to reseek.
    pub fn replace_series(&mut self, series: Vec<f64>) -> Result<(), ClockError> {
        validate_series(&series)?;
        debug!("series replaced, {} samples", series.len());
        self.series = series;
        self.index = 0;
        self.resync_bounds();
        Ok(())
    }

    /// Advance one frame; identical boundary policy to the continuous
    /// clock, with the index cache recomputed on a wrap and pinned to the
    /// boundary sample on a non-looping stop.
    pub fn render(&mut self, delta_t: f64) {
        match self.clock.advance(delta_t) {
            Boundary::None => {}
            Boundary::Wrapped => self.index = self.resolved_index(),
            Boundary::StoppedAtStart => self.index = 0,
            Boundary::StoppedAtEnd => self.index = self.series.len() - 1,
        }
    }

    /// Jump the head to the next sample and pause, saturating at the last
    /// one. Frame-step control for paused inspection.
    pub fn step_forward(&mut self) {
        let next = (self.resolved_index() + 1).min(self.series.len() - 1);
        self.jump_to(next);
    }

    /// Jump the head to the previous sample and pause, saturating at the
    /// first one.
    pub fn step_back(&mut self) {
        let prev = self.resolved_index().saturating_sub(1);
        self.jump_to(prev);
    }

    /// Samples within `[now - before, now + after]`, as a sub-slice of the
    /// series. Two binary searches.
    pub fn window(&self, before: f64, after: f64) -> &[f64] {
        let head = self.clock.now();
        let lo = self.series.partition_point(|&t| t < head - before);
        let hi = self.series.partition_point(|&t| t <= head + after);
        &self.series[lo..hi]
    }

    // Continuous surface, delegated.

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn start(&self) -> f64 {
        self.clock.start()
    }

    pub fn end(&self) -> f64 {
        self.clock.end()
    }

    pub fn duration(&self) -> f64 {
        self.clock.duration()
    }

    pub fn direction(&self) -> f64 {
        self.clock.direction()
    }

    pub fn is_looping(&self) -> bool {
        self.clock.is_looping()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    pub fn play(&mut self, direction: f64) {
        self.clock.play(direction);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        self.index = 0;
    }

    pub fn toggle_loop(&mut self) {
        self.clock.toggle_loop();
    }

    // The series is validated non-empty at every entry point, so the
    // endpoint reads cannot miss.

    fn first(&self) -> f64 {
        self.series[0]
    }

    fn last(&self) -> f64 {
        self.series[self.series.len() - 1]
    }

    fn resolved_index(&self) -> usize {
        // head is clamped to [first, last], so the search cannot come back
        // empty-handed
        self.index_of(self.clock.now()).unwrap_or(0)
    }

    fn jump_to(&mut self, index: usize) {
        self.index = index;
        self.clock.set(self.series[index]);
        self.clock.pause();
    }

    fn shift(&mut self, offset: f64) {
        for t in &mut self.series {
            *t += offset;
        }
        self.resync_bounds();
    }

    fn resync_bounds(&mut self) {
        self.clock.rebind(self.first(), self.last());
    }
}

fn validate_series(series: &[f64]) -> Result<(), ClockError> {
    if series.is_empty() || series.windows(2).any(|w| w[0] > w[1]) {
        return Err(ClockError::InvalidSeries);
    }
    Ok(())
}
