use crate::error::ClockError;
use crate::playback::{Boundary, PlaybackState};
use tracing::debug;

/// Continuous playback clock over a `[start, end]` interval.
///
/// The host loop calls `render(delta_t)` once per frame with the elapsed
/// wall time; the head advances by `delta_t * direction`. Looping clocks
/// wrap at the bounds, non-looping clocks clamp and pause. Nothing here
/// blocks or touches the outside world.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    start: f64,
    end: f64,
    duration: f64,
    head: f64,
    direction: f64,
    loop_enabled: bool,
}

impl PlaybackClock {
    pub fn new(start: f64, duration: f64, loop_enabled: bool) -> Result<Self, ClockError> {
        if duration < 0.0 {
            return Err(ClockError::InvalidDuration(duration));
        }
        Ok(Self {
            start,
            end: start + duration,
            duration,
            head: start,
            direction: 0.0,
            loop_enabled,
        })
    }

    /// Current head position. No side effects.
    pub fn now(&self) -> f64 {
        self.head
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Signed playback rate; zero means paused
    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn is_looping(&self) -> bool {
        self.loop_enabled
    }

    pub fn is_playing(&self) -> bool {
        self.direction != 0.0
    }

    /// Derived play/pause state: `Stopped` is paused with the head parked
    /// at the start, anything else paused is `Paused`.
    pub fn state(&self) -> PlaybackState {
        if self.direction != 0.0 {
            PlaybackState::Playing
        } else if self.head == self.start {
            PlaybackState::Stopped
        } else {
            PlaybackState::Paused
        }
    }

    /// Fraction of the interval covered by the head, `0.0` for an empty
    /// interval. This is what a scrub slider binds to.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.head - self.start) / self.duration
        } else {
            0.0
        }
    }

    /// Seek the head. Out-of-range input saturates to the bounds rather
    /// than failing; scrubbing input overshoots continuously by nature.
    pub fn set(&mut self, timestamp: f64) {
        self.head = timestamp.clamp(self.start, self.end);
    }

    /// Start or resume playback at the given signed speed. Does not move
    /// the head.
    pub fn play(&mut self, direction: f64) {
        self.direction = direction;
    }

    pub fn pause(&mut self) {
        self.direction = 0.0;
    }

    /// Pause and reset the head to the start
    pub fn stop(&mut self) {
        self.pause();
        self.head = self.start;
    }

    pub fn toggle_loop(&mut self) {
        self.loop_enabled = !self.loop_enabled;
    }

    /// Move the interval, holding the duration fixed. The head is not
    /// reclamped here; callers seek explicitly, matching `set` semantics.
    pub fn set_start(&mut self, value: f64) {
        self.start = value;
        self.end = self.start + self.duration;
    }

    pub fn set_end(&mut self, value: f64) -> Result<(), ClockError> {
        if value <= self.start {
            return Err(ClockError::InvalidBound {
                start: self.start,
                end: value,
            });
        }
        self.end = value;
        self.duration = self.end - self.start;
        Ok(())
    }

    pub fn set_duration(&mut self, value: f64) -> Result<(), ClockError> {
        if value < 0.0 {
            return Err(ClockError::InvalidDuration(value));
        }
        self.duration = value;
        self.end = self.start + self.duration;
        Ok(())
    }

    /// Reassign both bounds at once, for the series clock resyncing from
    /// its (already validated) endpoints.
    pub(crate) fn rebind(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
        self.duration = end - start;
    }

    /// Advance the head by one frame's worth of elapsed wall time.
    pub fn render(&mut self, delta_t: f64) {
        self.advance(delta_t);
    }

    /// `render` with the boundary outcome exposed for the series clock's
    /// index bookkeeping.
    pub(crate) fn advance(&mut self, delta_t: f64) -> Boundary {
        if self.direction == 0.0 {
            return Boundary::None;
        }

        self.head += delta_t * self.direction;

        if self.head < self.start {
            if self.loop_enabled {
                debug!("head ran past start, wrapping");
                self.head = self.wrapped(self.head);
                Boundary::Wrapped
            } else {
                debug!("head ran past start, stopping");
                self.head = self.start;
                self.pause();
                Boundary::StoppedAtStart
            }
        } else if self.head > self.end {
            if self.loop_enabled {
                debug!("head ran past end, wrapping");
                self.head = self.wrapped(self.head);
                Boundary::Wrapped
            } else {
                debug!("head ran past end, stopping");
                self.head = self.end;
                self.pause();
                Boundary::StoppedAtEnd
            }
        } else {
            Boundary::None
        }
    }

    /// Euclidean wrap into `[start, start + duration)`. Handles displacements
    /// of more than one full period in a single tick.
    fn wrapped(&self, head: f64) -> f64 {
        if self.duration == 0.0 {
            self.start
        } else {
            self.start + (head - self.start).rem_euclid(self.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(start: f64, duration: f64, looping: bool) -> PlaybackClock {
        PlaybackClock::new(start, duration, looping).unwrap()
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert_eq!(
            PlaybackClock::new(0.0, -0.1, true).unwrap_err(),
            ClockError::InvalidDuration(-0.1)
        );
    }

    #[test]
    fn test_bounds_stay_consistent_through_setters() {
        let mut c = clock(-1.0, 10.0, true);
        assert_eq!((c.start(), c.end(), c.duration()), (-1.0, 9.0, 10.0));

        c.set_end(5.0).unwrap();
        assert_eq!((c.start(), c.end(), c.duration()), (-1.0, 5.0, 6.0));

        c.set_duration(12.0).unwrap();
        assert_eq!((c.start(), c.end(), c.duration()), (-1.0, 11.0, 12.0));

        c.set_start(2.0);
        assert_eq!((c.start(), c.end(), c.duration()), (2.0, 14.0, 12.0));
    }

    #[test]
    fn test_end_must_exceed_start() {
        let mut c = clock(3.0, 10.0, true);
        assert_eq!(
            c.set_end(2.0).unwrap_err(),
            ClockError::InvalidBound { start: 3.0, end: 2.0 }
        );
        // failed setter leaves state untouched
        assert_eq!((c.start(), c.end(), c.duration()), (3.0, 13.0, 10.0));
    }

    #[test]
    fn test_set_saturates() {
        let mut c = clock(0.0, 10.0, true);
        c.set(4.5);
        assert_eq!(c.now(), 4.5);
        c.set(-100.0);
        assert_eq!(c.now(), 0.0);
        c.set(100.0);
        assert_eq!(c.now(), 10.0);
    }

    #[test]
    fn test_render_scales_by_direction() {
        let mut c = clock(-1.0, 10.0, true);
        c.play(3.0);
        c.render(0.5);
        assert_eq!(c.now(), 0.5);
    }

    #[test]
    fn test_paused_clock_never_moves() {
        let mut c = clock(0.0, 10.0, true);
        c.set(4.0);
        c.render(100.0);
        assert_eq!(c.now(), 4.0);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut c = clock(0.0, 10.0, true);
        c.set(4.0);
        c.play(2.0);
        c.pause();
        let once = (c.now(), c.direction(), c.state());
        c.pause();
        assert_eq!((c.now(), c.direction(), c.state()), once);
    }

    #[test]
    fn test_stop_resets_head() {
        let mut c = clock(1.0, 10.0, true);
        c.play(1.0);
        c.render(3.0);
        c.stop();
        assert_eq!(c.now(), 1.0);
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_loop_wraps_forward() {
        let mut c = clock(0.0, 10.0, true);
        c.set(9.0);
        c.play(1.0);
        c.render(2.0);
        assert_eq!(c.now(), 1.0);
        assert!(c.is_playing());
    }

    #[test]
    fn test_loop_wraps_backward() {
        let mut c = clock(0.0, 10.0, true);
        c.set(1.0);
        c.play(-1.0);
        c.render(2.0);
        assert_eq!(c.now(), 9.0);
        assert!(c.is_playing());
    }

    #[test]
    fn test_non_looping_clamps_to_end_and_pauses() {
        let mut c = clock(0.0, 10.0, false);
        c.set(9.0);
        c.play(1.0);
        c.render(2.0);
        assert_eq!(c.now(), 10.0);
        assert_eq!(c.direction(), 0.0);
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_non_looping_clamps_to_start_and_pauses() {
        let mut c = clock(0.0, 10.0, false);
        c.set(1.0);
        c.play(-1.0);
        c.render(2.0);
        assert_eq!(c.now(), 0.0);
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_multi_period_overshoot_wraps_into_bounds() {
        let mut c = clock(0.0, 10.0, true);
        c.set(9.0);
        c.play(1.0);
        c.render(25.0); // 9 + 25 = 34 -> 4 after two full periods
        assert_eq!(c.now(), 4.0);

        c.play(-1.0);
        c.render(37.0); // 4 - 37 = -33 -> 7
        assert_eq!(c.now(), 7.0);
    }

    #[test]
    fn test_zero_duration_looping_clock_pins_to_start() {
        let mut c = clock(5.0, 0.0, true);
        c.play(1.0);
        c.render(1.0);
        assert_eq!(c.now(), 5.0);
    }

    #[test]
    fn test_head_within_bounds_after_every_render() {
        let mut c = clock(-3.0, 7.0, true);
        c.play(1.7);
        for _ in 0..1000 {
            c.render(0.016);
            assert!(c.now() >= c.start() && c.now() <= c.end());
            assert_eq!(c.end() - c.start(), c.duration());
        }
    }

    #[test]
    fn test_set_start_does_not_reclamp_head() {
        let mut c = clock(0.0, 10.0, true);
        c.set(2.0);
        c.set_start(5.0);
        // caller is responsible for reseeking after a bound move
        assert_eq!(c.now(), 2.0);
        assert_eq!((c.start(), c.end()), (5.0, 15.0));
    }

    #[test]
    fn test_toggle_loop() {
        let mut c = clock(0.0, 10.0, true);
        c.toggle_loop();
        assert!(!c.is_looping());
        c.toggle_loop();
        assert!(c.is_looping());
    }

    #[test]
    fn test_progress() {
        let mut c = clock(0.0, 10.0, true);
        c.set(2.5);
        assert_eq!(c.progress(), 0.25);
        assert_eq!(clock(3.0, 0.0, true).progress(), 0.0);
    }
}
