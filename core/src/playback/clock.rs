//! Playback clock
//!
//! Tracks the integer tick being shown plus the sub-tick remainder carried
//! between frames. The tick is allowed to leave `[0, tick_count)` by up to
//! two pause margins so playback dwells at each end before looping.

use crate::replay::TickRate;

/// What happened during one [`PlaybackClock::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// Net number of ticks stepped (negative while rewinding)
    pub steps: i32,
    /// The tick looped around one end of the replay
    pub wrapped: bool,
}

/// Integer tick plus sub-tick carry for a single replay
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    tick: i32,
    spare_time: f64,
    playback_rate: f64,
    tick_count: i32,
    tick_period: f64,
    pause_ticks: i32,
    skipped_from: Option<i32>,
}

impl PlaybackClock {
    /// Create a clock at tick 0 for a replay of `tick_count` ticks.
    ///
    /// `pause_time` is the dwell at each end of the replay in seconds.
    pub fn new(tick_count: i32, tick_rate: TickRate, pause_time: f64, playback_rate: f64) -> Self {
        Self {
            tick: 0,
            spare_time: 0.0,
            playback_rate,
            tick_count,
            tick_period: tick_rate.period(),
            pause_ticks: tick_rate.ticks_in(pause_time).max(0),
            skipped_from: None,
        }
    }

    /// Point the clock at a different replay, keeping the current tick.
    pub fn retarget(&mut self, tick_count: i32, tick_rate: TickRate, pause_time: f64) {
        self.tick_count = tick_count;
        self.tick_period = tick_rate.period();
        self.pause_ticks = tick_rate.ticks_in(pause_time).max(0);
        if self.tick == -1 {
            self.tick = 0;
        }
        self.spare_time = 0.0;
        self.skipped_from = None;
    }

    pub fn tick(&self) -> i32 {
        self.tick
    }

    /// Seconds carried past the current tick
    pub fn spare_time(&self) -> f64 {
        self.spare_time
    }

    pub fn tick_period(&self) -> f64 {
        self.tick_period
    }

    pub fn tick_count(&self) -> i32 {
        self.tick_count
    }

    /// Ticks of dwell at each end of the replay
    pub fn pause_ticks(&self) -> i32 {
        self.pause_ticks
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Lowest tick the clock reaches before looping to the end
    pub fn first_tick(&self) -> i32 {
        self.pause_ticks.saturating_mul(-2)
    }

    /// Highest tick the clock reaches before looping to the start
    pub fn last_tick(&self) -> i32 {
        self.tick_count
            .max(0)
            .saturating_add(self.pause_ticks.saturating_mul(2))
    }

    /// Set the signed playback rate; negative rewinds, zero freezes
    pub fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    /// Step the clock by `dt` seconds of wall time scaled by the playback rate.
    pub fn advance(&mut self, dt: f64) -> Advance {
        let mut result = Advance::default();
        self.spare_time += dt * self.playback_rate;

        while self.spare_time > self.tick_period {
            self.spare_time -= self.tick_period;
            result.steps = result.steps.saturating_add(1);
            if self.tick >= self.last_tick() {
                self.tick = -self.pause_ticks;
                result.wrapped = true;
            } else {
                self.tick += 1;
            }
        }

        while self.spare_time < 0.0 {
            self.spare_time += self.tick_period;
            result.steps = result.steps.saturating_sub(1);
            if self.tick <= self.first_tick() {
                self.tick = self.tick_count.saturating_add(self.pause_ticks);
                result.wrapped = true;
            } else {
                self.tick -= 1;
            }
        }

        result
    }

    /// Drop the sub-tick carry; used while paused or scrubbing
    pub fn hold(&mut self) {
        self.spare_time = 0.0;
    }

    /// Jump straight to `tick` and drop the sub-tick carry.
    ///
    /// The target is clamped into [`Self::first_tick`]`..=`[`Self::last_tick`].
    /// A jump to a different tick is remembered as a skip until
    /// [`Self::take_skip`] is called.
    pub fn seek(&mut self, tick: i32) {
        let tick = tick.clamp(self.first_tick(), self.last_tick());
        if tick != self.tick && self.skipped_from.is_none() {
            self.skipped_from = Some(self.tick);
        }
        self.tick = tick;
        self.spare_time = 0.0;
    }

    /// The tick playback jumped away from since the last call, if any
    pub fn take_skip(&mut self) -> Option<i32> {
        let from = self.skipped_from.take()?;
        (from != self.tick).then_some(from)
    }

    /// Interpolation factor in `[0, 1]` between the current and next tick,
    /// or `None` when the carry is outside one tick period
    pub fn blend_factor(&self) -> Option<f32> {
        (self.spare_time >= 0.0 && self.spare_time <= self.tick_period)
            .then(|| (self.spare_time / self.tick_period) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> PlaybackClock {
        PlaybackClock::new(100, TickRate::Tick85, 1.0, 1.0)
    }

    #[test]
    fn test_pause_ticks_from_rate() {
        assert_eq!(clock().pause_ticks(), 85);
        assert_eq!(
            PlaybackClock::new(10, TickRate::Tick66, 1.0, 1.0).pause_ticks(),
            66
        );
        assert_eq!(
            PlaybackClock::new(10, TickRate::Tick66, 0.5, 1.0).pause_ticks(),
            33
        );
    }

    #[test]
    fn test_advance_steps_whole_ticks() {
        let mut clock = clock();
        let period = clock.tick_period();

        let step = clock.advance(period * 3.5);
        assert_eq!(step.steps, 3);
        assert!(!step.wrapped);
        assert_eq!(clock.tick(), 3);
        assert!((clock.spare_time() - period * 0.5).abs() < 1e-9);

        // Less than a period only accumulates
        let step = clock.advance(period * 0.25);
        assert_eq!(step.steps, 0);
        assert_eq!(clock.tick(), 3);
    }

    #[test]
    fn test_rate_scales_and_zero_freezes() {
        let mut clock = clock();
        let period = clock.tick_period();

        clock.set_playback_rate(2.0);
        clock.advance(period * 2.25);
        assert_eq!(clock.tick(), 4);

        clock.set_playback_rate(0.0);
        assert_eq!(clock.advance(10.0), Advance::default());
        assert_eq!(clock.tick(), 4);
    }

    #[test]
    fn test_forward_wrap_after_pause() {
        let mut clock = clock();
        let period = clock.tick_period();

        clock.seek(270);
        let step = clock.advance(period * 0.5);
        assert_eq!(clock.tick(), 270);
        assert!(!step.wrapped);

        let step = clock.advance(period);
        assert!(step.wrapped);
        assert_eq!(clock.tick(), -85);
    }

    #[test]
    fn test_forward_play_reaches_wrap_point() {
        let mut clock = clock();
        let period = clock.tick_period();
        let mut last = clock.tick();

        // Under a third of a period per frame never steps twice at once
        for _ in 0..5000 {
            let step = clock.advance(period * 0.3);
            if step.wrapped {
                assert_eq!(last, 270);
                assert_eq!(clock.tick(), -85);
                return;
            }
            last = clock.tick();
        }
        panic!("clock never wrapped");
    }

    #[test]
    fn test_backward_wrap_after_pause() {
        let mut clock = clock();
        let period = clock.tick_period();
        clock.set_playback_rate(-1.0);

        clock.seek(-170);
        let step = clock.advance(period * 0.5);
        assert!(step.wrapped);
        assert_eq!(step.steps, -1);
        assert_eq!(clock.tick(), 185);
        assert!(clock.spare_time() >= 0.0);
    }

    #[test]
    fn test_rewind_keeps_spare_non_negative() {
        let mut clock = clock();
        let period = clock.tick_period();
        clock.seek(50);
        clock.set_playback_rate(-1.0);

        clock.advance(period * 2.5);
        assert_eq!(clock.tick(), 47);
        let spare = clock.spare_time();
        assert!(spare >= 0.0 && spare <= period);
    }

    #[test]
    fn test_seek_records_skip_once() {
        let mut clock = clock();
        assert_eq!(clock.take_skip(), None);

        clock.seek(40);
        clock.seek(60);
        assert_eq!(clock.take_skip(), Some(0));
        assert_eq!(clock.take_skip(), None);

        // Seeking to the current tick is not a skip
        clock.seek(60);
        assert_eq!(clock.take_skip(), None);

        // Jumping away and back cancels out
        clock.seek(10);
        clock.seek(60);
        assert_eq!(clock.take_skip(), None);
    }

    #[test]
    fn test_seek_clamps_to_loop_range() {
        let mut clock = clock();
        assert_eq!(clock.first_tick(), -170);
        assert_eq!(clock.last_tick(), 270);

        clock.seek(i32::MAX);
        assert_eq!(clock.tick(), 270);
        let step = clock.advance(clock.tick_period() * 1.5);
        assert!(step.wrapped);
        assert_eq!(clock.tick(), -85);

        clock.seek(i32::MIN);
        assert_eq!(clock.tick(), -170);
        clock.set_playback_rate(-1.0);
        let step = clock.advance(clock.tick_period() * 0.5);
        assert!(step.wrapped);
        assert_eq!(clock.tick(), 185);
    }

    #[test]
    fn test_extreme_tick_count_saturates() {
        let mut clock = PlaybackClock::new(i32::MAX, TickRate::Tick85, 1.0, 1.0);
        assert_eq!(clock.last_tick(), i32::MAX);

        clock.seek(i32::MAX);
        let step = clock.advance(clock.tick_period() * 1.5);
        assert!(step.wrapped);
        assert_eq!(clock.tick(), -85);
    }

    #[test]
    fn test_seek_resets_spare() {
        let mut clock = clock();
        clock.advance(clock.tick_period() * 0.5);
        assert!(clock.spare_time() > 0.0);

        clock.seek(12);
        assert_eq!(clock.spare_time(), 0.0);
        assert_eq!(clock.blend_factor(), Some(0.0));
    }

    #[test]
    fn test_retarget_keeps_tick() {
        let mut clock = clock();
        clock.seek(42);
        clock.advance(clock.tick_period() * 0.5);

        clock.retarget(500, TickRate::Tick66, 1.0);
        assert_eq!(clock.tick(), 42);
        assert_eq!(clock.spare_time(), 0.0);
        assert_eq!(clock.pause_ticks(), 66);
        assert_eq!(clock.tick_count(), 500);
        assert_eq!(clock.take_skip(), None);

        clock.seek(-1);
        clock.retarget(500, TickRate::Tick66, 1.0);
        assert_eq!(clock.tick(), 0);
    }

    #[test]
    fn test_blend_factor() {
        let mut clock = clock();
        let period = clock.tick_period();

        clock.advance(period * 0.5);
        let t = clock.blend_factor().unwrap();
        assert!((t - 0.5).abs() < 1e-6);
    }
}
