//! Derived statistics: horizontal speed and strafe sync
//!
//! Sync is the share of recent ticks on which horizontal speed went up
//! compared to the tick before.

use std::collections::VecDeque;

use crate::replay::{ReplayFile, TickRate, TickSample};

/// Horizontal speed at `tick`, clamped into the replay
pub fn speed_at(replay: &ReplayFile, tick: i32) -> f32 {
    let mut sample = TickSample::default();
    replay.sample_tick(tick, &mut sample).horizontal_speed()
}

/// Fixed-capacity window of "speed increased" flags
#[derive(Debug, Clone)]
pub struct SyncWindow {
    samples: VecDeque<bool>,
    capacity: usize,
    gains: usize,
}

impl SyncWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            gains: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples currently held, at most [`Self::capacity`]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, evicting the oldest once full
    pub fn push(&mut self, gained: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            if let Some(evicted) = self.samples.pop_front() {
                self.gains -= usize::from(evicted);
            }
        }
        self.samples.push_back(gained);
        self.gains += usize::from(gained);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.gains = 0;
    }

    /// Fraction of held samples that are gains, 0 when empty
    pub fn fraction(&self) -> f64 {
        self.gains as f64 / self.samples.len().max(1) as f64
    }

    /// [`Self::fraction`] as a percentage
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

/// Keeps a [`SyncWindow`] in step with the playback position
#[derive(Debug, Clone)]
pub struct SyncTracker {
    window: SyncWindow,
    last_tick: i32,
    sample_range: f64,
    seed_ticks: i32,
}

impl SyncTracker {
    /// `sample_range` is the window length in seconds, `seed_ticks` how far
    /// behind the playhead sampling restarts after a skip
    pub fn new(sample_range: f64, seed_ticks: i32) -> Self {
        Self {
            window: SyncWindow::new(0),
            last_tick: 0,
            sample_range,
            seed_ticks,
        }
    }

    pub fn window(&self) -> &SyncWindow {
        &self.window
    }

    /// Last tick folded into the window
    pub fn last_tick(&self) -> i32 {
        self.last_tick
    }

    /// Current sync percentage
    pub fn percent(&self) -> f64 {
        self.window.percent()
    }

    /// Window capacity for a tick rate: enough ticks to cover the sample range
    pub fn capacity_for(&self, tick_rate: TickRate) -> usize {
        (self.sample_range * tick_rate.hz()).ceil() as usize
    }

    /// Empty the window after a discontinuous jump.
    ///
    /// The next [`Self::update`] re-samples the `seed_ticks` ticks leading up
    /// to `tick` in the direction of playback instead of comparing speeds
    /// across the jump.
    pub fn reset_after_skip(&mut self, replay: &ReplayFile, tick: i32, playback_rate: f64) {
        self.window.clear();
        let seed = if playback_rate > 0.0 {
            tick.saturating_sub(self.seed_ticks)
        } else {
            tick.saturating_add(self.seed_ticks)
        };
        self.last_tick = replay.clamp_tick(seed);
        tracing::debug!(tick, seed_from = self.last_tick, "sync window reset");
    }

    /// Fold every tick between the last update and `tick` into the window
    /// and return the sync percentage
    pub fn update(&mut self, replay: &ReplayFile, tick: i32) -> f64 {
        if self.last_tick == tick {
            return self.percent();
        }

        let capacity = self.capacity_for(replay.header().tick_rate);
        if self.window.capacity() != capacity {
            self.window = SyncWindow::new(capacity);
        }

        let min = replay.clamp_tick(self.last_tick.min(tick).saturating_sub(1));
        let max = replay.clamp_tick(self.last_tick.max(tick));

        let mut prev_speed = speed_at(replay, min);
        for t in min + 1..=max {
            let speed = speed_at(replay, t);
            self.window.push(speed > prev_speed);
            prev_speed = speed;
        }

        self.last_tick = tick;
        self.percent()
    }

    /// Forget all samples and start again from tick 0
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_tick = 0;
    }
}

/// Speed for display: rounded, zero-padded to at least three digits
pub fn format_speed(speed: f32) -> String {
    format!("{:03}", speed.round() as i64)
}

/// Sync percentage for display with one decimal place
pub fn format_sync(percent: f64) -> String {
    format!("{percent:.1}")
}

/// Playback time as `m:ss.s` for an already clamped tick
pub fn format_timestamp(clamped_tick: i32, tick_rate: TickRate) -> String {
    let total = clamped_tick as f64 / tick_rate.hz();
    let minutes = (total / 60.0).floor();
    let seconds = format!("{:.1}", total - minutes * 60.0);
    let pad = if seconds.find('.') == Some(1) { "0" } else { "" };
    format!("{minutes}:{pad}{seconds}")
}
