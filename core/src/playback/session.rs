//! Per-session playback driver
//!
//! [`ReplaySession`] owns one loaded replay together with everything that
//! changes while watching it: the clock, the sync window and the scratch
//! samples reused every frame. A host calls [`ReplaySession::update`] once
//! per rendered frame and draws the returned [`Frame`].

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::config::PlaybackConfig;
use crate::playback::clock::PlaybackClock;
use crate::playback::interp::{hermite, hermite_angles, hermite_vec3};
use crate::playback::stats::SyncTracker;
use crate::replay::{Buttons, ReplayFile, ReplayHeader, TickSample};

/// Presentation-ready state for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Playback tick, possibly inside the pause margins
    pub tick: i32,
    /// Tick actually sampled from the replay
    pub clamped_tick: i32,
    /// Buttons held on the sampled tick
    pub buttons: Buttons,
    /// Interpolated player origin
    pub position: Vec3,
    /// Interpolated (pitch, yaw) in degrees, not normalized
    pub angles: Vec2,
    /// Interpolated eye height above the origin
    pub eye_height: f32,
    /// Horizontal speed on the sampled tick
    pub speed: f32,
    /// Sync percentage over the recent window
    pub sync: f64,
}

impl Frame {
    /// Camera position: origin raised by the eye height
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Z * self.eye_height
    }
}

/// Playback state for a single loaded replay
pub struct ReplaySession {
    replay: ReplayFile,
    config: PlaybackConfig,
    clock: PlaybackClock,
    sync: SyncTracker,
    playing: bool,
    scrubbing: bool,
    /// Scratch samples for ticks `tick - 1 ..= tick + 2`
    samples: [TickSample; 4],
    frame: Frame,
    last_frame_tick: Option<i32>,
}

impl ReplaySession {
    /// Start a session at tick 0. Playback starts immediately when
    /// `config.autoplay` is set.
    pub fn new(replay: ReplayFile, config: PlaybackConfig) -> Self {
        let header = replay.header();
        let clock = PlaybackClock::new(
            header.tick_count,
            header.tick_rate,
            config.pause_time,
            config.playback_rate,
        );
        let sync = SyncTracker::new(config.sync_sample_range, config.sync_seed_ticks);

        Self {
            replay,
            playing: config.autoplay,
            config,
            clock,
            sync,
            scrubbing: false,
            samples: [TickSample::default(); 4],
            frame: Frame::default(),
            last_frame_tick: None,
        }
    }

    /// Swap in a different replay, dropping the old one.
    ///
    /// The playback position is kept; sub-tick time and statistics restart.
    pub fn replace_replay(&mut self, replay: ReplayFile) {
        let header = replay.header();
        self.clock
            .retarget(header.tick_count, header.tick_rate, self.config.pause_time);
        self.sync.reset();
        self.last_frame_tick = None;
        self.replay = replay;
        tracing::debug!(
            map = %self.replay.header().map_name,
            tick = self.clock.tick(),
            "replay replaced"
        );
    }

    pub fn replay(&self) -> &ReplayFile {
        &self.replay
    }

    pub fn header(&self) -> &ReplayHeader {
        self.replay.header()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// The frame produced by the last [`Self::update`]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Advance by `dt` seconds of wall time and build the frame to show.
    pub fn update(&mut self, dt: f64) -> &Frame {
        if let Some(from) = self.clock.take_skip() {
            tracing::debug!(from, to = self.clock.tick(), "playback skipped");
            self.sync
                .reset_after_skip(&self.replay, self.clock.tick(), self.clock.playback_rate());
        }

        if self.playing && !self.scrubbing {
            let from = self.clock.tick();
            let advance = self.clock.advance(dt);
            if advance.wrapped {
                tracing::debug!(from, to = self.clock.tick(), "playback looped");
                self.sync
                    .reset_after_skip(&self.replay, self.clock.tick(), self.clock.playback_rate());
            }
        } else {
            self.clock.hold();
        }

        let tick = self.clock.tick();
        let [d0, d1, d2, d3] = &mut self.samples;
        self.replay.sample_tick(tick, d1);

        if self.last_frame_tick != Some(tick) {
            self.last_frame_tick = Some(tick);
            self.frame.speed = d1.horizontal_speed();
            self.frame.sync = self.sync.update(&self.replay, tick);
        }

        let (position, angles, eye_height) = match self.clock.blend_factor() {
            Some(t) => {
                self.replay.sample_tick(tick.saturating_sub(1), d0);
                self.replay.sample_tick(tick.saturating_add(1), d2);
                self.replay.sample_tick(tick.saturating_add(2), d3);
                (
                    hermite_vec3(d0.position, d1.position, d2.position, d3.position, t),
                    hermite_angles(d0.angles, d1.angles, d2.angles, d3.angles, t),
                    hermite(
                        d0.eye_height(),
                        d1.eye_height(),
                        d2.eye_height(),
                        d3.eye_height(),
                        t,
                    ),
                )
            }
            None => (d1.position, d1.angles, d1.eye_height()),
        };

        self.frame.tick = tick;
        self.frame.clamped_tick = self.replay.clamp_tick(tick);
        self.frame.buttons = d1.buttons;
        self.frame.position = position;
        self.frame.angles = angles;
        self.frame.eye_height = eye_height;
        &self.frame
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Flip between playing and paused
    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// While scrubbing the clock holds still even when playing
    pub fn set_scrubbing(&mut self, scrubbing: bool) {
        self.scrubbing = scrubbing;
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Jump to `tick`, clamped into the clock's loop range. The next update
    /// treats the jump as a skip.
    pub fn seek(&mut self, tick: i32) {
        self.clock.seek(tick);
    }

    pub fn playback_rate(&self) -> f64 {
        self.clock.playback_rate()
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.clock.set_playback_rate(rate);
    }

    /// Move to the next higher (`up`) or lower rate preset and return the
    /// rate now in effect. Stays put past either end of the presets.
    pub fn step_rate(&mut self, up: bool) -> f64 {
        let current = self.clock.playback_rate();
        let presets = &self.config.rate_presets;
        let next = if up {
            presets.iter().copied().find(|&rate| rate > current)
        } else {
            presets.iter().rev().copied().find(|&rate| rate < current)
        };
        if let Some(rate) = next {
            self.clock.set_playback_rate(rate);
        }
        self.clock.playback_rate()
    }

    /// 1-based tick for embedding in a shareable link
    pub fn shared_tick(&self) -> i32 {
        self.replay.clamp_tick(self.clock.tick()) + 1
    }

    /// Jump to a tick from [`Self::shared_tick`] and pause there
    pub fn seek_shared_tick(&mut self, shared: i32) {
        let tick = shared.saturating_sub(1);
        if self.clock.tick() != tick {
            self.clock.seek(tick);
            self.playing = false;
        }
    }
}
