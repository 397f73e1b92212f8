//! Play command - run a headless playback session

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use surfview_core::{
    Frame, PlaybackConfig, ReplaySession, TickRate, format_speed, format_sync, format_timestamp,
};

use crate::load::ReplaySource;

/// Arguments for the play command
#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: ReplaySource,

    /// Simulated frames per second
    #[arg(long, default_value = "60")]
    pub fps: f64,

    /// Wall-clock seconds to simulate
    #[arg(long, default_value = "10")]
    pub seconds: f64,

    /// Playback rate (negative rewinds); overrides the config
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Tick to start from
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i32>,

    /// Playback config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print every Nth frame
    #[arg(long, default_value = "1")]
    pub every: u32,
}

/// Execute the play command
pub fn execute(args: PlayArgs) -> Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        bail!("--fps must be positive, got {}", args.fps);
    }
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        bail!("--seconds must not be negative, got {}", args.seconds);
    }

    let mut config = match &args.config {
        Some(path) => PlaybackConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PlaybackConfig::default(),
    };
    if let Some(rate) = args.rate {
        config.playback_rate = rate;
    }
    config.validate().context("Invalid playback settings")?;

    let replay = args.source.open()?;
    let tick_rate = replay.header().tick_rate;
    tracing::info!(
        map = %replay.header().map_name,
        ticks = replay.tick_count(),
        rate = config.playback_rate,
        "starting playback"
    );

    let mut session = ReplaySession::new(replay, config);
    if let Some(start) = args.start {
        session.seek(start);
    }
    session.play();

    let frame_count = (args.seconds * args.fps).ceil() as u64;
    let frames = simulate(&mut session, frame_count, 1.0 / args.fps, args.every.max(1));
    for frame in &frames {
        println!("{}", format_frame(frame, tick_rate));
    }

    tracing::info!(
        frames = frame_count,
        tick = session.frame().tick,
        "playback finished"
    );
    Ok(())
}

/// Run `frame_count` updates of `dt` seconds and keep every `every`th frame
fn simulate(session: &mut ReplaySession, frame_count: u64, dt: f64, every: u32) -> Vec<Frame> {
    (0..frame_count)
        .filter_map(|i| {
            let frame = *session.update(dt);
            (i % every as u64 == 0).then_some(frame)
        })
        .collect()
}

/// One output line: time, tick, eye position, view angles, speed and sync
fn format_frame(frame: &Frame, tick_rate: TickRate) -> String {
    let eye = frame.eye_position();
    format!(
        "{:>8}  tick {:>6}  eye ({:.1}, {:.1}, {:.1})  view ({:.1}, {:.1})  speed {} u/s  sync {} %",
        format_timestamp(frame.clamped_tick, tick_rate),
        frame.tick,
        eye.x,
        eye.y,
        eye.z,
        frame.angles.x,
        frame.angles.y,
        format_speed(frame.speed),
        format_sync(frame.sync),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use surfview_core::{ReplayFile, ReplayWriter, TickSample};

    fn session() -> ReplaySession {
        let ticks: Vec<_> = (0..200)
            .map(|i| TickSample {
                tick: i,
                velocity: Vec3::new(i as f32, 0.0, 0.0),
                position: Vec3::new(i as f32, 0.0, 0.0),
                ..Default::default()
            })
            .collect();
        let data = ReplayWriter::new(Vec::new()).write(&ticks).unwrap();
        let replay = ReplayFile::open(data, "r/85tick/surf_play.rec").unwrap();
        ReplaySession::new(replay, PlaybackConfig::default())
    }

    #[test]
    fn test_simulate_keeps_every_nth_frame() {
        let mut session = session();
        let frames = simulate(&mut session, 10, 1.0 / 85.0, 3);
        assert_eq!(frames.len(), 4);
        assert!(frames.windows(2).all(|pair| pair[0].tick <= pair[1].tick));
    }

    #[test]
    fn test_simulate_one_second() {
        let mut session = session();
        // 120 frames at 120 fps covers one second of 85 tick playback
        simulate(&mut session, 120, 1.0 / 120.0, 1);
        let tick = session.frame().tick;
        assert!((83..=85).contains(&tick), "tick {tick}");
    }

    #[test]
    fn test_simulate_from_largest_start_tick() {
        let mut session = session();
        session.seek(i32::MAX);
        let frames = simulate(&mut session, 10, 1.0 / 60.0, 1);

        // Starts at the end of the closing pause and loops straight away
        assert_eq!(frames[0].tick, -85);
        assert!(frames.iter().all(|frame| frame.clamped_tick == 0));
    }

    #[test]
    fn test_format_frame() {
        let frame = Frame {
            tick: 85,
            clamped_tick: 85,
            position: Vec3::new(1.0, 2.0, 3.0),
            angles: Vec2::new(-10.0, 90.0),
            eye_height: 64.0,
            speed: 5.0,
            sync: 87.5,
            ..Default::default()
        };
        assert_eq!(
            format_frame(&frame, TickRate::Tick85),
            "  0:01.0  tick     85  eye (1.0, 2.0, 67.0)  view (-10.0, 90.0)  speed 005 u/s  sync 87.5 %"
        );
    }
}
