//! Dump command - print decoded tick records

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;
use surfview_core::{ReplayFile, TickSample, format_speed};

use crate::load::ReplaySource;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: ReplaySource,

    /// First tick to print
    #[arg(long, default_value = "0")]
    pub from: i32,

    /// Number of ticks to print (all remaining when omitted)
    #[arg(long)]
    pub count: Option<i32>,

    /// Print one JSON object per line instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One decoded tick with its horizontal speed
#[derive(Serialize)]
struct TickRow {
    #[serde(flatten)]
    sample: TickSample,
    speed: f32,
}

/// Decode `count` ticks starting at `from`, stopping at the end of the replay
fn rows(replay: &ReplayFile, from: i32, count: Option<i32>) -> Result<Vec<TickRow>> {
    if from < 0 || (from >= replay.tick_count() && replay.tick_count() > 0) {
        bail!(
            "Start tick {} is outside the replay (0..{})",
            from,
            replay.tick_count()
        );
    }

    let end = match count {
        Some(count) => from.saturating_add(count.max(0)).min(replay.tick_count()),
        None => replay.tick_count(),
    };

    let mut sample = TickSample::default();
    (from..end)
        .map(|tick| -> Result<TickRow> {
            replay
                .decode_tick(tick, &mut sample)
                .with_context(|| format!("Failed to decode tick {tick}"))?;
            Ok(TickRow {
                sample,
                speed: sample.horizontal_speed(),
            })
        })
        .collect()
}

/// Execute the dump command
pub fn execute(args: DumpArgs) -> Result<()> {
    let replay = args.source.open()?;
    let rows = rows(&replay, args.from, args.count)?;

    if args.json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!(
        "{:>7}  {:>10}  {:>30}  {:>16}  {:>5}",
        "tick", "buttons", "position", "angles", "speed"
    );
    for row in &rows {
        let s = &row.sample;
        println!(
            "{:>7}  {:#010x}  {:>9.2} {:>9.2} {:>9.2}  {:>7.2} {:>8.2}  {:>5}",
            s.tick,
            s.buttons.bits(),
            s.position.x,
            s.position.y,
            s.position.z,
            s.angles.x,
            s.angles.y,
            format_speed(row.speed)
        );
    }

    Ok(())
}
