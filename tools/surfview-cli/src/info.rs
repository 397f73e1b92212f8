//! Info command - print the replay header

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use surfview_core::{ReplayFile, ReplayHeader, format_timestamp};

use crate::load::ReplaySource;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: ReplaySource,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Header plus values derived from it
#[derive(Serialize)]
struct InfoReport<'a> {
    #[serde(flatten)]
    header: &'a ReplayHeader,
    tick_rate_hz: f64,
    duration_seconds: f64,
    data_len: usize,
}

impl<'a> InfoReport<'a> {
    fn new(replay: &'a ReplayFile) -> Self {
        let header = replay.header();
        Self {
            header,
            tick_rate_hz: header.tick_rate.hz(),
            duration_seconds: header.tick_count as f64 / header.tick_rate.hz(),
            data_len: replay.data_len(),
        }
    }
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let replay = args.source.open()?;
    let report = InfoReport::new(&replay);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize header")?;
        println!("{json}");
        return Ok(());
    }

    let header = report.header;
    println!("=== Replay ===");
    println!("  File: {}", args.source.file.display());
    println!("  Map: {}", header.map_name);
    println!("  Style: {}", header.style.name());
    println!("  Player: {}", header.player_name);
    println!("  Time: {}", header.recorded_time);
    println!("  Format version: {}", header.format_version);
    println!("  Tick rate: {}", report.tick_rate_hz);
    println!("  Ticks: {}", header.tick_count);
    println!(
        "  Duration: {}",
        format_timestamp(replay.clamp_tick(header.tick_count), header.tick_rate)
    );
    println!("  Size: {} bytes", report.data_len);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfview_core::{ReplayWriter, TickSample};

    #[test]
    fn test_info_report_json() {
        let data = ReplayWriter::new(Vec::new())
            .with_time("00:42.100")
            .with_player("strafer")
            .write(&[TickSample::default(); 170])
            .unwrap();
        let replay = ReplayFile::open(data, "r/85tick/surf_info_style_3.rec").unwrap();

        let json = serde_json::to_value(InfoReport::new(&replay)).unwrap();
        assert_eq!(json["map_name"], "surf_info");
        assert_eq!(json["style"], "Bw");
        assert_eq!(json["player_name"], "strafer");
        assert_eq!(json["tick_count"], 170);
        assert_eq!(json["tick_rate_hz"], 85.0);
        assert_eq!(json["duration_seconds"], 2.0);
    }
}
