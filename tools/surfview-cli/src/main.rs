//! Surfview CLI - inspect and play back surf replays without a renderer
//!
//! # Commands
//!
//! - `surfview info` - Print the replay header
//! - `surfview dump` - Print decoded tick records
//! - `surfview play` - Run a headless playback session and print frames
//!
//! # Usage
//!
//! ```bash
//! surfview info replays/85tick/surf_kitsune.rec
//! surfview dump replays/85tick/surf_kitsune.rec --from 1000 --count 20
//! surfview play replays/85tick/surf_kitsune.rec --seconds 5 --rate 2
//! ```
//!
//! Tick rate, map name and style come from the file path, so keep the
//! `85tick`/`66tick` directory in the path or pass `--source-name`.

mod dump;
mod info;
mod load;
mod play;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Surfview CLI - inspect and play back surf replays
#[derive(Parser)]
#[command(name = "surfview")]
#[command(about = "Inspect and play back surf replays")]
#[command(version)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the replay header
    Info(info::InfoArgs),

    /// Print decoded tick records
    Dump(dump::DumpArgs),

    /// Run a headless playback session
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Dump(args) => dump::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
