//! Reading replay files from disk

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use surfview_core::ReplayFile;

/// Replay file argument shared by every command
#[derive(Args)]
pub struct ReplaySource {
    /// Replay file (.rec)
    pub file: PathBuf,

    /// Name to derive map, style and tick rate from instead of the file path
    /// (e.g. "replays/85tick/surf_kitsune.rec")
    #[arg(long)]
    pub source_name: Option<String>,
}

impl ReplaySource {
    /// The name the path conventions are matched against, with `/` separators
    pub fn source_name(&self) -> String {
        match &self.source_name {
            Some(name) => name.clone(),
            None => self.file.to_string_lossy().replace('\\', "/"),
        }
    }

    /// Read and decode the replay header
    pub fn open(&self) -> Result<ReplayFile> {
        let data = std::fs::read(&self.file)
            .with_context(|| format!("Failed to read replay: {}", self.file.display()))?;
        let source_name = self.source_name();
        ReplayFile::open(data, &source_name)
            .with_context(|| format!("Failed to decode replay: {}", self.file.display()))
    }
}
