//! Surfview Core - surf replay decoding and playback
//!
//! This crate turns an in-memory replay buffer into a continuous,
//! frame-rate independent player pose plus movement statistics.
//!
//! # Architecture
//!
//! - [`ReplayFile`] - Header decode once, random-access tick decode after
//! - [`PlaybackClock`] - Integer tick plus sub-tick carry, looping with a pause at each end
//! - [`interp`](playback::interp) - Cubic Hermite blending of neighbouring ticks
//! - [`SyncTracker`] - Windowed "speed went up" ratio
//! - [`ReplaySession`] - Drives all of the above once per rendered frame
//!
//! Rendering, map loading and fetching replay bytes are left to the host.

pub mod config;
pub mod error;
pub mod playback;
pub mod replay;

pub use config::PlaybackConfig;
pub use error::{ConfigError, ReplayError};

pub use replay::{
    Buttons, ReplayFile, ReplayHeader, ReplayWriter, Style, TickRate, TickSample,
};

pub use playback::{
    Frame, PlaybackClock, ReplaySession, SyncTracker, SyncWindow, format_speed, format_sync,
    format_timestamp, speed_at,
};
