//! Surf replay format
//!
//! A replay is a header followed by fixed-stride tick records, one per
//! server tick. Part of the header lives in the file's path rather than its
//! bytes:
//!
//! ```text
//! replays/85tick/surf_kitsune_bonus_1_style_2.rec
//!         ^^^^^^ ^^^^^^^^^^^^              ^
//!         rate   map name                  style
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use surfview_core::replay::{ReplayFile, TickSample};
//!
//! let replay = ReplayFile::open(bytes, "replays/85tick/surf_test.rec")?;
//! let mut sample = TickSample::default();
//! replay.sample_tick(120, &mut sample);
//! println!("{} at {}", replay.header().map_name, sample.position);
//! ```

pub mod binary;
pub mod source_name;
pub mod types;

/// Magic number at the start of every replay
pub const MAGIC: u32 = 0xBAAD_F00D;

/// Reserved block between the player name and the tick count
pub const HEADER_RESERVED_SIZE: i64 = 24;

/// Stride between tick records
pub const TICK_SIZE: u64 = 80;

/// Bytes of each tick record that are actually decoded
pub const TICK_READ_SIZE: u64 = 52;

pub use binary::{ReplayFile, ReplayWriter};
pub use types::{
    Buttons, DUCK_EYE_HEIGHT, ReplayHeader, STAND_EYE_HEIGHT, Style, TickRate, TickSample,
};
