//! Deterministic playback of a loaded replay
//!
//! ```text
//! ReplayFile ─▶ PlaybackClock ─▶ interp (4 samples) ─▶ Frame
//!                    │
//!                    └──────────▶ SyncTracker ─▶ speed / sync
//! ```
//!
//! Everything here is single-threaded and frame-driven: the host calls
//! [`ReplaySession::update`] once per rendered frame with the elapsed time.

pub mod clock;
pub mod interp;
pub mod session;
pub mod stats;

pub use clock::{Advance, PlaybackClock};
pub use session::{Frame, ReplaySession};
pub use stats::{SyncTracker, SyncWindow, format_speed, format_sync, format_timestamp, speed_at};
