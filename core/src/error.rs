//! Error types for replay loading and playback configuration

use std::io;

/// Errors raised while opening or decoding a replay buffer.
///
/// Everything except [`ReplayError::TickOutOfRange`] is raised from
/// [`ReplayFile::open`](crate::replay::ReplayFile::open). Once a replay has
/// opened, sampling through clamped ticks cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// The buffer does not start with the replay magic number
    #[error("invalid replay magic {found:#010x} (expected {expected:#010x})", expected = crate::replay::MAGIC)]
    InvalidMagic { found: u32 },

    /// The source path carries neither the 85 tick nor the 66 tick directory marker
    #[error("cannot determine tick rate from source name '{source_name}' (expected a /85tick/ or /66tick/ segment)")]
    UnsupportedTickRate { source_name: String },

    /// A read ran past the end of the buffer
    #[error("read of {wanted} byte(s) at offset {offset} is out of bounds (buffer is {len} bytes)")]
    OutOfBounds { offset: u64, wanted: usize, len: usize },

    /// The header announces a negative number of ticks
    #[error("replay header has a negative tick count ({0})")]
    NegativeTickCount(i32),

    /// The buffer ends before the last announced tick record
    #[error("replay announces {tick_count} ticks but needs {needed} bytes (buffer is {len} bytes)")]
    Truncated { tick_count: i32, needed: u64, len: usize },

    /// An unclamped tick index was passed to a raw decode
    #[error("tick {tick} is outside the replay (tick count {tick_count})")]
    TickOutOfRange { tick: i32, tick_count: i32 },
}

/// Errors raised while loading a [`PlaybackConfig`](crate::config::PlaybackConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The TOML could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_magic_message() {
        let err = ReplayError::InvalidMagic { found: 0x1234 };
        assert_eq!(
            err.to_string(),
            "invalid replay magic 0x00001234 (expected 0xbaadf00d)"
        );
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = ReplayError::OutOfBounds {
            offset: 10,
            wanted: 4,
            len: 12,
        };
        assert!(err.to_string().contains("offset 10"));
        assert!(err.to_string().contains("12 bytes"));
    }
}
