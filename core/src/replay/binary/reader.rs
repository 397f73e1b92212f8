//! Replay decoder
//!
//! Decodes the header once, then decodes any tick on demand. Every tick decode
//! starts with an absolute seek on a fresh cursor, so decodes are independent
//! of each other and of call order.

use crate::error::ReplayError;
use crate::replay::binary::cursor::{ByteCursor, SeekOrigin};
use crate::replay::source_name;
use crate::replay::types::{Buttons, ReplayHeader, TickSample};
use crate::replay::{HEADER_RESERVED_SIZE, MAGIC, TICK_READ_SIZE, TICK_SIZE};

/// A loaded replay: the owned byte buffer plus its decoded header
#[derive(Debug, Clone)]
pub struct ReplayFile {
    data: Vec<u8>,
    header: ReplayHeader,
    first_tick_offset: u64,
}

impl ReplayFile {
    /// Decode the header of `data`.
    ///
    /// `source_name` is the path or URL the buffer came from; map name, style
    /// and tick rate are derived from it.
    pub fn open(data: impl Into<Vec<u8>>, source_name: &str) -> Result<Self, ReplayError> {
        let data = data.into();
        let mut cursor = ByteCursor::new(data.as_slice());

        let magic = cursor.read_u32()?;
        if magic != MAGIC {
            return Err(ReplayError::InvalidMagic { found: magic });
        }

        let format_version = cursor.read_u8()?;
        let map_name = source_name::map_name(source_name).to_string();
        let style = source_name::style(source_name);
        let recorded_time = cursor.read_string(None)?;
        let player_name = cursor.read_string(None)?;

        cursor.move_offset(HEADER_RESERVED_SIZE);
        // The skip itself is unchecked, so make sure the reserved block was there
        let tick_count = cursor.read_i32()?;
        if tick_count < 0 {
            return Err(ReplayError::NegativeTickCount(tick_count));
        }

        let tick_rate = source_name::tick_rate(source_name)?;
        let first_tick_offset = cursor.offset();

        if tick_count > 0 {
            let needed =
                first_tick_offset + TICK_SIZE * (tick_count as u64 - 1) + TICK_READ_SIZE;
            if needed > data.len() as u64 {
                return Err(ReplayError::Truncated {
                    tick_count,
                    needed,
                    len: data.len(),
                });
            }
        }

        let header = ReplayHeader {
            format_version,
            map_name,
            style,
            recorded_time,
            player_name,
            tick_count,
            tick_rate,
        };

        tracing::debug!(
            map = %header.map_name,
            style = header.style.name(),
            tick_rate = header.tick_rate.hz(),
            tick_count,
            player = %header.player_name,
            "replay loaded"
        );

        Ok(Self {
            data,
            header,
            first_tick_offset,
        })
    }

    /// The decoded header
    pub fn header(&self) -> &ReplayHeader {
        &self.header
    }

    /// Number of tick records
    pub fn tick_count(&self) -> i32 {
        self.header.tick_count
    }

    /// Size of the owned buffer in bytes
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Clamp a tick into `[0, tick_count - 1]`, or to 0 for an empty replay
    pub fn clamp_tick(&self, tick: i32) -> i32 {
        tick.min(self.header.tick_count - 1).max(0)
    }

    /// Decode tick record `tick` into `out`.
    ///
    /// `tick` must lie in `[0, tick_count)`; use [`Self::sample_tick`] for
    /// indices that may be out of range.
    pub fn decode_tick<'a>(
        &self,
        tick: i32,
        out: &'a mut TickSample,
    ) -> Result<&'a mut TickSample, ReplayError> {
        if tick < 0 || tick >= self.header.tick_count {
            return Err(ReplayError::TickOutOfRange {
                tick,
                tick_count: self.header.tick_count,
            });
        }

        let mut cursor = ByteCursor::new(self.data.as_slice());
        cursor.seek(
            (self.first_tick_offset + TICK_SIZE * tick as u64) as i64,
            SeekOrigin::Begin,
        );

        let buttons = cursor.read_i32()?;
        cursor.move_offset(4);
        let velocity = cursor.read_vec3()?;
        cursor.move_offset(12);
        let angles = cursor.read_vec2()?;
        let position = cursor.read_vec3()?;

        out.tick = tick;
        out.buttons = Buttons::from_bits_retain(buttons as u32);
        out.velocity = velocity;
        out.angles = angles;
        out.position = position;
        Ok(out)
    }

    /// Decode the clamped tick into `out`, keeping `tick` as the requested index.
    ///
    /// An empty replay yields a zeroed sample. Never fails for a replay that
    /// passed [`Self::open`].
    pub fn sample_tick<'a>(&self, tick: i32, out: &'a mut TickSample) -> &'a mut TickSample {
        if self.header.tick_count == 0 {
            out.reset(tick);
            return out;
        }

        if self.decode_tick(self.clamp_tick(tick), out).is_err() {
            // Unreachable after the truncation check in `open`
            out.reset(tick);
        }
        out.tick = tick;
        out
    }
}
