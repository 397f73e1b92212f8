//! Replay fixture writer
//!
//! Encodes a header and tick records in the on-disk layout read by
//! [`ReplayFile`](super::ReplayFile). Reserved regions are zero-filled.

use crate::replay::types::TickSample;
use crate::replay::{HEADER_RESERVED_SIZE, MAGIC, TICK_READ_SIZE, TICK_SIZE};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Writer for the replay byte format
pub struct ReplayWriter<W: Write> {
    writer: W,
    format_version: u8,
    recorded_time: String,
    player_name: String,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a writer with version 1 and empty strings
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            format_version: 1,
            recorded_time: String::new(),
            player_name: String::new(),
        }
    }

    pub fn with_version(mut self, format_version: u8) -> Self {
        self.format_version = format_version;
        self
    }

    pub fn with_time(mut self, recorded_time: impl Into<String>) -> Self {
        self.recorded_time = recorded_time.into();
        self
    }

    pub fn with_player(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = player_name.into();
        self
    }

    /// Write the header followed by one 80-byte record per tick, returning
    /// the inner writer
    pub fn write(mut self, ticks: &[TickSample]) -> io::Result<W> {
        let tick_count = i32::try_from(ticks.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many ticks"))?;

        self.writer.write_u32::<LittleEndian>(MAGIC)?;
        self.writer.write_u8(self.format_version)?;
        write_string(&mut self.writer, &self.recorded_time)?;
        write_string(&mut self.writer, &self.player_name)?;
        self.writer.write_all(&[0u8; HEADER_RESERVED_SIZE as usize])?;
        self.writer.write_i32::<LittleEndian>(tick_count)?;

        for tick in ticks {
            self.write_tick(tick)?;
        }

        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_tick(&mut self, tick: &TickSample) -> io::Result<()> {
        let w = &mut self.writer;
        w.write_i32::<LittleEndian>(tick.buttons.bits() as i32)?;
        w.write_all(&[0u8; 4])?;
        for v in tick.velocity.to_array() {
            w.write_f32::<LittleEndian>(v)?;
        }
        w.write_all(&[0u8; 12])?;
        for v in tick.angles.to_array() {
            w.write_f32::<LittleEndian>(v)?;
        }
        for v in tick.position.to_array() {
            w.write_f32::<LittleEndian>(v)?;
        }
        // Padding to the record stride
        w.write_all(&[0u8; (TICK_SIZE - TICK_READ_SIZE) as usize])
    }
}

/// u8 length prefix followed by the UTF-8 bytes
fn write_string<W: Write>(w: &mut W, value: &str) -> io::Result<()> {
    let len = u8::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("string of {} bytes does not fit a u8 length prefix", value.len()),
        )
    })?;
    w.write_u8(len)?;
    w.write_all(value.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::types::Buttons;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_empty_replay_layout() {
        let data = ReplayWriter::new(Vec::new())
            .with_version(3)
            .with_time("ab")
            .write(&[])
            .unwrap();

        // magic + version + "ab" + "" + reserved + tick count
        assert_eq!(data.len(), 4 + 1 + 3 + 1 + 24 + 4);
        assert_eq!(&data[..4], &[0x0D, 0xF0, 0xAD, 0xBA]);
        assert_eq!(data[4], 3);
        assert_eq!(&data[5..8], &[2, b'a', b'b']);
        assert_eq!(data[8], 0);
        assert!(data[9..33].iter().all(|&b| b == 0));
        assert_eq!(&data[33..], &0i32.to_le_bytes());
    }

    #[test]
    fn test_tick_record_layout() {
        let tick = TickSample {
            tick: 0,
            buttons: Buttons::DUCK,
            velocity: Vec3::new(3.0, 4.0, 0.0),
            position: Vec3::new(10.0, 20.0, 30.0),
            angles: Vec2::new(1.0, 90.0),
        };
        let data = ReplayWriter::new(Vec::new()).write(&[tick, tick]).unwrap();
        let first = 4 + 1 + 1 + 1 + 24 + 4;

        assert_eq!(data.len(), first + 2 * TICK_SIZE as usize);

        let record = &data[first..first + TICK_SIZE as usize];
        assert_eq!(&record[0..4], &4i32.to_le_bytes());
        assert_eq!(&record[8..12], &3.0f32.to_le_bytes());
        assert_eq!(&record[12..16], &4.0f32.to_le_bytes());
        assert_eq!(&record[32..36], &1.0f32.to_le_bytes());
        assert_eq!(&record[36..40], &90.0f32.to_le_bytes());
        assert_eq!(&record[40..44], &10.0f32.to_le_bytes());
        assert_eq!(&record[48..52], &30.0f32.to_le_bytes());
        assert!(record[52..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_long_string_rejected() {
        let err = ReplayWriter::new(Vec::new())
            .with_player("x".repeat(300))
            .write(&[])
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
