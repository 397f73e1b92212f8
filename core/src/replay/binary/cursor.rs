//! Positional little-endian reader over a fixed byte buffer
//!
//! Seeking never fails; bounds are enforced by the reads themselves, which
//! report [`ReplayError::OutOfBounds`] instead of returning garbage.
//! Only the decoder sees this type; callers get [`ReplayFile`](super::ReplayFile).

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use glam::{Vec2, Vec3};

use crate::error::ReplayError;

/// Reference point for [`ByteCursor::seek`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeekOrigin {
    /// Offset is absolute from the start of the buffer
    Begin,
    /// Offset is relative to the current position
    Current,
    /// Position becomes `buffer length - offset`
    #[allow(dead_code)]
    End,
}

/// Reader with a single mutable offset over an immutable buffer
pub(crate) struct ByteCursor<T: AsRef<[u8]>> {
    inner: Cursor<T>,
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: T) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Length of the underlying buffer in bytes
    pub fn len(&self) -> usize {
        self.inner.get_ref().as_ref().len()
    }

    /// Current read offset
    pub fn offset(&self) -> u64 {
        self.inner.position()
    }

    /// Move the read offset and return the new offset.
    ///
    /// No bounds checking happens here. A target before the start of the
    /// buffer saturates at 0.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> u64 {
        let base = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => self.inner.position() as i64,
            SeekOrigin::End => self.len() as i64,
        };
        let target = match origin {
            SeekOrigin::End => base.saturating_sub(offset),
            _ => base.saturating_add(offset),
        };
        let target = target.max(0) as u64;
        self.inner.set_position(target);
        target
    }

    /// Skip `delta` bytes. Negative deltas that would pass the start of the
    /// buffer clamp to offset 0.
    pub fn move_offset(&mut self, delta: i64) {
        self.seek(delta, SeekOrigin::Current);
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8, ReplayError> {
        let offset = self.offset();
        self.inner
            .read_u8()
            .map_err(|_| self.out_of_bounds(offset, 1))
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> Result<i32, ReplayError> {
        let offset = self.offset();
        self.inner
            .read_i32::<LittleEndian>()
            .map_err(|_| self.out_of_bounds(offset, 4))
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self) -> Result<u32, ReplayError> {
        let offset = self.offset();
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|_| self.out_of_bounds(offset, 4))
    }

    /// Read a little-endian f32
    pub fn read_f32(&mut self) -> Result<f32, ReplayError> {
        let offset = self.offset();
        self.inner
            .read_f32::<LittleEndian>()
            .map_err(|_| self.out_of_bounds(offset, 4))
    }

    /// Read two consecutive f32s as (x, y)
    pub fn read_vec2(&mut self) -> Result<Vec2, ReplayError> {
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }

    /// Read three consecutive f32s as (x, y, z)
    pub fn read_vec3(&mut self) -> Result<Vec3, ReplayError> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    /// Read a UTF-8 string.
    ///
    /// With `length` of `None` a `u8` length prefix is read first. Invalid
    /// sequences decode to U+FFFD rather than failing the whole header.
    pub fn read_string(&mut self, length: Option<usize>) -> Result<String, ReplayError> {
        let length = match length {
            Some(length) => length,
            None => self.read_u8()? as usize,
        };

        let offset = self.offset();
        let mut bytes = vec![0u8; length];
        self.inner
            .read_exact(&mut bytes)
            .map_err(|_| self.out_of_bounds(offset, length))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Build an out-of-bounds error and restore the offset the failed read started at
    fn out_of_bounds(&mut self, offset: u64, wanted: usize) -> ReplayError {
        self.inner.set_position(offset);
        ReplayError::OutOfBounds {
            offset,
            wanted,
            len: self.len(),
        }
    }
}
