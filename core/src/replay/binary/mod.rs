//! Binary replay format (.rec)
//!
//! All integers and floats are little-endian.
//!
//! # File Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ Header                                         │
//! │ ├─ magic: u32 (0xBAADF00D)                     │
//! │ ├─ format_version: u8                          │
//! │ ├─ time: u8 length + UTF-8 bytes               │
//! │ ├─ player_name: u8 length + UTF-8 bytes        │
//! │ ├─ reserved: [u8; 24]                          │
//! │ └─ tick_count: i32                             │
//! ├────────────────────────────────────────────────┤
//! │ Tick records (80 byte stride)                  │
//! │ ├─ buttons: i32                                │
//! │ ├─ reserved: [u8; 4]                           │
//! │ ├─ velocity: [f32; 3]                          │
//! │ ├─ reserved: [u8; 12]                          │
//! │ ├─ angles: [f32; 2] (pitch, yaw)               │
//! │ ├─ position: [f32; 3]                          │
//! │ └─ padding: [u8; 28]                           │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Map name, style and tick rate are not in the bytes; see
//! [`source_name`](crate::replay::source_name).
//!
//! The positional reader the decoder is built on stays private:
//!
//! ```compile_fail
//! use surfview_core::replay::binary::ByteCursor;
//! ```

mod cursor;
mod reader;
mod writer;

pub use reader::ReplayFile;
pub use writer::ReplayWriter;
