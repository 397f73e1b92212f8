//! Core types for the replay system
//!
//! The header is decoded once per load; [`TickSample`] is a reusable scratch
//! value the decoder fills in place.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Eye height above the origin while standing
pub const STAND_EYE_HEIGHT: f32 = 64.0;

/// Eye height above the origin while ducking
pub const DUCK_EYE_HEIGHT: f32 = 46.0;

/// Fixed replay header, derived from the byte stream and the source name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayHeader {
    /// Format version byte (stored, not validated)
    pub format_version: u8,
    /// Map name, taken from the source name
    pub map_name: String,
    /// Movement style, taken from the source name
    pub style: Style,
    /// Recorded run time as written by the server
    pub recorded_time: String,
    /// Name of the recorded player
    pub player_name: String,
    /// Number of tick records
    pub tick_count: i32,
    /// Server tick rate, taken from the source path
    pub tick_rate: TickRate,
}

/// Movement style the run was recorded with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Normal = 0,
    /// Sideways
    Sw = 1,
    /// Half-sideways
    Hsw = 2,
    /// Backwards
    Bw = 3,
    /// Low gravity
    Lg = 4,
    /// Slow motion
    Sm = 5,
    /// Fast forward
    Ffw = 6,
    /// Frozen strafes
    Fs = 7,
}

impl Style {
    /// Map a style index (0-7) to its variant
    pub fn from_index(index: u32) -> Option<Self> {
        Some(match index {
            0 => Self::Normal,
            1 => Self::Sw,
            2 => Self::Hsw,
            3 => Self::Bw,
            4 => Self::Lg,
            5 => Self::Sm,
            6 => Self::Ffw,
            7 => Self::Fs,
            _ => return None,
        })
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Sw => "SW",
            Self::Hsw => "HSW",
            Self::Bw => "BW",
            Self::Lg => "LG",
            Self::Sm => "SM",
            Self::Ffw => "FFW",
            Self::Fs => "FS",
        }
    }
}

/// Server tick rate a replay was recorded at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickRate {
    Tick66,
    Tick85,
}

impl TickRate {
    /// Ticks per second
    pub fn hz(self) -> f64 {
        match self {
            Self::Tick66 => 66.0,
            Self::Tick85 => 85.0,
        }
    }

    /// Seconds per tick
    pub fn period(self) -> f64 {
        1.0 / self.hz()
    }

    /// Whole number of ticks covering `seconds`, rounded to nearest
    pub fn ticks_in(self, seconds: f64) -> i32 {
        (self.hz() * seconds).round() as i32
    }
}

bitflags::bitflags! {
    /// Input buttons held during a tick
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u32 {
        const ATTACK = 1 << 0;
        const JUMP = 1 << 1;
        const DUCK = 1 << 2;
        const FORWARD = 1 << 3;
        const BACK = 1 << 4;
        const USE = 1 << 5;
        const CANCEL = 1 << 6;
        const LEFT = 1 << 7;
        const RIGHT = 1 << 8;
        const MOVE_LEFT = 1 << 9;
        const MOVE_RIGHT = 1 << 10;
        const ATTACK2 = 1 << 11;
        const RUN = 1 << 12;
        const RELOAD = 1 << 13;
        const ALT1 = 1 << 14;
        const ALT2 = 1 << 15;
        const SCORE = 1 << 16;
        const SPEED = 1 << 17;
        const WALK = 1 << 18;
        const ZOOM = 1 << 19;
        const WEAPON1 = 1 << 20;
        const WEAPON2 = 1 << 21;
        const BULL_RUSH = 1 << 22;
        const GRENADE1 = 1 << 23;
        const GRENADE2 = 1 << 24;
    }
}

// Serialized as raw bits so unknown high bits survive a round trip
impl Serialize for Buttons {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Buttons {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Buttons::from_bits_retain(bits))
    }
}

/// One decoded tick record.
///
/// Owned by the caller and filled in place by
/// [`ReplayFile::decode_tick`](crate::replay::ReplayFile::decode_tick), so a
/// playback loop can reuse the same few samples every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSample {
    /// Tick index as requested (before clamping)
    pub tick: i32,
    /// Buttons held this tick
    pub buttons: Buttons,
    /// Player velocity in units per second
    pub velocity: Vec3,
    /// Player origin
    pub position: Vec3,
    /// View angles in degrees: x = pitch, y = yaw
    pub angles: Vec2,
}

impl TickSample {
    /// Eye height above the origin for this tick's duck state
    pub fn eye_height(&self) -> f32 {
        if self.buttons.contains(Buttons::DUCK) {
            DUCK_EYE_HEIGHT
        } else {
            STAND_EYE_HEIGHT
        }
    }

    /// Horizontal speed, ignoring the vertical velocity component
    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.truncate().length()
    }

    /// Zero every field and record `tick` as the requested index
    pub fn reset(&mut self, tick: i32) {
        *self = Self {
            tick,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_height_follows_duck() {
        let mut sample = TickSample::default();
        assert_eq!(sample.eye_height(), 64.0);

        sample.buttons = Buttons::DUCK | Buttons::FORWARD;
        assert_eq!(sample.eye_height(), 46.0);

        sample.buttons = Buttons::JUMP;
        assert_eq!(sample.eye_height(), 64.0);
    }

    #[test]
    fn test_horizontal_speed_ignores_z() {
        let sample = TickSample {
            velocity: Vec3::new(3.0, 4.0, -800.0),
            ..Default::default()
        };
        assert_eq!(sample.horizontal_speed(), 5.0);
    }

    #[test]
    fn test_button_bits() {
        assert_eq!(Buttons::DUCK.bits(), 4);
        assert_eq!(Buttons::GRENADE2.bits(), 1 << 24);
        assert_eq!(Buttons::all().bits().count_ones(), 25);

        let held = Buttons::from_bits_retain(0b1010);
        assert!(held.contains(Buttons::JUMP));
        assert!(held.contains(Buttons::FORWARD));
        assert!(!held.contains(Buttons::DUCK));
    }

    #[test]
    fn test_buttons_serialize_as_bits() {
        let json = serde_json::to_string(&(Buttons::DUCK | Buttons::JUMP)).unwrap();
        assert_eq!(json, "6");

        let parsed: Buttons = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, Buttons::DUCK | Buttons::JUMP);
    }

    #[test]
    fn test_style_from_index() {
        assert_eq!(Style::from_index(0), Some(Style::Normal));
        assert_eq!(Style::from_index(3), Some(Style::Bw));
        assert_eq!(Style::from_index(7), Some(Style::Fs));
        assert_eq!(Style::from_index(8), None);
        assert_eq!(Style::Hsw.name(), "HSW");
    }

    #[test]
    fn test_tick_rate() {
        assert_eq!(TickRate::Tick85.hz(), 85.0);
        assert_eq!(TickRate::Tick66.hz(), 66.0);
        assert_eq!(TickRate::Tick85.ticks_in(1.0), 85);
        assert_eq!(TickRate::Tick66.ticks_in(1.0), 66);
        assert!((TickRate::Tick66.period() - 1.0 / 66.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_zeroes_sample() {
        let mut sample = TickSample {
            tick: 4,
            buttons: Buttons::DUCK,
            velocity: Vec3::ONE,
            position: Vec3::ONE,
            angles: Vec2::ONE,
        };
        sample.reset(9);
        assert_eq!(
            sample,
            TickSample {
                tick: 9,
                ..Default::default()
            }
        );
    }
}
