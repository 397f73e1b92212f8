//! Fields encoded in the replay's source path rather than its bytes
//!
//! Replays are published as `.../<rate>tick/surf_<map>[_bonus_N|_stage_N][_style_N].rec`.
//! Map name, style and tick rate are only available from that path.

use crate::error::ReplayError;
use crate::replay::types::{Style, TickRate};

const MAP_PREFIX: &str = "surf_";
const MAP_TERMINATORS: [&str; 4] = ["_bonus_", "_stage_", "_style_", ".rec"];
const STYLE_MARKER: &str = "_style_";

/// Map name: from the first `surf_` up to the earliest terminator after it
///
/// A name without `surf_` starts at 0; a name without a terminator runs to
/// the end.
pub fn map_name(source_name: &str) -> &str {
    let start = source_name.find(MAP_PREFIX).unwrap_or(0);
    let rest = &source_name[start..];
    let end = MAP_TERMINATORS
        .iter()
        .filter_map(|marker| rest.find(marker))
        .min()
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Style from the digit right after `_style_`, [`Style::Normal`] when absent
pub fn style(source_name: &str) -> Style {
    let Some(marker) = source_name.find(STYLE_MARKER) else {
        return Style::Normal;
    };

    let digit = source_name[marker + STYLE_MARKER.len()..]
        .chars()
        .next()
        .and_then(|c| c.to_digit(10));

    match digit.and_then(Style::from_index) {
        Some(style) => style,
        None => {
            tracing::warn!(source_name, "unrecognized style marker, assuming Normal");
            Style::Normal
        }
    }
}

/// Tick rate from the `/85tick/` or `/66tick/` directory segment
pub fn tick_rate(source_name: &str) -> Result<TickRate, ReplayError> {
    if source_name.contains("/66tick/") {
        Ok(TickRate::Tick66)
    } else if source_name.contains("/85tick/") {
        Ok(TickRate::Tick85)
    } else {
        Err(ReplayError::UnsupportedTickRate {
            source_name: source_name.to_string(),
        })
    }
}
