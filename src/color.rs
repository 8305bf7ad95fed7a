//! Packed RGB colors that serialize as `#rrggbb`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 24-bit color, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Default obstacle color
    pub const CORAL: Rgb = Rgb(0xff6b6b);

    pub fn channels(self) -> (u8, u8, u8) {
        (
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        )
    }

    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Shift every channel by `amount`, saturating at 0 and 255
    pub fn lighten(self, amount: i16) -> Self {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        let (r, g, b) = self.channels();
        Self::from_channels(shift(r), shift(g), shift(b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::CORAL
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let expanded = match hex.len() {
            6 => hex.to_string(),
            // #abc shorthand
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ParseColorError(s.to_string())),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Rgb)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
