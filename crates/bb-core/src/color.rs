//! RGBA colors with hex parsing and luminance.
//!
//! Colors cross every boundary of the engine as hex strings: palette
//! configuration, the new-canvas configurator, and the `canvas_color`
//! metadata embedded in saved images.

use crate::error::CanvasError;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let pair = |i: usize| -> Option<u8> {
            Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
        };

        match bytes.len() {
            3 => Some(Self::rgb(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            )),
            4 => Some(Self::rgba(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
                hex_val(bytes[3])? * 17,
            )),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Emit as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            self.to_rgb_hex()
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Emit as `#rrggbb`, dropping alpha.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1] (Rec. 709 weights, alpha ignored).
    pub fn luminance(&self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
            .ok_or_else(|| CanvasError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = CanvasError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(
            Color::from_hex("#1c1c1c"),
            Some(Color::rgb(0x1c, 0x1c, 0x1c))
        );
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(
            Color::from_hex("#FF000080"),
            Some(Color::rgba(255, 0, 0, 0x80))
        );
        assert_eq!(Color::from_hex("#f008"), Some(Color::rgba(255, 0, 0, 0x88)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex(""), None);
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn hex_is_lowercase_and_drops_opaque_alpha() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_rgb_hex(), "#010203");
    }

    #[test]
    fn luminance_splits_dark_and_light() {
        assert!(Color::from_hex("#1c1c1c").unwrap().is_dark());
        assert!(!Color::WHITE.is_dark());
        assert!(Color::BLACK.is_dark());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let pink = Color::rgb(0xff, 0xb6, 0xc1);
        let json = serde_json::to_string(&pink).unwrap();
        assert_eq!(json, "\"#ffb6c1\"");
        let back: Color = serde_json::from_str("\"#6ec6ff\"").unwrap();
        assert_eq!(back, Color::rgb(0x6e, 0xc6, 0xff));
        assert!(serde_json::from_str::<Color>("\"#zz\"").is_err());
    }
}
