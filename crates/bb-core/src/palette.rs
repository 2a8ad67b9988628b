//! Preset pen colors.
//!
//! A palette holds eight presets plus a "custom" entry point that the host
//! routes to its color picker. Which preset set is shown depends on the
//! canvas background: light inks on dark boards, dark inks on light boards.

use crate::color::Color;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const PALETTE_SIZE: usize = 8;

/// Presets shown on dark backgrounds.
pub const DARK_BOARD_COLORS: [Color; PALETTE_SIZE] = [
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0xff, 0xf4, 0x4f),
    Color::rgb(0xff, 0xb6, 0xc1),
    Color::rgb(0x6e, 0xc6, 0xff),
    Color::rgb(0x77, 0xdd, 0x77),
    Color::rgb(0xc3, 0xa6, 0xff),
    Color::rgb(0xff, 0xb3, 0x47),
    Color::rgb(0xff, 0x69, 0x61),
];

/// Presets shown on light backgrounds.
pub const LIGHT_BOARD_COLORS: [Color; PALETTE_SIZE] = [
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xb0, 0x8d, 0x00),
    Color::rgb(0xc2, 0x18, 0x5b),
    Color::rgb(0x15, 0x65, 0xc0),
    Color::rgb(0x2e, 0x7d, 0x32),
    Color::rgb(0x5e, 0x35, 0xb1),
    Color::rgb(0xe6, 0x51, 0x00),
    Color::rgb(0xc6, 0x28, 0x28),
];

/// One entry in the palette strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Preset(Color),
    /// Ask the host's color picker.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub dark_board: Vec<Color>,
    pub light_board: Vec<Color>,
    /// Backgrounds with luminance below this count as dark.
    pub luminance_threshold: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            dark_board: DARK_BOARD_COLORS.to_vec(),
            light_board: LIGHT_BOARD_COLORS.to_vec(),
            luminance_threshold: 0.5,
        }
    }
}

impl PaletteConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_dark(&self, background: Color) -> bool {
        background.luminance() < self.luminance_threshold
    }

    /// Presets for a canvas with the given background.
    pub fn presets_for(&self, background: Color) -> &[Color] {
        if self.is_dark(background) {
            &self.dark_board
        } else {
            &self.light_board
        }
    }

    /// The full swatch strip: presets followed by the custom entry.
    pub fn swatches_for(&self, background: Color) -> Vec<Swatch> {
        self.presets_for(background)
            .iter()
            .copied()
            .map(Swatch::Preset)
            .chain(std::iter::once(Swatch::Custom))
            .collect()
    }

    /// Preset at `slot` (0-based), if the palette has one there.
    pub fn preset(&self, background: Color, slot: usize) -> Option<Color> {
        self.presets_for(background).get(slot).copied()
    }
}
