//! Engine settings and the "new canvas" configuration.
//!
//! Both are plain serde structs so a host can keep them in a JSON settings
//! file. Missing fields fall back to the defaults of the desktop app.

use crate::color::Color;
use crate::error::{CanvasError, Result};
use serde::{Deserialize, Serialize};

/// Background used when nothing else is known (fresh canvas, untagged file).
pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x1c, 0x1c, 0x1c);
/// Background selected by [`BackgroundMode::Light`].
pub const LIGHT_BACKGROUND: Color = Color::WHITE;

pub const MIN_STROKE_WIDTH: i32 = 1;
pub const MAX_STROKE_WIDTH: i32 = 50;

/// 16384 x 16384.
pub const DEFAULT_MAX_PIXELS: u64 = 1 << 28;

/// Tunables for a canvas and its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum number of undo snapshots kept per canvas.
    pub history_depth: usize,
    pub default_width: i32,
    pub default_height: i32,
    pub default_background: Color,
    pub default_pen_color: Color,
    pub default_stroke_width: i32,
    pub pressure_enabled: bool,
    /// Eraser width relative to the pen width.
    pub eraser_scale: f64,
    /// Largest canvas, in pixels, the engine will allocate.
    pub max_pixels: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            history_depth: 10,
            default_width: 640,
            default_height: 480,
            default_background: DEFAULT_BACKGROUND,
            default_pen_color: Color::WHITE,
            default_stroke_width: 4,
            pressure_enabled: true,
            eraser_scale: 1.5,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON. Absent keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate a requested canvas size against the pixel limit.
    pub fn check_dimensions(&self, width: i32, height: i32) -> Result<(u32, u32)> {
        let invalid = || CanvasError::InvalidDimension {
            width: width as i64,
            height: height as i64,
        };
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(invalid());
        };
        if w == 0 || h == 0 || u64::from(w) * u64::from(h) > self.max_pixels {
            return Err(invalid());
        }
        Ok((w, h))
    }
}

/// Clamp a requested stroke width into the supported range.
pub fn clamp_stroke_width(width: i32) -> i32 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

/// How the configurator picks a background for a new canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Dark,
    Light,
    Custom,
}

/// Parameters supplied by the "new canvas" configurator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCanvasConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub background_mode: BackgroundMode,
    /// Hex string, only consulted for [`BackgroundMode::Custom`].
    #[serde(default)]
    pub custom_color: Option<String>,
}

impl NewCanvasConfig {
    pub fn new(width: i32, height: i32, background_mode: BackgroundMode) -> Self {
        Self {
            width,
            height,
            background_mode,
            custom_color: None,
        }
    }

    pub fn custom(width: i32, height: i32, hex: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background_mode: BackgroundMode::Custom,
            custom_color: Some(hex.into()),
        }
    }

    /// Resolve the mode to a concrete color.
    pub fn background(&self) -> Result<Color> {
        match self.background_mode {
            BackgroundMode::Dark => Ok(DEFAULT_BACKGROUND),
            BackgroundMode::Light => Ok(LIGHT_BACKGROUND),
            BackgroundMode::Custom => match &self.custom_color {
                Some(hex) => hex.parse(),
                None => Err(CanvasError::InvalidColor(String::new())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_desktop_app() {
        let s = EngineSettings::default();
        assert_eq!(s.history_depth, 10);
        assert_eq!((s.default_width, s.default_height), (640, 480));
        assert_eq!(s.default_background.to_hex(), "#1c1c1c");
        assert_eq!(s.default_stroke_width, 4);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = EngineSettings::from_json(
            r##"{ "history_depth": 3, "default_pen_color": "#ff6961" }"##,
        )
        .unwrap();
        assert_eq!(s.history_depth, 3);
        assert_eq!(s.default_pen_color, Color::rgb(0xff, 0x69, 0x61));
        assert_eq!(s.default_width, 640);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = EngineSettings::from_json("{ history_depth: }").unwrap_err();
        assert!(matches!(err, CanvasError::Config(_)));
    }

    #[test]
    fn dimensions_checked_against_pixel_limit() {
        let s = EngineSettings {
            max_pixels: 10_000,
            ..EngineSettings::default()
        };
        assert_eq!(s.check_dimensions(100, 100).unwrap(), (100, 100));
        assert!(s.check_dimensions(101, 100).is_err());
        assert!(s.check_dimensions(0, 5).is_err());
        assert!(s.check_dimensions(5, -1).is_err());

        let defaults = EngineSettings::default();
        let huge = defaults.check_dimensions(i32::MAX, i32::MAX);
        assert!(matches!(huge, Err(CanvasError::InvalidDimension { .. })));
    }

    #[test]
    fn stroke_width_clamps() {
        assert_eq!(clamp_stroke_width(0), 1);
        assert_eq!(clamp_stroke_width(-7), 1);
        assert_eq!(clamp_stroke_width(25), 25);
        assert_eq!(clamp_stroke_width(51), 50);
    }

    #[test]
    fn background_modes_resolve() {
        assert_eq!(
            NewCanvasConfig::new(10, 10, BackgroundMode::Dark)
                .background()
                .unwrap(),
            DEFAULT_BACKGROUND
        );
        assert_eq!(
            NewCanvasConfig::new(10, 10, BackgroundMode::Light)
                .background()
                .unwrap(),
            Color::WHITE
        );
        assert_eq!(
            NewCanvasConfig::custom(10, 10, "#336699")
                .background()
                .unwrap(),
            Color::rgb(0x33, 0x66, 0x99)
        );
    }

    #[test]
    fn custom_without_color_fails() {
        let cfg = NewCanvasConfig::new(10, 10, BackgroundMode::Custom);
        assert!(matches!(
            cfg.background(),
            Err(CanvasError::InvalidColor(_))
        ));
        let cfg = NewCanvasConfig::custom(10, 10, "#nothex");
        assert!(matches!(
            cfg.background(),
            Err(CanvasError::InvalidColor(_))
        ));
    }

    #[test]
    fn new_canvas_config_from_json() {
        let cfg: NewCanvasConfig = serde_json::from_str(
            r#"{ "width": 800, "height": 600, "background_mode": "light" }"#,
        )
        .unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.background().unwrap(), Color::WHITE);
    }
}
