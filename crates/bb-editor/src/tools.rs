//! Drawing tools and the per-stroke session.
//!
//! Freehand tools (pen, eraser) commit every pointer segment straight into
//! the canvas. Parametric shapes (rectangle, ellipse, line) are defined by
//! an anchor and the current pointer and only commit on pointer-up.

use bb_core::{CanvasError, Color, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active tool determines how pointer input is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Ellipse,
    Line,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Line,
    ];

    /// Rectangle, ellipse, and line preview until pointer-up.
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Line
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Eraser => "eraser",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Line => "line",
        }
    }
}

impl FromStr for ToolKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ToolKind::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| CanvasError::UnknownTool(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State for one pointer-down → pointer-up interaction.
///
/// Tool, width, and color are captured when the stroke begins, so changing
/// them mid-stroke only affects the next stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSession {
    pub tool: ToolKind,
    pub width: i32,
    pub color: Color,
    pub last: Point,
    /// Set only for parametric shapes.
    pub anchor: Option<Point>,
}

impl StrokeSession {
    pub fn begin(tool: ToolKind, width: i32, color: Color, at: Point) -> Self {
        Self {
            tool,
            width,
            color,
            last: at,
            anchor: tool.is_shape().then_some(at),
        }
    }

    /// Box spanned by the anchor and `current`, independent of drag direction.
    pub fn shape_bounds(&self, current: Point) -> Option<Rect> {
        self.anchor.map(|a| Rect::from_points(a, current))
    }
}

/// Width after applying stylus pressure: `max(1, round(width * pressure))`.
/// Without a pressure reading the nominal width is used.
pub fn pressure_width(width: i32, pressure: Option<f32>, enabled: bool) -> i32 {
    match pressure {
        Some(p) if enabled => {
            let scaled = (width as f64 * f64::from(p.clamp(0.0, 1.0))).round();
            (scaled as i32).max(1)
        }
        _ => width,
    }
}
