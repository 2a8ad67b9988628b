//! The canvas engine: pixel buffer, tool state, strokes, and history.
//!
//! A canvas is driven by three pointer calls in physical order:
//!
//! ```text
//!   Idle ──begin_stroke──▶ Drawing ──continue_stroke*──▶ Drawing ──end_stroke──▶ Idle
//! ```
//!
//! - **Pen / eraser** composite each segment into the committed buffer as
//!   the pointer moves.
//! - **Rectangle / ellipse / line** render into a preview buffer while the
//!   pointer moves and composite the final shape once on pointer-up.
//!
//! Either way the snapshot taken by `begin_stroke` is the stroke's single
//! undo step. Move and up events without a preceding down are ignored, and
//! so are undo, redo and clear while a stroke is in progress.

use crate::history::History;
use crate::tools::{StrokeSession, ToolKind, pressure_width};
use bb_core::config::{DEFAULT_BACKGROUND, clamp_stroke_width};
use bb_core::persist::{self, LoadedImage};
use bb_core::raster;
use bb_core::{CanvasError, Color, EngineSettings, ImageFormat, Point, Result, RgbaImage};
use std::path::Path;

/// Capability the engine asks for when the user wants a custom pen color.
///
/// The host implements this over its color dialog; `None` means the user
/// cancelled or picked nothing valid.
pub trait ColorPicker {
    fn pick_color(&mut self, current: Color) -> Option<Color>;
}

impl<F> ColorPicker for F
where
    F: FnMut(Color) -> Option<Color>,
{
    fn pick_color(&mut self, current: Color) -> Option<Color> {
        self(current)
    }
}

pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    /// Committed pixels.
    pixels: RgbaImage,
    /// Committed pixels plus the shape being dragged, if any.
    preview: Option<RgbaImage>,
    tool: ToolKind,
    stroke_width: i32,
    pen_color: Color,
    pressure_enabled: bool,
    eraser_scale: f64,
    history: History,
    session: Option<StrokeSession>,
}

impl Canvas {
    /// Blank canvas filled with `background`, using default settings.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self> {
        Self::with_settings(width, height, background, &EngineSettings::default())
    }

    /// Canvas with the application's default size and background.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        Self::with_settings(
            settings.default_width,
            settings.default_height,
            settings.default_background,
            settings,
        )
    }

    pub fn with_settings(
        width: i32,
        height: i32,
        background: Color,
        settings: &EngineSettings,
    ) -> Result<Self> {
        let (w, h) = settings.check_dimensions(width, height)?;
        let pixels = filled_buffer(w, h, background)?;
        log::debug!("new {width}x{height} canvas, background {background}");
        Ok(Self::adopt(pixels, background, settings))
    }

    /// Adopt decoded pixels verbatim. `background` becomes the eraser and
    /// clear color but existing pixels are not repainted.
    pub fn from_image(pixels: RgbaImage, background: Color) -> Result<Self> {
        Self::from_image_with_settings(pixels, background, &EngineSettings::default())
    }

    pub fn from_image_with_settings(
        pixels: RgbaImage,
        background: Color,
        settings: &EngineSettings,
    ) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(CanvasError::InvalidDimension {
                width: pixels.width() as i64,
                height: pixels.height() as i64,
            });
        }
        Ok(Self::adopt(pixels, background, settings))
    }

    /// Decode an encoded image file held in memory. An explicit
    /// `background_hint` wins over metadata embedded in the file.
    pub fn from_encoded(bytes: &[u8], background_hint: Option<Color>) -> Result<Self> {
        let loaded = persist::decode(bytes)?;
        Self::from_loaded(loaded, background_hint, &EngineSettings::default())
    }

    /// Load an image file. The background comes from the file's metadata,
    /// else the default dark background.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_settings(path, &EngineSettings::default())
    }

    pub fn load_with_settings(path: impl AsRef<Path>, settings: &EngineSettings) -> Result<Self> {
        let loaded = persist::read(path.as_ref())?;
        Self::from_loaded(loaded, None, settings)
    }

    fn from_loaded(
        loaded: LoadedImage,
        hint: Option<Color>,
        settings: &EngineSettings,
    ) -> Result<Self> {
        let background = match hint.or(loaded.background) {
            Some(bg) => bg,
            None => {
                log::warn!("no background metadata, assuming {DEFAULT_BACKGROUND}");
                DEFAULT_BACKGROUND
            }
        };
        Self::from_image_with_settings(loaded.pixels, background, settings)
    }

    fn adopt(pixels: RgbaImage, background: Color, settings: &EngineSettings) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            background,
            pixels,
            preview: None,
            tool: ToolKind::Pen,
            stroke_width: clamp_stroke_width(settings.default_stroke_width),
            pen_color: settings.default_pen_color,
            pressure_enabled: settings.pressure_enabled,
            eraser_scale: settings.eraser_scale,
            history: History::new(settings.history_depth),
            session: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// The committed buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// What the host should paint: the shape preview while one is being
    /// dragged, otherwise the committed buffer.
    pub fn display(&self) -> &RgbaImage {
        self.preview.as_ref().unwrap_or(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn stroke_width(&self) -> i32 {
        self.stroke_width
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn pressure_enabled(&self) -> bool {
        self.pressure_enabled
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ─── Tool configuration ──────────────────────────────────────────────

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Select a tool by name (`"pen"`, `"eraser"`, `"rectangle"`, ...).
    pub fn set_tool_by_name(&mut self, name: &str) -> Result<()> {
        self.tool = name.parse()?;
        Ok(())
    }

    /// Set the stroke width, clamped to `[1, 50]`.
    pub fn set_stroke_width(&mut self, width: i32) {
        self.stroke_width = clamp_stroke_width(width);
    }

    /// Step the stroke width (wheel scrolling), clamped to `[1, 50]`.
    pub fn nudge_stroke_width(&mut self, delta: i32) -> i32 {
        self.set_stroke_width(self.stroke_width.saturating_add(delta));
        self.stroke_width
    }

    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
    }

    /// Ask the host for a color. A cancelled pick leaves the pen unchanged.
    pub fn request_pen_color(&mut self, picker: &mut impl ColorPicker) -> bool {
        match picker.pick_color(self.pen_color) {
            Some(color) => {
                self.pen_color = color;
                true
            }
            None => false,
        }
    }

    pub fn set_pressure_enabled(&mut self, enabled: bool) {
        self.pressure_enabled = enabled;
    }

    // ─── Stroke lifecycle ────────────────────────────────────────────────

    /// Pointer down. Snapshots the buffer for undo and opens a session.
    pub fn begin_stroke(&mut self, at: impl Into<Point>) {
        let at = at.into();
        self.history.record(self.pixels.clone());
        self.preview = None;
        let session = StrokeSession::begin(self.tool, self.stroke_width, self.pen_color, at);
        self.session = Some(session);
        log::debug!("begin {} stroke at ({}, {})", self.tool, at.x, at.y);
    }

    /// Pointer move. Ignored unless a stroke is in progress.
    pub fn continue_stroke(&mut self, to: impl Into<Point>, pressure: Option<f32>) {
        let to = to.into();
        let Some(session) = self.session.as_mut() else {
            log::trace!("move without press ignored");
            return;
        };

        match session.tool {
            ToolKind::Pen | ToolKind::Eraser => {
                let width = pressure_width(session.width, pressure, self.pressure_enabled);
                let (color, width) = if session.tool == ToolKind::Eraser {
                    let scaled = (width as f64 * self.eraser_scale).round();
                    (self.background, scaled)
                } else {
                    (session.color, width as f64)
                };
                raster::stroke_segment(&mut self.pixels, session.last, to, width, color);
                session.last = to;
            }
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Line => {
                session.last = to;
                let mut preview = self.pixels.clone();
                draw_shape(&mut preview, session, to);
                self.preview = Some(preview);
            }
        }
    }

    /// Pointer up. Commits a pending shape and returns to idle.
    pub fn end_stroke(&mut self, at: impl Into<Point>) {
        let at = at.into();
        let Some(session) = self.session.take() else {
            log::trace!("release without press ignored");
            return;
        };
        if session.tool.is_shape() {
            draw_shape(&mut self.pixels, &session, at);
        }
        self.preview = None;
        log::debug!("end {} stroke at ({}, {})", session.tool, at.x, at.y);
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Restore the previous snapshot. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.is_drawing() {
            log::debug!("undo ignored during a stroke");
            return false;
        }
        let changed = self.history.undo(&mut self.pixels);
        if changed {
            log::debug!("undo ({} left)", self.history.undo_len());
        }
        changed
    }

    /// Re-apply the last undone edit. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.is_drawing() {
            log::debug!("redo ignored during a stroke");
            return false;
        }
        let changed = self.history.redo(&mut self.pixels);
        if changed {
            log::debug!("redo ({} left)", self.history.redo_len());
        }
        changed
    }

    /// Fill with the background color as a single undoable edit.
    pub fn clear(&mut self) {
        if self.is_drawing() {
            log::debug!("clear ignored during a stroke");
            return;
        }
        self.history.record(self.pixels.clone());
        raster::fill(&mut self.pixels, self.background);
        log::debug!("cleared canvas to {}", self.background);
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Write the committed buffer. The format comes from `format`, else the
    /// file extension.
    pub fn save(&self, path: impl AsRef<Path>, format: Option<ImageFormat>) -> Result<()> {
        persist::write(path.as_ref(), &self.pixels, self.background, format)
    }

    /// Encode the committed buffer as PNG bytes with background metadata.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        persist::encode_png(&self.pixels, self.background)
    }
}

/// Allocate a filled buffer, reporting allocation failure instead of
/// aborting.
fn filled_buffer(width: u32, height: u32, color: Color) -> Result<RgbaImage> {
    let invalid = || CanvasError::InvalidDimension {
        width: width.into(),
        height: height.into(),
    };
    let len = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(invalid)?;
    let mut raw = Vec::new();
    raw.try_reserve_exact(len).map_err(|_| invalid())?;
    raw.extend(std::iter::repeat_n(color.to_rgba().0, len / 4).flatten());
    RgbaImage::from_raw(width, height, raw).ok_or_else(invalid)
}

/// Rasterize the session's shape spanning its anchor and `current`.
/// Shapes use the nominal width; pressure does not apply.
fn draw_shape(target: &mut RgbaImage, session: &StrokeSession, current: Point) {
    let Some(anchor) = session.anchor else {
        return;
    };
    let width = session.width as f64;
    match session.tool {
        ToolKind::Rectangle => {
            if let Some(bounds) = session.shape_bounds(current) {
                raster::stroke_rect(target, bounds, width, session.color);
            }
        }
        ToolKind::Ellipse => {
            if let Some(bounds) = session.shape_bounds(current) {
                raster::stroke_ellipse(target, bounds, width, session.color);
            }
        }
        ToolKind::Line => raster::stroke_line(target, anchor, current, width, session.color),
        ToolKind::Pen | ToolKind::Eraser => {}
    }
}
