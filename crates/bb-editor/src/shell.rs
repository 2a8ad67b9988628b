//! The hosting shell: owns the single live canvas and routes commands.
//!
//! New and open build the replacement canvas completely before swapping it
//! into the slot, so a failed load leaves the current canvas untouched. The
//! pen color and stroke width carry over to the replacement; the tool
//! resets to the pen.
//!
//! File-level actions (new/open/save) need paths or dialog input the shell
//! does not own, so [`Shell::perform`] hands them back to the host as
//! [`Outcome::NeedsHost`].

use crate::canvas::{Canvas, ColorPicker};
use crate::input::{self, InputEvent};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::ToolKind;
use bb_core::{EngineSettings, ImageFormat, NewCanvasConfig, PaletteConfig, Result, Swatch};
use std::path::Path;

/// Result of routing an event or action through the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// The host must gather input (a path, a dialog) and call back.
    NeedsHost(ShortcutAction),
    Ignored,
}

pub struct Shell {
    canvas: Canvas,
    settings: EngineSettings,
    palette: PaletteConfig,
}

impl Shell {
    /// Start with a default canvas built from `settings`.
    pub fn new(settings: EngineSettings, palette: PaletteConfig) -> Result<Self> {
        let canvas = Canvas::from_settings(&settings)?;
        Ok(Self {
            canvas,
            settings,
            palette,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Swap in `next`, carrying over pen color and stroke width.
    /// Returns the previous canvas.
    pub fn replace(&mut self, mut next: Canvas) -> Canvas {
        if self.canvas.is_drawing() {
            log::warn!("replacing canvas during an unfinished stroke");
        }
        next.set_tool(ToolKind::Pen);
        next.set_stroke_width(self.canvas.stroke_width());
        next.set_pen_color(self.canvas.pen_color());
        next.set_pressure_enabled(self.canvas.pressure_enabled());
        std::mem::replace(&mut self.canvas, next)
    }

    /// Replace the canvas with a blank one from the configurator's values.
    pub fn new_canvas(&mut self, config: &NewCanvasConfig) -> Result<()> {
        let background = config.background()?;
        let next = Canvas::with_settings(config.width, config.height, background, &self.settings)?;
        self.replace(next);
        log::info!("new {}x{} canvas", config.width, config.height);
        Ok(())
    }

    /// Replace the canvas with the image at `path`.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let next = Canvas::load_with_settings(path, &self.settings)?;
        self.replace(next);
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>, format: Option<ImageFormat>) -> Result<()> {
        self.canvas.save(path, format)
    }

    /// Palette strip for the current background.
    pub fn swatches(&self) -> Vec<Swatch> {
        self.palette.swatches_for(self.canvas.background())
    }

    /// Apply the swatch at `slot`. The slot after the presets is the
    /// custom entry and goes through `picker`.
    pub fn select_swatch(&mut self, slot: usize, picker: &mut impl ColorPicker) -> bool {
        match self.swatches().get(slot).copied() {
            Some(Swatch::Preset(color)) => {
                self.canvas.set_pen_color(color);
                true
            }
            Some(Swatch::Custom) => self.canvas.request_pen_color(picker),
            None => false,
        }
    }

    /// Perform a shortcut action on the live canvas.
    pub fn perform(&mut self, action: ShortcutAction, picker: &mut impl ColorPicker) -> Outcome {
        match action {
            ShortcutAction::NewCanvas | ShortcutAction::Open | ShortcutAction::Save => {
                Outcome::NeedsHost(action)
            }
            ShortcutAction::Undo => {
                self.canvas.undo();
                Outcome::Handled
            }
            ShortcutAction::Redo => {
                self.canvas.redo();
                Outcome::Handled
            }
            ShortcutAction::Clear => {
                self.canvas.clear();
                Outcome::Handled
            }
            ShortcutAction::Tool(tool) => {
                self.canvas.set_tool(tool);
                Outcome::Handled
            }
            ShortcutAction::PaletteSlot(slot) => {
                if self.select_swatch(slot, picker) {
                    Outcome::Handled
                } else {
                    Outcome::Ignored
                }
            }
            ShortcutAction::CustomColor => {
                self.canvas.request_pen_color(picker);
                Outcome::Handled
            }
            ShortcutAction::WidenStroke => {
                self.canvas.nudge_stroke_width(1);
                Outcome::Handled
            }
            ShortcutAction::NarrowStroke => {
                self.canvas.nudge_stroke_width(-1);
                Outcome::Handled
            }
        }
    }

    /// Route any input event: pointer and wheel go to the canvas, keys go
    /// through the shortcut map.
    pub fn handle_input(&mut self, event: &InputEvent, picker: &mut impl ColorPicker) -> Outcome {
        if let InputEvent::Key {
            key,
            ctrl,
            shift,
            alt,
            meta,
        } = event
        {
            return match ShortcutMap::resolve(key, *ctrl, *shift, *alt, *meta) {
                Some(action) => self.perform(action, picker),
                None => Outcome::Ignored,
            };
        }
        if input::dispatch(&mut self.canvas, event) {
            Outcome::Handled
        } else {
            Outcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_core::{BackgroundMode, CanvasError, Color};

    fn no_pick() -> impl FnMut(Color) -> Option<Color> {
        |_| None
    }

    fn shell() -> Shell {
        Shell::new(Default::default(), Default::default()).unwrap()
    }

    fn key(k: &str, ctrl: bool) -> InputEvent {
        InputEvent::Key {
            key: k.to_string(),
            ctrl,
            shift: false,
            alt: false,
            meta: false,
        }
    }

    #[test]
    fn starts_with_default_canvas() {
        let s = shell();
        assert_eq!((s.canvas().width(), s.canvas().height()), (640, 480));
        assert_eq!(s.canvas().background().to_hex(), "#1c1c1c");
    }

    #[test]
    fn new_canvas_carries_pen_and_width() {
        let mut s = shell();
        s.canvas_mut().set_pen_color(Color::rgb(0x77, 0xdd, 0x77));
        s.canvas_mut().set_stroke_width(12);
        s.canvas_mut().set_tool(ToolKind::Ellipse);

        let config = NewCanvasConfig::new(200, 100, BackgroundMode::Light);
        s.new_canvas(&config).unwrap();
        let c = s.canvas();
        assert_eq!((c.width(), c.height()), (200, 100));
        assert_eq!(c.background(), Color::WHITE);
        assert_eq!(c.pen_color(), Color::rgb(0x77, 0xdd, 0x77));
        assert_eq!(c.stroke_width(), 12);
        assert_eq!(c.tool(), ToolKind::Pen);
        assert!(!c.can_undo());
    }

    #[test]
    fn failed_new_canvas_keeps_current() {
        let mut s = shell();
        let config = NewCanvasConfig::new(0, 100, BackgroundMode::Dark);
        let err = s.new_canvas(&config).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidDimension { .. }));
        assert_eq!(s.canvas().width(), 640);
    }

    #[test]
    fn palette_follows_background() {
        let mut s = shell();
        assert_eq!(s.swatches()[0], Swatch::Preset(Color::WHITE));
        let config = NewCanvasConfig::new(10, 10, BackgroundMode::Light);
        s.new_canvas(&config).unwrap();
        assert_eq!(s.swatches()[0], Swatch::Preset(Color::BLACK));
    }

    #[test]
    fn digit_keys_pick_presets() {
        let mut s = shell();
        let mut picker = no_pick();
        let outcome = s.handle_input(&key("2", false), &mut picker);
        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(s.canvas().pen_color(), Color::rgb(0xff, 0xf4, 0x4f));
    }

    #[test]
    fn custom_swatch_uses_picker() {
        let mut s = shell();
        let before = s.canvas().pen_color();
        assert!(!s.select_swatch(8, &mut no_pick()));
        assert_eq!(s.canvas().pen_color(), before);

        let purple = Color::rgb(148, 0, 211);
        assert!(s.select_swatch(8, &mut |_: Color| Some(purple)));
        assert_eq!(s.canvas().pen_color(), purple);
        assert!(!s.select_swatch(9, &mut no_pick()));
    }

    #[test]
    fn file_actions_go_back_to_host() {
        let mut s = shell();
        assert_eq!(
            s.handle_input(&key("s", true), &mut no_pick()),
            Outcome::NeedsHost(ShortcutAction::Save)
        );
        let outcome = s.handle_input(&key("q", false), &mut no_pick());
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn undo_shortcut_reverts_stroke() {
        let mut s = shell();
        let mut picker = no_pick();
        s.handle_input(&InputEvent::down(10.0, 10.0), &mut picker);
        s.handle_input(&InputEvent::moved(50.0, 10.0, None), &mut picker);
        s.handle_input(&InputEvent::up(50.0, 10.0), &mut picker);
        assert_eq!(s.canvas().pixel(30, 10), Some(Color::WHITE));

        s.handle_input(&key("z", true), &mut picker);
        let bg = bb_core::config::DEFAULT_BACKGROUND;
        assert_eq!(s.canvas().pixel(30, 10), Some(bg));
    }
}
