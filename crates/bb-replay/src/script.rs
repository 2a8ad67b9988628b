//! Drawing scripts: a JSON list of steps replayed through the shell.
//!
//! ```json
//! {
//!   "canvas": { "width": 320, "height": 200, "background_mode": "light" },
//!   "steps": [
//!     { "tool": "rectangle" },
//!     { "color": "#c62828" },
//!     { "stroke": { "points": [[20, 20], [120, 90]] } },
//!     "undo",
//!     { "key": { "key": "z", "ctrl": true, "shift": true } }
//!   ]
//! }
//! ```

use bb_core::{Color, EngineSettings, NewCanvasConfig, PaletteConfig, Result};
use bb_editor::{InputEvent, Outcome, Shell, ToolKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub settings: EngineSettings,
    #[serde(default)]
    pub palette: PaletteConfig,
    /// Starting canvas; the settings' default canvas when absent.
    pub canvas: Option<NewCanvasConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Tool(ToolKind),
    Color(Color),
    Width(i32),
    Pressure(bool),
    /// Pick a palette swatch by 0-based slot.
    Swatch(usize),
    Stroke {
        points: Vec<(f64, f64)>,
        /// Per-move pressure, aligned with `points[1..]`.
        #[serde(default)]
        pressure: Vec<f32>,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    Wheel(i32),
    Undo,
    Redo,
    Clear,
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Scripts have no color dialog; custom picks are cancelled.
fn no_picker(_: Color) -> Option<Color> {
    None
}

/// Build a shell and run every step against it.
pub fn replay(script: &Script) -> Result<Shell> {
    let mut shell = Shell::new(script.settings.clone(), script.palette.clone())?;
    if let Some(config) = &script.canvas {
        shell.new_canvas(config)?;
    }

    let mut picker: fn(Color) -> Option<Color> = no_picker;
    for (i, step) in script.steps.iter().enumerate() {
        log::debug!("step {i}: {step:?}");
        apply(&mut shell, step, &mut picker);
    }
    Ok(shell)
}

fn apply(shell: &mut Shell, step: &Step, picker: &mut fn(Color) -> Option<Color>) {
    match step {
        Step::Tool(tool) => shell.canvas_mut().set_tool(*tool),
        Step::Color(color) => shell.canvas_mut().set_pen_color(*color),
        Step::Width(width) => shell.canvas_mut().set_stroke_width(*width),
        Step::Pressure(enabled) => shell.canvas_mut().set_pressure_enabled(*enabled),
        Step::Swatch(slot) => {
            if !shell.select_swatch(*slot, picker) {
                log::warn!("swatch {slot} not applied");
            }
        }
        Step::Stroke { points, pressure } => {
            let Some((&(x, y), rest)) = points.split_first() else {
                log::warn!("empty stroke skipped");
                return;
            };
            shell.handle_input(&InputEvent::down(x, y), picker);
            for (i, &(x, y)) in rest.iter().enumerate() {
                let p = pressure.get(i).copied();
                shell.handle_input(&InputEvent::moved(x, y, p), picker);
            }
            let &(x, y) = points.last().unwrap_or(&(x, y));
            shell.handle_input(&InputEvent::up(x, y), picker);
        }
        Step::Key { key, ctrl, shift } => {
            let event = InputEvent::Key {
                key: key.clone(),
                ctrl: *ctrl,
                shift: *shift,
                alt: false,
                meta: false,
            };
            if let Outcome::NeedsHost(action) = shell.handle_input(&event, picker) {
                log::warn!("{action:?} needs an interactive host, skipped");
            }
        }
        Step::Wheel(notches) => {
            let event = InputEvent::Wheel {
                notches: *notches,
                ctrl: false,
            };
            shell.handle_input(&event, picker);
        }
        Step::Undo => {
            shell.canvas_mut().undo();
        }
        Step::Redo => {
            shell.canvas_mut().redo();
        }
        Step::Clear => shell.canvas_mut().clear(),
    }
}
