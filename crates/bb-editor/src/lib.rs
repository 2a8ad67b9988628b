//! Blackboard canvas engine.
//!
//! [`canvas::Canvas`] owns the pixel buffer, tool state, and bounded
//! history. [`input`] and [`shortcuts`] translate host events into engine
//! calls, and [`shell::Shell`] holds the single live canvas.

pub mod canvas;
pub mod history;
pub mod input;
pub mod shell;
pub mod shortcuts;
pub mod tools;

pub use canvas::{Canvas, ColorPicker};
pub use input::InputEvent;
pub use shell::{Outcome, Shell};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::ToolKind;
