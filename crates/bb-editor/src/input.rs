//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into a unified `InputEvent`
//! and routes pointer events to the canvas stroke calls.

use crate::canvas::Canvas;
use bb_core::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved. Pressure is 0.0 .. 1.0 for styluses and `None` for
    /// devices that do not report it.
    PointerMove {
        x: f64,
        y: f64,
        pressure: Option<f32>,
    },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Mouse wheel, in notches (positive = away from the user).
    Wheel { notches: i32, ctrl: bool },

    /// Keyboard press, resolved separately through the shortcut map.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn moved(x: f64, y: f64, pressure: Option<f32>) -> Self {
        Self::PointerMove { x, y, pressure }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Apply a pointer or wheel event to the canvas.
///
/// Returns `true` if the event was consumed. Key events are left to the
/// shortcut map; ctrl+wheel is reserved for zoom and not handled here.
pub fn dispatch(canvas: &mut Canvas, event: &InputEvent) -> bool {
    match event {
        InputEvent::PointerDown { x, y } => {
            canvas.begin_stroke((*x, *y));
            true
        }
        InputEvent::PointerMove { x, y, pressure } => {
            canvas.continue_stroke((*x, *y), *pressure);
            true
        }
        InputEvent::PointerUp { x, y } => {
            canvas.end_stroke((*x, *y));
            true
        }
        InputEvent::Wheel {
            notches,
            ctrl: false,
        } => {
            let width = canvas.nudge_stroke_width(*notches);
            log::trace!("wheel {notches:+} → stroke width {width}");
            true
        }
        InputEvent::Wheel { ctrl: true, .. } | InputEvent::Key { .. } => false,
    }
}
