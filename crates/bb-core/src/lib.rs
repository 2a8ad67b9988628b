pub mod color;
pub mod config;
pub mod error;
pub mod palette;
pub mod persist;
pub mod raster;

pub use color::Color;
pub use config::{BackgroundMode, EngineSettings, NewCanvasConfig};
pub use error::{CanvasError, Result};
pub use palette::{PaletteConfig, Swatch};

// Re-export the geometry and raster types that appear in public signatures
// so downstream crates stay on the same versions.
pub use image::{ImageFormat, RgbaImage};
pub use kurbo::{Point, Rect};
