//! Error type shared by every fallible canvas operation.
//!
//! History underflow and out-of-order pointer events are not errors; they
//! are no-ops handled by the engine.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height was not positive, or the canvas would exceed the
    /// pixel limit.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    /// The payload is not a decodable raster image.
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    /// Reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    IOError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The image backend cannot write the requested format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The encoder rejected the pixel data.
    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("unknown tool: {0:?}")]
    UnknownTool(String),

    /// Malformed settings document.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl CanvasError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IOError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
