//! Raster persistence: flat image files plus the background-color tag.
//!
//! PNG files carry the canvas background as a `tEXt` chunk keyed
//! [`BACKGROUND_KEY`]. Every other format is written without metadata and
//! loaders fall back to the caller's default background.

use crate::color::Color;
use crate::error::{CanvasError, Result};
use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Text-chunk keyword holding the background color as `#rrggbb`. Alpha is
/// not stored.
pub const BACKGROUND_KEY: &str = "canvas_color";

/// A decoded image file.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixels: RgbaImage,
    /// Background recovered from metadata, if the file carried one.
    pub background: Option<Color>,
}

/// Pick the output format from an explicit hint or the path's extension.
pub fn format_for(path: &Path, hint: Option<ImageFormat>) -> Result<ImageFormat> {
    match hint {
        Some(format) => Ok(format),
        None => match ImageFormat::from_path(path) {
            Ok(format) => Ok(format),
            Err(_) => Err(CanvasError::UnsupportedFormat(path.display().to_string())),
        },
    }
}

/// Encode pixels as an RGBA PNG tagged with the background color.
pub fn encode_png(pixels: &RgbaImage, background: Color) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, pixels.width(), pixels.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk(BACKGROUND_KEY.to_string(), background.to_rgb_hex())
            .map_err(|e| CanvasError::EncodeError(e.to_string()))?;
        let mut writer = encoder
            .write_header()
            .map_err(|e| CanvasError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(pixels.as_raw())
            .map_err(|e| CanvasError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| CanvasError::EncodeError(e.to_string()))?;
    }
    Ok(buf)
}

/// Encode pixels in any format the image backend can write.
pub fn encode(pixels: &RgbaImage, background: Color, format: ImageFormat) -> Result<Vec<u8>> {
    if format == ImageFormat::Png {
        return encode_png(pixels, background);
    }

    let image = match format {
        // No alpha channel in these encoders.
        ImageFormat::Jpeg | ImageFormat::Pnm => {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(pixels.clone()).to_rgb8())
        }
        _ => DynamicImage::ImageRgba8(pixels.clone()),
    };

    let mut buf = Cursor::new(Vec::new());
    if let Err(e) = image.write_to(&mut buf, format) {
        return Err(match e {
            ImageError::Unsupported(u) => CanvasError::UnsupportedFormat(u.to_string()),
            other => CanvasError::EncodeError(other.to_string()),
        });
    }
    log::debug!("encoded {format:?} without background metadata");
    Ok(buf.into_inner())
}

/// Write `pixels` to `path`. The whole file is encoded in memory first so
/// that only filesystem failures surface as I/O errors.
pub fn write(
    path: &Path,
    pixels: &RgbaImage,
    background: Color,
    hint: Option<ImageFormat>,
) -> Result<()> {
    let format = format_for(path, hint)?;
    let bytes = encode(pixels, background, format)?;
    std::fs::write(path, bytes)
        .map_err(|e| CanvasError::io(path, e))?;
    log::info!(
        "saved {}x{} canvas to {} ({format:?})",
        pixels.width(),
        pixels.height(),
        path.display()
    );
    Ok(())
}

/// Decode an in-memory image file.
pub fn decode(bytes: &[u8]) -> Result<LoadedImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| CanvasError::DecodeError(e.to_string()))?;
    let background = match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => read_png_background(bytes),
        _ => None,
    };
    Ok(LoadedImage {
        pixels: image.to_rgba8(),
        background,
    })
}

/// Read and decode the image file at `path`.
pub fn read(path: &Path) -> Result<LoadedImage> {
    let bytes = std::fs::read(path).map_err(|e| CanvasError::io(path, e))?;
    let loaded = decode(&bytes)?;
    log::info!(
        "loaded {}x{} image from {}",
        loaded.pixels.width(),
        loaded.pixels.height(),
        path.display()
    );
    Ok(loaded)
}

/// Look for the background tag in a PNG's text chunks.
fn read_png_background(bytes: &[u8]) -> Option<Color> {
    let reader = match png::Decoder::new(Cursor::new(bytes)).read_info() {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("could not read PNG metadata: {e}");
            return None;
        }
    };
    let info = reader.info();

    let raw = info
        .uncompressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == BACKGROUND_KEY)
        .map(|chunk| chunk.text.clone())
        .or_else(|| {
            info.utf8_text
                .iter()
                .find(|chunk| chunk.keyword == BACKGROUND_KEY)
                .and_then(|chunk| chunk.get_text().ok())
        })?;

    let color = Color::from_hex(&raw);
    if color.is_none() {
        log::warn!("ignoring malformed {BACKGROUND_KEY} metadata {raw:?}");
    }
    color
}
