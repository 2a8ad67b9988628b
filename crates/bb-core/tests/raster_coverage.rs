//! Integration tests: pixel coverage of every stroke primitive, and the
//! background tag surviving an encode/decode pass.

use bb_core::persist::{self, BACKGROUND_KEY};
use bb_core::raster::{fill, put_pixel, stroke_ellipse, stroke_line, stroke_rect, stroke_segment};
use bb_core::{CanvasError, Color, ImageFormat, Point, Rect, RgbaImage};
use pretty_assertions::assert_eq;
use std::path::Path;

const BG: Color = Color::rgb(0x1c, 0x1c, 0x1c);
const INK: Color = Color::rgb(0xff, 0xf4, 0x4f);

fn blank(w: u32, h: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    fill(&mut img, BG);
    img
}

fn inked(img: &RgbaImage, x: u32, y: u32) -> bool {
    Color::from(*img.get_pixel(x, y)) == INK
}

fn row(img: &RgbaImage, y: u32) -> Vec<u32> {
    (0..img.width()).filter(|&x| inked(img, x, y)).collect()
}

// ─── Rectangle ──────────────────────────────────────────────────────────

#[test]
fn one_pixel_rect_is_a_single_pixel_ring() {
    let mut img = blank(32, 32);
    stroke_rect(&mut img, Rect::new(10.0, 10.0, 20.0, 20.0), 1.0, INK);
    assert_eq!(row(&img, 15), vec![10, 20]);
    assert_eq!(row(&img, 10), (10..=20).collect::<Vec<_>>());
    assert!(!inked(&img, 15, 15));
}

#[test]
fn wide_rect_has_mitered_corners() {
    let mut img = blank(32, 32);
    stroke_rect(&mut img, Rect::new(10.0, 10.0, 20.0, 20.0), 4.0, INK);
    assert_eq!(row(&img, 15), vec![8, 9, 10, 11, 12, 18, 19, 20, 21, 22]);
    assert!(inked(&img, 8, 8));
    assert!(inked(&img, 22, 22));
    assert!(!inked(&img, 7, 8));
}

#[test]
fn degenerate_rect_still_paints() {
    let mut img = blank(16, 16);
    stroke_rect(&mut img, Rect::new(5.0, 5.0, 5.0, 5.0), 3.0, INK);
    assert!(inked(&img, 5, 5));
    assert!(inked(&img, 4, 6));
}

// ─── Ellipse ────────────────────────────────────────────────────────────

#[test]
fn ellipse_touches_its_bounding_box_midpoints() {
    let mut img = blank(40, 30);
    stroke_ellipse(&mut img, Rect::new(10.0, 10.0, 30.0, 20.0), 1.0, INK);
    for (x, y) in [(10, 15), (30, 15), (20, 10), (20, 20)] {
        assert!(inked(&img, x, y), "({x}, {y})");
    }
    assert!(!inked(&img, 20, 15));
    assert!(!inked(&img, 10, 10));
}

// ─── Lines ──────────────────────────────────────────────────────────────

#[test]
fn line_caps_are_square_and_segment_caps_are_round() {
    let from = Point::new(10.0, 10.0);
    let to = Point::new(20.0, 10.0);

    let mut square = blank(32, 24);
    stroke_line(&mut square, from, to, 4.0, INK);
    assert!(inked(&square, 8, 10));
    assert!(!inked(&square, 7, 10));
    assert!(inked(&square, 22, 12));

    let mut round = blank(32, 24);
    stroke_segment(&mut round, from, to, 4.0, INK);
    assert!(inked(&round, 8, 10));
    assert!(!inked(&round, 22, 12));
}

#[test]
fn primitives_clip_to_the_buffer() {
    let mut img = blank(10, 10);
    let (from, to) = (Point::new(-20.0, 5.0), Point::new(40.0, 5.0));
    stroke_segment(&mut img, from, to, 3.0, INK);
    stroke_ellipse(&mut img, Rect::new(-30.0, -30.0, 60.0, 60.0), 2.0, INK);
    put_pixel(&mut img, -1, 3, INK);
    put_pixel(&mut img, 3, 10, INK);
    assert_eq!(row(&img, 5), (0..10).collect::<Vec<_>>());
    assert!(!inked(&img, 0, 0));
}

// ─── Background tag ─────────────────────────────────────────────────────

#[test]
fn png_carries_background_tag() {
    let img = blank(6, 4);
    let bytes = persist::encode(&img, BG, ImageFormat::Png).unwrap();
    let needle = BACKGROUND_KEY.as_bytes();
    assert!(bytes.windows(needle.len()).any(|w| w == needle));

    let loaded = persist::decode(&bytes).unwrap();
    assert_eq!(loaded.background, Some(BG));
    assert_eq!(loaded.pixels, img);
}

#[test]
fn other_formats_carry_no_background() {
    let img = blank(6, 4);
    let bytes = persist::encode(&img, BG, ImageFormat::Bmp).unwrap();
    let loaded = persist::decode(&bytes).unwrap();
    assert_eq!(loaded.background, None);
    assert_eq!(loaded.pixels, img);
}

#[test]
fn unknown_extension_has_no_format() {
    let path = Path::new("board.nope");
    let err = persist::format_for(path, None).unwrap_err();
    assert!(
        matches!(err, CanvasError::UnsupportedFormat(_)),
        "got {err:?}"
    );
    let hinted = persist::format_for(path, Some(ImageFormat::Png));
    assert_eq!(hinted.unwrap(), ImageFormat::Png);
}
