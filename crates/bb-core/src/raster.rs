//! Software rasterization onto an RGBA pixel buffer.
//!
//! Integer pointer coordinates address pixel centers: pixel `(px, py)` is
//! covered by a primitive when the point `(px, py)` lies inside it. Every
//! primitive clips to the buffer and writes opaque pixels without blending.
//!
//! ## Coverage rules
//!
//! | Primitive | Covered pixels |
//! |-----------|----------------|
//! | Round segment | center within `width / 2` of the segment |
//! | Rectangle (miter) | inside rect inflated by `width / 2`, not strictly inside rect deflated by `width / 2` |
//! | Ellipse | inside ellipse with radii `r + width / 2`, not strictly inside radii `r - width / 2` |
//! | Square-capped line | within `width / 2` of the segment extended by `width / 2` at both ends |

use crate::color::Color;
use image::RgbaImage;
use kurbo::{Ellipse, Line, ParamCurveNearest, Point, Rect, Vec2};

/// Tolerance for nearest-point queries; segments are straight so this
/// only bounds floating-point noise.
const NEAREST_ACCURACY: f64 = 1e-9;

/// Write one pixel if `(x, y)` is inside the buffer.
#[inline]
pub fn put_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    img.put_pixel(x as u32, y as u32, color.to_rgba());
}

/// Fill the entire buffer.
pub fn fill(img: &mut RgbaImage, color: Color) {
    let px = color.to_rgba();
    for p in img.pixels_mut() {
        *p = px;
    }
}

/// Visit every pixel center inside `bounds` (clipped to the buffer) and
/// paint the ones `covered` accepts.
fn paint_where(img: &mut RgbaImage, bounds: Rect, color: Color, covered: impl Fn(Point) -> bool) {
    let x0 = bounds.x0.floor().max(0.0) as i64;
    let y0 = bounds.y0.floor().max(0.0) as i64;
    let x1 = bounds.x1.ceil().min(img.width() as f64 - 1.0) as i64;
    let y1 = bounds.y1.ceil().min(img.height() as f64 - 1.0) as i64;
    for py in y0..=y1 {
        for px in x0..=x1 {
            if covered(Point::new(px as f64, py as f64)) {
                put_pixel(img, px, py, color);
            }
        }
    }
}

/// Stroke a segment with round caps. A zero-length segment paints a dot.
pub fn stroke_segment(img: &mut RgbaImage, from: Point, to: Point, width: f64, color: Color) {
    let half = width.max(1.0) / 2.0;
    let line = Line::new(from, to);
    let bounds = Rect::from_points(from, to).inflate(half, half);
    log::trace!("SEGMENT {from:?} -> {to:?} w={width}");
    paint_where(img, bounds, color, |p| {
        if from == to {
            return (p - from).hypot2() <= half * half;
        }
        line.nearest(p, NEAREST_ACCURACY).distance_sq <= half * half
    });
}

/// Stroke a straight line with square caps.
pub fn stroke_line(img: &mut RgbaImage, from: Point, to: Point, width: f64, color: Color) {
    let half = width.max(1.0) / 2.0;
    let delta = to - from;
    let len = delta.hypot();
    let bounds = Rect::from_points(from, to).inflate(half, half);
    log::trace!("LINE {from:?} -> {to:?} w={width}");
    if len == 0.0 {
        paint_where(img, bounds, color, |p| {
            (p.x - from.x).abs() <= half && (p.y - from.y).abs() <= half
        });
        return;
    }
    let dir: Vec2 = delta / len;
    paint_where(img, bounds, color, |p| {
        let rel = p - from;
        let along = rel.dot(dir);
        let across = rel.cross(dir).abs();
        along >= -half && along <= len + half && across <= half
    });
}

/// Stroke the outline of an axis-aligned rectangle with mitered corners.
pub fn stroke_rect(img: &mut RgbaImage, rect: Rect, width: f64, color: Color) {
    let half = width.max(1.0) / 2.0;
    let outer = rect.inflate(half, half);
    let inner = rect.inflate(-half, -half);
    log::trace!("RECT {rect:?} w={width}");
    paint_where(img, outer, color, |p| {
        let in_outer = p.x >= outer.x0 && p.x <= outer.x1 && p.y >= outer.y0 && p.y <= outer.y1;
        let in_inner = inner.x0 < inner.x1
            && inner.y0 < inner.y1
            && p.x > inner.x0
            && p.x < inner.x1
            && p.y > inner.y0
            && p.y < inner.y1;
        in_outer && !in_inner
    });
}

/// Stroke the outline of the ellipse inscribed in `rect`.
pub fn stroke_ellipse(img: &mut RgbaImage, rect: Rect, width: f64, color: Color) {
    let half = width.max(1.0) / 2.0;
    let ellipse = Ellipse::from_rect(rect);
    let center = ellipse.center();
    let radii = ellipse.radii();
    let (outer_x, outer_y) = (radii.x + half, radii.y + half);
    let (inner_x, inner_y) = (radii.x - half, radii.y - half);
    log::trace!("ELLIPSE {rect:?} w={width}");
    paint_where(img, rect.inflate(half, half), color, |p| {
        let d = p - center;
        let in_outer = (d.x / outer_x).powi(2) + (d.y / outer_y).powi(2) <= 1.0;
        let in_inner = inner_x > 0.0
            && inner_y > 0.0
            && (d.x / inner_x).powi(2) + (d.y / inner_y).powi(2) < 1.0;
        in_outer && !in_inner
    });
}
