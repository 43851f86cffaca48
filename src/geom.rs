// geom.rs - 2D point helpers
//
// Canvas space: x in 0..width, y in 0..height, y down.
// Points are plain glam vectors; this module only adds the few
// line queries the stroke operators share.

pub use glam::Vec2 as Point;

/// Unsigned distance from `p` to the infinite line through `origin` with
/// direction `dir`, where `len` is `dir.length()` (callers already have it).
#[inline(always)]
pub fn line_distance(p: Point, origin: Point, dir: Point, len: f32) -> f32 {
    (p - origin).perp_dot(dir).abs() / len
}

/// Quadratic falloff: 1 on the line, 0 at `influence` and beyond.
#[inline(always)]
pub fn falloff(dist: f32, influence: f32) -> f32 {
    if dist >= influence {
        return 0.0;
    }
    let t = 1.0 - dist / influence;
    t * t
}

/// Stroke vector and its length, or None for degenerate strokes.
#[inline]
pub fn stroke_vector(from: Point, to: Point, min_length: f32) -> Option<(Point, f32)> {
    let d = to - from;
    let len = d.length();
    if !len.is_finite() || len < min_length {
        return None;
    }
    Some((d, len))
}
