// tine.rs - Single stylus line drawn through the basin
//
// Points near the infinite line through the stroke are dragged along the
// stroke direction with quadratic falloff: full force on the line, none at
// the influence radius.

use serde::{Deserialize, Serialize};

use super::Basin;
use crate::geom::{Point, falloff, line_distance, stroke_vector};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TineTuning {
    /// Perpendicular reach of the stylus.
    pub influence: f32,
    /// Push applied by interactive drags.
    pub force: f32,
    /// Shorter strokes are ignored.
    pub min_length: f32,
}

impl Default for TineTuning {
    fn default() -> Self {
        Self { influence: 50.0, force: 25.0, min_length: 0.5 }
    }
}

/// Drag the ink near the line `from -> to` by `force` along the stroke.
pub fn tine_stroke(basin: &mut Basin, from: Point, to: Point, force: f32) {
    let influence = basin.physics().tine.influence;
    let Some((d, len)) = stroke_vector(from, to, basin.physics().tine.min_length) else {
        log::debug!("tine: degenerate stroke {from} -> {to}");
        return;
    };
    let dir = d / len;

    for v in basin.vertices_mut() {
        *v = tine_point(*v, from, d, len, dir * force, influence);
    }
}

#[inline(always)]
fn tine_point(v: Point, origin: Point, d: Point, len: f32, push: Point, influence: f32) -> Point {
    let dist = line_distance(v, origin, d, len);
    if !(dist < influence) {
        return v;
    }
    let out = v + push * falloff(dist, influence);
    if out.is_finite() { out } else { v }
}
