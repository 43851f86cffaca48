// comb.rs - Multi-tine rake pulled through the basin
//
// A row of parallel tines, `spacing` apart, perpendicular to the stroke and
// centred on its start point. Each tine acts like a narrow stylus line;
// pushes from every tine add up on the same point within one call.

use serde::{Deserialize, Serialize};

use super::Basin;
use crate::geom::{Point, falloff, line_distance, stroke_vector};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombTuning {
    /// Tines on each side of the centre one: offsets run -half_span..=half_span.
    pub half_span: u32,
    pub spacing: f32,
    /// Perpendicular reach of a single tine.
    pub influence: f32,
    pub force: f32,
    pub min_length: f32,
}

impl Default for CombTuning {
    fn default() -> Self {
        Self { half_span: 10, spacing: 35.0, influence: 20.0, force: 12.0, min_length: 1.0 }
    }
}

impl CombTuning {
    pub fn tine_count(&self) -> usize {
        2 * self.half_span as usize + 1
    }
}

/// Rake the basin from `from` to `to` with tines `spacing` apart.
pub fn comb_stroke(basin: &mut Basin, from: Point, to: Point, spacing: f32, force: f32) {
    let tuning = basin.physics().comb;
    let Some((d, len)) = stroke_vector(from, to, tuning.min_length) else {
        log::debug!("comb: degenerate stroke {from} -> {to}");
        return;
    };
    let push = d / len * force;
    let anchors = tine_anchors(from, d.perp() / len, spacing, tuning.half_span);

    for v in basin.vertices_mut() {
        *v = comb_point(*v, &anchors, d, len, push, tuning.influence);
    }
}

/// Tine anchor points across the stroke, in offset order.
pub fn tine_anchors(from: Point, across: Point, spacing: f32, half_span: u32) -> Vec<Point> {
    let half = half_span as i32;
    (-half..=half)
        .map(|i| from + across * (i as f32 * spacing))
        .collect()
}

#[inline]
fn comb_point(v: Point, anchors: &[Point], d: Point, len: f32, push: Point, influence: f32) -> Point {
    let mut p = v;
    for &anchor in anchors {
        let dist = line_distance(p, anchor, d, len);
        if dist < influence {
            p += push * falloff(dist, influence);
        }
    }
    if p.is_finite() { p } else { v }
}
