// sim/ - Marbling basin
//
// The basin is an ordered list of ink drops (paint order = insertion order).
// Three operators deform it in place; each runs over every boundary point
// of every drop, so earlier ink always responds to later gestures.

mod comb;
mod drop;
mod marble;
mod tine;

pub use comb::{CombTuning, comb_stroke, tine_anchors};
pub use drop::InkDrop;
pub use marble::{marble, marble_point};
pub use tine::{TineTuning, tine_stroke};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::PhysicsConfig;
use crate::geom::Point;

/// One mutation of the basin, as data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operator {
    /// Marble existing ink away from `center`, then lay a new circle there.
    Drop { center: Point, radius: f32, color: Color },
    Tine { from: Point, to: Point, force: f32 },
    Comb { from: Point, to: Point, spacing: f32, force: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Basin {
    drops: Vec<InkDrop>,
    physics: PhysicsConfig,
}

impl Basin {
    pub fn new(physics: PhysicsConfig) -> Self {
        Self { drops: Vec::new(), physics }
    }

    pub fn physics(&self) -> &PhysicsConfig { &self.physics }
    pub fn drops(&self) -> &[InkDrop] { &self.drops }
    pub fn len(&self) -> usize { self.drops.len() }
    pub fn is_empty(&self) -> bool { self.drops.is_empty() }

    /// Points per drop boundary.
    pub fn vertex_count(&self) -> usize { self.physics.vertex_count }

    pub fn total_vertices(&self) -> usize {
        self.drops.iter().map(|d| d.boundary().len()).sum()
    }

    /// Wipe the basin. The only way drops ever leave it.
    pub fn clear(&mut self) {
        self.drops.clear();
    }

    /// Drop new ink: existing ink is pushed aside first, so the new drop
    /// itself starts as an undeformed circle on top.
    pub fn add_drop(&mut self, center: Point, radius: f32, color: Color) {
        marble(self, center, radius);
        self.push_undeformed(center, radius, color);
    }

    /// Append a circle without displacing anything already in the basin.
    pub fn push_undeformed(&mut self, center: Point, radius: f32, color: Color) {
        let drop = InkDrop::new(center, radius, color, self.physics.vertex_count);
        self.drops.push(drop);
    }

    pub fn apply(&mut self, op: &Operator) {
        match *op {
            Operator::Drop { center, radius, color } => self.add_drop(center, radius, color),
            Operator::Tine { from, to, force } => tine_stroke(self, from, to, force),
            Operator::Comb { from, to, spacing, force } => {
                comb_stroke(self, from, to, spacing, force)
            }
        }
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Point> + '_ {
        self.drops.iter_mut().flat_map(|d| d.boundary_mut().iter_mut())
    }
}
