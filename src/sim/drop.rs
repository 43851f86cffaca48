// drop.rs - One deposit of ink
//
// A closed polygon approximating a circle. The point count is fixed at
// creation; operators may move points but never add, remove or reorder them.

use crate::color::Color;
use crate::geom::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct InkDrop {
    // Creation parameters, kept for reference only (not tracked after deformation)
    center: Point,
    radius: f32,
    color: Color,

    boundary: Vec<Point>,
}

impl InkDrop {
    /// Regular `vertex_count`-gon inscribed in the circle, vertex 0 at angle 0.
    pub fn new(center: Point, radius: f32, color: Color, vertex_count: usize) -> Self {
        let step = std::f32::consts::TAU / vertex_count.max(1) as f32;
        let boundary = (0..vertex_count)
            .map(|i| {
                let (sin, cos) = (i as f32 * step).sin_cos();
                center + Point::new(cos, sin) * radius
            })
            .collect();

        Self { center, radius, color, boundary }
    }

    pub fn center(&self) -> Point { self.center }
    pub fn radius(&self) -> f32 { self.radius }
    pub fn color(&self) -> Color { self.color }
    pub fn boundary(&self) -> &[Point] { &self.boundary }

    /// Mutable view of the points. A slice, so the length cannot change.
    pub(crate) fn boundary_mut(&mut self) -> &mut [Point] {
        &mut self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_polygon() {
        let c = Point::new(400.0, 300.0);
        let drop = InkDrop::new(c, 40.0, Color::BLACK, 300);

        assert_eq!(drop.boundary().len(), 300);
        assert!((drop.boundary()[0] - Point::new(440.0, 300.0)).length() < 1e-4);
        // Quarter turn lands straight below the center (y down)
        assert!((drop.boundary()[75] - Point::new(400.0, 340.0)).length() < 1e-3);

        for v in drop.boundary() {
            assert!(((*v - c).length() - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_creation_params_retained() {
        let drop = InkDrop::new(Point::new(1.0, 2.0), 3.0, Color::rgb(9, 8, 7), 12);
        assert_eq!(drop.center(), Point::new(1.0, 2.0));
        assert_eq!(drop.radius(), 3.0);
        assert_eq!(drop.color(), Color::rgb(9, 8, 7));
    }

    #[test]
    fn test_zero_vertices_is_empty() {
        let drop = InkDrop::new(Point::ZERO, 10.0, Color::BLACK, 0);
        assert!(drop.boundary().is_empty());
    }
}
