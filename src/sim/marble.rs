// marble.rs - Radial displacement of a new drop landing on the basin
//
// Every existing point moves away from the impact along its ray:
//   v' = c + (v - c) * sqrt(1 + r^2 / |v - c|^2)
// Area is conserved: the ring of radius r appears at the center and the
// rest of the basin is pushed outward, strongly nearby and barely far away.

use super::Basin;
use crate::geom::Point;

/// Push every point in the basin away from `center` as a drop of `radius` lands.
pub fn marble(basin: &mut Basin, center: Point, radius: f32) {
    let r2 = radius * radius;
    if !r2.is_finite() || r2 <= 0.0 {
        log::debug!("marble: skipping radius {radius}");
        return;
    }

    for v in basin.vertices_mut() {
        *v = marble_point(*v, center, r2);
    }
}

/// Displaced position of a single point. Degenerate cases return `v` untouched.
#[inline(always)]
pub fn marble_point(v: Point, center: Point, r2: f32) -> Point {
    let delta = v - center;
    let d2 = delta.length_squared();
    if !d2.is_finite() || d2 <= 0.0 {
        return v;
    }

    let m = (1.0 + r2 / d2).sqrt();
    if m == 1.0 {
        return v;
    }

    let out = center + delta * m;
    if out.is_finite() { out } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::PhysicsConfig;

    fn basin_with(center: Point, radius: f32) -> Basin {
        let mut basin = Basin::new(PhysicsConfig::default());
        basin.push_undeformed(center, radius, Color::BLACK);
        basin
    }

    #[test]
    fn test_zero_radius_is_bit_identical() {
        let mut basin = basin_with(Point::new(123.456, 78.9), 33.3);
        let before = basin.clone();
        marble(&mut basin, Point::new(0.1, 0.7), 0.0);
        assert_eq!(basin, before);
    }

    #[test]
    fn test_point_at_center_unchanged() {
        let c = Point::new(400.0, 300.0);
        assert_eq!(marble_point(c, c, 1600.0), c);
    }

    #[test]
    fn test_far_field_vanishes() {
        let c = Point::new(0.0, 0.0);
        let near = marble_point(Point::new(50.0, 0.0), c, 100.0);
        let far = marble_point(Point::new(5000.0, 0.0), c, 100.0);
        let very_far = marble_point(Point::new(5.0e6, 0.0), c, 100.0);

        let shift = |before: f32, after: Point| after.x - before;
        assert!(shift(50.0, near) > shift(5000.0, far));
        assert!(shift(5000.0, far) < 0.02);
        assert_eq!(very_far, Point::new(5.0e6, 0.0));
    }

    #[test]
    fn test_area_ring_identity() {
        // |v'|^2 = |v|^2 + r^2 for the displaced point
        let c = Point::new(10.0, -4.0);
        let v = Point::new(13.0, 0.0);
        let out = marble_point(v, c, 49.0);
        let expected = (v - c).length_squared() + 49.0;
        assert!(((out - c).length_squared() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_center_keeps_points() {
        let mut basin = basin_with(Point::new(100.0, 100.0), 10.0);
        let before = basin.clone();
        marble(&mut basin, Point::new(f32::NAN, 0.0), 20.0);
        assert_eq!(basin, before);
    }
}
