//! Collision detection for convex polygons
//!
//! Separating Axis Theorem: two convex rings are disjoint iff some edge
//! normal of either ring separates their projections. When no such axis
//! exists, the axis with the smallest overlap is the contact normal.

use glam::DVec2;

use super::polygon::Polygon;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the shapes overlap
    pub collided: bool,
    /// Unit contact normal, pointing from the first shape toward the second
    pub axis: DVec2,
    /// Overlap along `axis` (zero when not collided)
    pub depth: f64,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            axis: DVec2::ZERO,
            depth: 0.0,
        }
    }
}

/// Check two convex vertex rings for overlap
pub fn find_collision_points(a: &[DVec2], b: &[DVec2]) -> CollisionInfo {
    if a.len() < 3 || b.len() < 3 {
        return CollisionInfo::miss();
    }

    let mut best_depth = f64::INFINITY;
    let mut best_axis = DVec2::ZERO;

    for ring in [a, b] {
        let n = ring.len();
        for i in 0..n {
            let edge = ring[(i + 1) % n] - ring[i];
            let Some(axis) = DVec2::new(-edge.y, edge.x).try_normalize() else {
                continue; // repeated vertex
            };

            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return CollisionInfo::miss();
            }
            if overlap < best_depth {
                best_depth = overlap;
                best_axis = axis;
            }
        }
    }

    // Orient the normal from a toward b
    if best_axis.dot(mean(b) - mean(a)) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionInfo {
        collided: true,
        axis: best_axis,
        depth: best_depth,
    }
}

/// Check two convex polygons for overlap
pub fn find_collision(a: &Polygon, b: &Polygon) -> CollisionInfo {
    find_collision_points(a.points(), b.points())
}

/// Project a ring onto an axis and return (min, max)
fn project(points: &[DVec2], axis: DVec2) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

fn mean(points: &[DVec2]) -> DVec2 {
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::polygon::{Color, Polygon, ellipse};

    fn unit_square(center: DVec2) -> Polygon {
        let pts = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)]
            .into_iter()
            .map(|(x, y)| center + DVec2::new(x, y))
            .collect();
        Polygon::new(pts, DVec2::ZERO, 0.0, Color::default())
    }

    #[test]
    fn test_overlapping_squares() {
        let a = unit_square(DVec2::ZERO);
        let b = unit_square(DVec2::new(0.5, 0.0));
        let info = find_collision(&a, &b);
        assert!(info.collided);
        assert!((info.depth - 0.5).abs() < 1e-12);
        // Minimum overlap is along x, pointing from a to b
        assert!((info.axis - DVec2::X).length() < 1e-12);
    }

    #[test]
    fn test_separated_squares() {
        let a = unit_square(DVec2::ZERO);
        let b = unit_square(DVec2::new(2.0, 0.0));
        let info = find_collision(&a, &b);
        assert!(!info.collided);
        assert_eq!(info, CollisionInfo::miss());
    }

    #[test]
    fn test_axis_flips_with_argument_order() {
        let a = unit_square(DVec2::ZERO);
        let b = unit_square(DVec2::new(0.0, -0.75));
        let ab = find_collision(&a, &b);
        let ba = find_collision(&b, &a);
        assert!(ab.collided && ba.collided);
        assert!((ab.axis + DVec2::Y).length() < 1e-12);
        assert!((ba.axis - DVec2::Y).length() < 1e-12);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = unit_square(DVec2::ZERO);
        let b = unit_square(DVec2::new(1.0, 0.0));
        assert!(!find_collision(&a, &b).collided);
    }

    #[test]
    fn test_diagonal_gap_found_on_second_ring() {
        // Square's own axes overlap, but the diamond's edge normal separates
        let square = unit_square(DVec2::ZERO);
        let diamond = Polygon::new(
            vec![
                DVec2::new(0.9, 0.4),
                DVec2::new(1.4, 0.9),
                DVec2::new(0.9, 1.4),
                DVec2::new(0.4, 0.9),
            ],
            DVec2::ZERO,
            0.0,
            Color::default(),
        );
        assert!(!find_collision(&square, &diamond).collided);
    }

    #[test]
    fn test_outline_circles() {
        let a = ellipse(DVec2::ZERO, 50.0, 50.0, 20);
        let near = ellipse(DVec2::new(79.0, 0.0), 30.0, 30.0, 20);
        let far = ellipse(DVec2::new(81.0, 0.0), 30.0, 30.0, 20);
        assert!(find_collision_points(&a, &near).collided);
        assert!(!find_collision_points(&a, &far).collided);
    }

    #[test]
    fn test_degenerate_rings_never_collide() {
        let a = [DVec2::ZERO, DVec2::X];
        let b = ellipse(DVec2::ZERO, 1.0, 1.0, 8);
        assert!(!find_collision_points(&a, &b).collided);
    }
}
