//! Bounding-box collision between entities
//!
//! Every entity tracks its top-left corner, so two boxes overlap when each
//! one starts before the other ends on both axes.

use glam::Vec2;

use super::entity::Movable;

/// Axis-aligned overlap test for two boxes given by top-left corner and size
///
/// Touching edges do not count as a hit.
#[inline]
pub fn boxes_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

/// Check whether two entities' boxes overlap
pub fn is_collided_with<A, B>(a: &A, b: &B) -> bool
where
    A: Movable + ?Sized,
    B: Movable + ?Sized,
{
    boxes_overlap(a.pos(), a.size(), b.pos(), b.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Asteroid, Astronaut};
    use proptest::prelude::*;

    fn astronaut_at(x: f32, y: f32) -> Astronaut {
        Astronaut::new(1, Vec2::new(x, y), 40.0)
    }

    fn asteroid_at(x: f32, y: f32) -> Asteroid {
        Asteroid::new(2, Vec2::new(x, y), 40.0, "#fff")
    }

    #[test]
    fn test_overlap_within_box() {
        let astronaut = astronaut_at(100.0, 100.0);
        assert!(is_collided_with(&astronaut, &asteroid_at(139.0, 139.0)));
        assert!(is_collided_with(&astronaut, &asteroid_at(61.0, 61.0)));
        assert!(is_collided_with(&astronaut, &asteroid_at(100.0, 100.0)));
    }

    #[test]
    fn test_touching_edges_miss() {
        let astronaut = astronaut_at(100.0, 100.0);
        assert!(!is_collided_with(&astronaut, &asteroid_at(140.0, 100.0)));
        assert!(!is_collided_with(&astronaut, &asteroid_at(100.0, 60.0)));
        assert!(!is_collided_with(&astronaut, &asteroid_at(300.0, 300.0)));
    }

    #[test]
    fn test_self_collision() {
        let astronaut = astronaut_at(12.5, -7.0);
        assert!(is_collided_with(&astronaut, &astronaut));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0,
            by in -1000.0f32..1000.0,
        ) {
            let a = astronaut_at(ax, ay);
            let b = asteroid_at(bx, by);
            prop_assert_eq!(is_collided_with(&a, &b), is_collided_with(&b, &a));
        }

        #[test]
        fn prop_matches_distance_rule(
            ax in -1000.0f32..1000.0,
            ay in -1000.0f32..1000.0,
            dx in -80.0f32..80.0,
            dy in -80.0f32..80.0,
        ) {
            let a = astronaut_at(ax, ay);
            let b = asteroid_at(ax + dx, ay + dy);
            // Stay clear of the exact edge where float rounding decides
            prop_assume!(((b.pos.x - a.pos.x).abs() - 40.0).abs() > 0.01);
            prop_assume!(((b.pos.y - a.pos.y).abs() - 40.0).abs() > 0.01);
            let expected = (b.pos.x - a.pos.x).abs() < 40.0 && (b.pos.y - a.pos.y).abs() < 40.0;
            prop_assert_eq!(is_collided_with(&a, &b), expected);
        }
    }
}
