//! Overlap and visibility queries
//!
//! Both queries work on axis-aligned rectangles only. Line of sight is a
//! ray-march: the segment is sampled every `SIGHT_STEP` units and a small
//! probe is tested against each obstacle. This is an approximation of exact
//! segment/rectangle intersection; a wall thinner than the step can slip
//! between samples.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::*;

/// Strict axis-aligned overlap test (touching edges do not overlap)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Check whether `rect` overlaps any of `obstacles`
pub fn overlaps_any(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|o| rects_overlap(rect, o))
}

/// Sampled line-of-sight test from `start` to `end`
///
/// Takes `floor(distance / SIGHT_STEP)` samples starting at `start` itself
/// (the end point is never sampled). Returns false on the first sample whose
/// probe overlaps an obstacle.
pub fn has_line_of_sight(start: Vec2, end: Vec2, obstacles: &[Rect]) -> bool {
    let steps = (start.distance(end) / SIGHT_STEP).floor() as u32;
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        let sample = start + (end - start) * t;
        let probe = Rect::from_top_left(sample.x, sample.y, SIGHT_PROBE_SIZE, SIGHT_PROBE_SIZE);
        if overlaps_any(&probe, obstacles) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_top_left(x, y, w, h)
    }

    #[test]
    fn test_overlap_basic() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Rect::square(Vec2::new(8.0, 8.0), 10.0);
        let c = Rect::square(Vec2::new(30.0, 0.0), 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(!rects_overlap(&a, &c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = wall(0.0, 0.0, 10.0, 10.0);
        let b = wall(10.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &b));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = wall(0.0, 0.0, 100.0, 100.0);
        let inner = wall(40.0, 40.0, 5.0, 5.0);
        assert!(rects_overlap(&outer, &inner));
        assert!(rects_overlap(&inner, &outer));
    }

    #[test]
    fn test_sight_clear_without_obstacles() {
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::new(500.0, 300.0), &[]));
    }

    #[test]
    fn test_sight_zero_length() {
        let p = Vec2::new(50.0, 50.0);
        // Even from inside a wall: no samples are taken
        assert!(has_line_of_sight(p, p, &[wall(0.0, 0.0, 100.0, 100.0)]));
    }

    #[test]
    fn test_sight_blocked_by_wall_between() {
        let walls = [wall(200.0, 0.0, 20.0, 600.0)];
        assert!(!has_line_of_sight(
            Vec2::new(100.0, 300.0),
            Vec2::new(400.0, 300.0),
            &walls
        ));
    }

    #[test]
    fn test_sight_passes_beside_wall() {
        let walls = [wall(200.0, 0.0, 20.0, 200.0)];
        assert!(has_line_of_sight(
            Vec2::new(100.0, 300.0),
            Vec2::new(400.0, 300.0),
            &walls
        ));
    }

    #[test]
    fn test_sight_fully_inside_obstacle() {
        let walls = [wall(0.0, 0.0, 800.0, 600.0)];
        assert!(!has_line_of_sight(
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 400.0),
            &walls
        ));
    }

    #[test]
    fn test_sight_gap_between_samples() {
        // A 1-unit sliver sitting between two 5-unit samples is missed
        let walls = [wall(103.5, 0.0, 0.4, 600.0)];
        assert!(has_line_of_sight(
            Vec2::new(0.0, 300.0),
            Vec2::new(200.0, 300.0),
            &walls
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overlap_is_symmetric(
                ax in -500.0f32..500.0, ay in -500.0f32..500.0,
                bx in -500.0f32..500.0, by in -500.0f32..500.0,
                aw in 1.0f32..300.0, ah in 1.0f32..300.0,
                bw in 1.0f32..300.0, bh in 1.0f32..300.0,
            ) {
                let a = wall(ax, ay, aw, ah);
                let b = wall(bx, by, bw, bh);
                prop_assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
            }

            #[test]
            fn sight_without_obstacles_is_always_clear(
                sx in 0.0f32..800.0, sy in 0.0f32..600.0,
                ex in 0.0f32..800.0, ey in 0.0f32..600.0,
            ) {
                prop_assert!(has_line_of_sight(Vec2::new(sx, sy), Vec2::new(ex, ey), &[]));
            }

            #[test]
            fn sight_inside_covering_obstacle_is_blocked(
                sx in 10.0f32..790.0, sy in 10.0f32..590.0,
                ex in 10.0f32..790.0, ey in 10.0f32..590.0,
            ) {
                let start = Vec2::new(sx, sy);
                let end = Vec2::new(ex, ey);
                prop_assume!(start.distance(end) >= SIGHT_STEP);
                let cover = [wall(0.0, 0.0, 800.0, 600.0)];
                prop_assert!(!has_line_of_sight(start, end, &cover));
            }
        }
    }
}
