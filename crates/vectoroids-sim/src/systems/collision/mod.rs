//! Collision detection and response.
//!
//! Both detection passes are swept (continuous) rather than purely
//! positional: bullets can travel several asteroid radii per tick, so
//! hits are tested along the displacement segment recorded by the
//! movement system, not just at the endpoint positions.

pub mod asteroids;
pub mod bullets;
pub mod ship;

use glam::DVec2;

use vectoroids_core::constants::GEOM_EPSILON;

/// Closest point to `center` on the segment `a → b`.
///
/// A degenerate (zero-length) segment yields `a`, reducing the swept
/// test to a positional one rather than dividing by zero.
pub(crate) fn closest_point_on_segment(a: DVec2, b: DVec2, center: DVec2) -> DVec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < GEOM_EPSILON {
        return a;
    }
    let t = ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Parameter `t ∈ [0, 1]` minimizing the distance between two points
/// moving along their displacement segments, given the relative position
/// at `t = 0` and the relative displacement. `None` when the relative
/// displacement is degenerate (no relative motion this tick).
pub(crate) fn closest_approach_t(rel_pos: DVec2, rel_disp: DVec2) -> Option<f64> {
    let len_sq = rel_disp.length_squared();
    if len_sq < GEOM_EPSILON {
        return None;
    }
    Some((-rel_pos.dot(rel_disp) / len_sq).clamp(0.0, 1.0))
}
