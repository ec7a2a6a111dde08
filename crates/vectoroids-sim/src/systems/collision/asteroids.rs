//! Pairwise asteroid–asteroid collision response.
//!
//! Full O(n²) reconciliation over unordered pairs each tick — fine at
//! the expected entity counts (tens). A pair already overlapping at tick
//! start resolves with overlap restitution and positional separation;
//! otherwise a swept closest-approach test over the two displacement
//! segments catches fast crossings, snapping both bodies to the contact
//! configuration before the impulse. The two restitution values are
//! intentionally distinct; tune them as a pair.

use glam::DVec2;
use hecs::{Entity, World};

use vectoroids_core::components::{Asteroid, PrevPosition};
use vectoroids_core::constants::{
    ASTEROID_SPEED_CAP, GEOM_EPSILON, RESTITUTION_OVERLAP, RESTITUTION_SWEPT,
};
use vectoroids_core::types::{Position, Velocity};

use super::closest_approach_t;

struct Body {
    entity: Entity,
    prev: DVec2,
    pos: DVec2,
    vel: DVec2,
    radius: f64,
    mass: f64,
}

pub fn run(world: &mut World, current_tick: u64) {
    let mut bodies: Vec<Body> = world
        .query::<(&Asteroid, &PrevPosition, &Position, &Velocity)>()
        .iter()
        // Fresh split children are not collision-eligible on their
        // birth tick.
        .filter(|(_, (asteroid, ..))| asteroid.born_tick != current_tick)
        .map(|(entity, (asteroid, prev, pos, vel))| Body {
            entity,
            prev: prev.0.dvec(),
            pos: pos.dvec(),
            vel: vel.dvec(),
            radius: asteroid.hit_radius(),
            mass: asteroid.mass(),
        })
        .collect();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            resolve_pair(&mut head[i], &mut tail[0]);
        }
    }

    for body in &bodies {
        if let Ok((pos, vel)) = world.query_one_mut::<(&mut Position, &mut Velocity)>(body.entity)
        {
            *pos = Position::from_dvec(body.pos);
            *vel = Velocity::from_dvec(body.vel);
        }
    }
}

fn resolve_pair(a: &mut Body, b: &mut Body) {
    let radius_sum = a.radius + b.radius;

    // Already interpenetrating at the start of the tick: impulse plus
    // positional correction, half the overlap each.
    if a.prev.distance(b.prev) < radius_sum {
        apply_impulse(a, b, RESTITUTION_OVERLAP);
        separate(a, b, radius_sum);
        return;
    }

    // Swept closest approach between the two displacement segments.
    let disp_a = a.pos - a.prev;
    let disp_b = b.pos - b.prev;
    let rel_pos = b.prev - a.prev;
    let rel_disp = disp_b - disp_a;

    let t = match closest_approach_t(rel_pos, rel_disp) {
        Some(t) => t,
        // No relative motion this tick; the endpoint configuration is
        // as close as they get.
        None => {
            if a.pos.distance(b.pos) < radius_sum {
                apply_impulse(a, b, RESTITUTION_SWEPT);
            }
            return;
        }
    };

    let contact_a = a.prev + disp_a * t;
    let contact_b = b.prev + disp_b * t;
    if contact_a.distance(contact_b) < radius_sum {
        a.pos = contact_a;
        b.pos = contact_b;
        apply_impulse(a, b, RESTITUTION_SWEPT);
    }
}

/// Equal-and-opposite impulse along the separating normal, scaled by
/// inverse mass. Skipped when the pair is already separating. Speeds are
/// capped afterwards to stop chained collisions from running away.
fn apply_impulse(a: &mut Body, b: &mut Body, restitution: f64) {
    let delta = b.pos - a.pos;
    let normal = if delta.length_squared() < GEOM_EPSILON {
        DVec2::X
    } else {
        delta.normalize()
    };

    let closing_speed = (b.vel - a.vel).dot(normal);
    if closing_speed >= 0.0 {
        return;
    }

    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let impulse = -(1.0 + restitution) * closing_speed / (inv_a + inv_b);

    a.vel -= normal * (impulse * inv_a);
    b.vel += normal * (impulse * inv_b);

    a.vel = cap_speed(a.vel);
    b.vel = cap_speed(b.vel);
}

fn separate(a: &mut Body, b: &mut Body, radius_sum: f64) {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let normal = if distance * distance < GEOM_EPSILON {
        DVec2::X
    } else {
        delta / distance
    };
    let overlap = radius_sum - distance;
    if overlap > 0.0 {
        a.pos -= normal * (overlap / 2.0);
        b.pos += normal * (overlap / 2.0);
    }
}

fn cap_speed(vel: DVec2) -> DVec2 {
    let speed = vel.length();
    if speed > ASTEROID_SPEED_CAP {
        vel * (ASTEROID_SPEED_CAP / speed)
    } else {
        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(prev: (f64, f64), pos: (f64, f64), vel: (f64, f64), radius: f64, mass: f64) -> Body {
        Body {
            entity: Entity::DANGLING,
            prev: DVec2::new(prev.0, prev.1),
            pos: DVec2::new(pos.0, pos.1),
            vel: DVec2::new(vel.0, vel.1),
            radius,
            mass,
        }
    }

    #[test]
    fn test_overlap_branch_separates() {
        let mut a = body((0.0, 0.0), (0.0, 0.0), (0.0, 0.0), 4.0, 4.0);
        let mut b = body((5.0, 0.0), (5.0, 0.0), (0.0, 0.0), 4.0, 4.0);
        resolve_pair(&mut a, &mut b);
        // Overlap of 3 units resolved half each way.
        assert!((a.pos.x - -1.5).abs() < 1e-10);
        assert!((b.pos.x - 6.5).abs() < 1e-10);
    }

    #[test]
    fn test_impulse_reverses_closing_velocity() {
        let mut a = body((0.0, 0.0), (0.0, 0.0), (10.0, 0.0), 4.0, 4.0);
        let mut b = body((7.0, 0.0), (7.0, 0.0), (-10.0, 0.0), 4.0, 4.0);
        resolve_pair(&mut a, &mut b);
        // Equal masses head-on: velocities swap direction, scaled by
        // the overlap restitution.
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
        assert!((a.vel.x + RESTITUTION_OVERLAP * 10.0).abs() < 1e-9);
        assert!((b.vel.x - RESTITUTION_OVERLAP * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_separating_pair_untouched_by_impulse() {
        let mut a = body((0.0, 0.0), (0.0, 0.0), (-5.0, 0.0), 4.0, 4.0);
        let mut b = body((6.0, 0.0), (6.0, 0.0), (5.0, 0.0), 4.0, 4.0);
        resolve_pair(&mut a, &mut b);
        assert_eq!(a.vel, DVec2::new(-5.0, 0.0));
        assert_eq!(b.vel, DVec2::new(5.0, 0.0));
    }

    #[test]
    fn test_swept_crossing_detected() {
        // Fast head-on crossing: endpoints never overlap, the paths do.
        let mut a = body((-20.0, 0.0), (20.0, 0.0), (2400.0, 0.0), 2.0, 1.0);
        let mut b = body((20.0, 0.0), (-20.0, 0.0), (-2400.0, 0.0), 2.0, 1.0);
        resolve_pair(&mut a, &mut b);
        // Snapped near the midpoint and bounced apart, capped.
        assert!(a.pos.x.abs() < 3.0 && b.pos.x.abs() < 3.0);
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
        assert!(a.vel.length() <= ASTEROID_SPEED_CAP + 1e-9);
        assert!(b.vel.length() <= ASTEROID_SPEED_CAP + 1e-9);
    }

    #[test]
    fn test_speed_cap() {
        let capped = cap_speed(DVec2::new(500.0, 0.0));
        assert!((capped.length() - ASTEROID_SPEED_CAP).abs() < 1e-9);
        let free = cap_speed(DVec2::new(50.0, 0.0));
        assert_eq!(free, DVec2::new(50.0, 0.0));
    }
}
