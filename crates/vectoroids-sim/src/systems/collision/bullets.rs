//! Swept bullet–asteroid collision, scoring, and splitting.
//!
//! Hits collect into removal sets during iteration and apply strictly
//! afterwards, so simultaneous hits in one tick can never double-count
//! a bullet or an asteroid. Split children enter the world at the end
//! of the pass; they move and wrap this tick but are not collision-
//! eligible until the next one.

use std::collections::HashSet;

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use vectoroids_core::components::{Asteroid, Bullet, PrevPosition};
use vectoroids_core::constants::{GEOM_EPSILON, SPLIT_PERP_SPEED};
use vectoroids_core::enums::SizeCategory;
use vectoroids_core::events::TelemetryEvent;
use vectoroids_core::types::{Position, Velocity};

use crate::spawner;

use super::closest_point_on_segment;

struct AsteroidBody {
    entity: Entity,
    center: DVec2,
    hit_radius: f64,
    velocity: Velocity,
    category: SizeCategory,
}

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_render_id: &mut u32,
    current_tick: u64,
    score: &mut u32,
    telemetry: &mut Vec<TelemetryEvent>,
) {
    let asteroids: Vec<AsteroidBody> = world
        .query::<(&Asteroid, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (asteroid, pos, vel))| AsteroidBody {
            entity,
            center: pos.dvec(),
            hit_radius: asteroid.hit_radius(),
            velocity: *vel,
            category: asteroid.category,
        })
        .collect();

    let mut bullets_to_remove: HashSet<Entity> = HashSet::new();
    let mut asteroids_to_remove: HashSet<Entity> = HashSet::new();
    // (size, position, velocity) for children born from splits this pass.
    let mut children: Vec<(f64, Position, Velocity)> = Vec::new();

    for (bullet_entity, (_bullet, prev, pos)) in
        world.query::<(&Bullet, &PrevPosition, &Position)>().iter()
    {
        let segment_start = prev.0.dvec();
        let segment_end = pos.dvec();

        for body in &asteroids {
            if asteroids_to_remove.contains(&body.entity) {
                continue;
            }

            let closest = closest_point_on_segment(segment_start, segment_end, body.center);
            if closest.distance(body.center) >= body.hit_radius {
                continue;
            }

            bullets_to_remove.insert(bullet_entity);
            asteroids_to_remove.insert(body.entity);
            *score += body.category.points();

            match body.category.child_size() {
                Some(child_size) => {
                    let position = Position::from_dvec(body.center);
                    let (child_a, child_b) = split_velocities(body.velocity);
                    children.push((child_size, position, child_a));
                    children.push((child_size, position, child_b));
                    telemetry.push(TelemetryEvent::AsteroidHit {
                        category: body.category,
                        points: body.category.points(),
                        split: true,
                    });
                }
                None => {
                    telemetry.push(TelemetryEvent::AsteroidHit {
                        category: body.category,
                        points: body.category.points(),
                        split: false,
                    });
                }
            }

            // One hit consumes the bullet.
            break;
        }
    }

    // Apply removals in a stable order; hash-set iteration order would
    // otherwise leak into entity-id reuse and break determinism.
    let mut to_despawn: Vec<Entity> = bullets_to_remove
        .iter()
        .chain(asteroids_to_remove.iter())
        .copied()
        .collect();
    to_despawn.sort_unstable_by_key(|entity| entity.to_bits());
    for entity in to_despawn {
        let _ = world.despawn(entity);
    }

    for (size, position, velocity) in children {
        spawner::spawn_asteroid_with_velocity(
            world,
            rng,
            next_render_id,
            size,
            position,
            velocity,
            current_tick,
        );
    }
}

/// Child velocities: parent velocity ± a fixed perpendicular offset.
/// A stationary parent falls back to a vertical split axis.
fn split_velocities(parent: Velocity) -> (Velocity, Velocity) {
    let v = parent.dvec();
    let perp = if v.length_squared() < GEOM_EPSILON {
        DVec2::Y
    } else {
        v.perp().normalize()
    };
    let offset = perp * SPLIT_PERP_SPEED;
    (
        Velocity::from_dvec(v + offset),
        Velocity::from_dvec(v - offset),
    )
}
