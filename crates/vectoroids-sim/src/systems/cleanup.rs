//! Cleanup system: expires bullets and fragments whose lifetimes ran out.
//!
//! Uses a pre-allocated despawn buffer filled during iteration and
//! drained afterwards, so removal never mutates a list mid-iteration.

use hecs::{Entity, World};

use vectoroids_core::components::{Bullet, Lifetime};

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, bullet) in world.query_mut::<&mut Bullet>() {
        bullet.lifetime_ticks = bullet.lifetime_ticks.saturating_sub(1);
        if bullet.lifetime_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.ticks = lifetime.ticks.saturating_sub(1);
        if lifetime.ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
