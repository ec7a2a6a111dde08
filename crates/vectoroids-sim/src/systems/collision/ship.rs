//! Ship–asteroid collision check.
//!
//! Positional (the ship moves well under its own radius per tick).
//! Suppressed entirely while the shield is active; while the ship is
//! dead there is no ship entity, so the query finds nothing.

use hecs::World;

use vectoroids_core::components::{Asteroid, Shield, ShipMarker};
use vectoroids_core::constants::SHIP_RADIUS;
use vectoroids_core::types::Position;

/// Returns true when an unshielded ship overlaps any asteroid this tick.
pub fn run(world: &World) -> bool {
    let ship = world
        .query::<(&ShipMarker, &Position, &Shield)>()
        .iter()
        .next()
        .map(|(_, (_, pos, shield))| (*pos, shield.active()));

    let Some((ship_pos, shielded)) = ship else {
        return false;
    };
    if shielded {
        return false;
    }

    world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .any(|(_, (asteroid, pos))| {
            pos.distance_to(&ship_pos) < asteroid.hit_radius() + SHIP_RADIUS
        })
}
