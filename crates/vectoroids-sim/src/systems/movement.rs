//! Kinematic integration and toroidal wrapping.
//!
//! Split into two passes around the bullet-collision/split application:
//! the ship, bullets, and fragments move first (bullets recording their
//! displacement segment for the swept test), and asteroids move after
//! removals and split insertions settle, so children born this tick
//! still move and wrap before being drawn.

use hecs::World;

use vectoroids_core::components::{
    Asteroid, Bullet, Fragment, PrevPosition, ShipMarker, Spin,
};
use vectoroids_core::constants::DT;
use vectoroids_core::types::{Position, Velocity, WorldBounds};

/// Integrate the ship, bullets, and fragments.
pub fn run_primary(world: &mut World, bounds: &WorldBounds) {
    for (_entity, (_ship, pos, vel)) in
        world.query_mut::<(&ShipMarker, &mut Position, &Velocity)>()
    {
        integrate(pos, vel, bounds);
    }

    for (_entity, (_bullet, prev, pos, vel)) in
        world.query_mut::<(&Bullet, &mut PrevPosition, &mut Position, &Velocity)>()
    {
        prev.0 = *pos;
        integrate(pos, vel, bounds);
    }

    for (_entity, (_fragment, pos, vel, spin)) in
        world.query_mut::<(&Fragment, &mut Position, &Velocity, &mut Spin)>()
    {
        integrate(pos, vel, bounds);
        spin.angle += spin.rate * DT;
    }
}

/// Integrate asteroids, recording the displacement segment start for
/// the swept pair test that follows.
pub fn run_asteroids(world: &mut World, bounds: &WorldBounds) {
    for (_entity, (_asteroid, prev, pos, vel, spin)) in world.query_mut::<(
        &Asteroid,
        &mut PrevPosition,
        &mut Position,
        &Velocity,
        &mut Spin,
    )>() {
        prev.0 = *pos;
        integrate(pos, vel, bounds);
        spin.angle += spin.rate * DT;
    }
}

fn integrate(pos: &mut Position, vel: &Velocity, bounds: &WorldBounds) {
    pos.x += vel.x * DT;
    pos.y += vel.y * DT;
    bounds.wrap(pos);
}
