//! Held-input application: thrust, aim, brake, and rate-limited fire.

use glam::DVec2;
use hecs::World;

use vectoroids_core::commands::HeldDirections;
use vectoroids_core::components::{Heading, Position, ShipMarker, Velocity};
use vectoroids_core::constants::*;

use crate::spawner;

/// Input state held by the engine between commands. Commands mutate
/// this; the input system applies it to the ship each tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub held: HeldDirections,
    /// World-space facing angle requested by the pointer (radians).
    pub aim_angle: f64,
    /// Slow-stop toggle; auto-clears once the ship has stopped.
    pub brake_on: bool,
    /// Edge-triggered fire request, consumed once per tick.
    pub fire_requested: bool,
}

pub fn run(
    world: &mut World,
    input: &mut InputState,
    fire_cooldown: &mut u32,
    next_render_id: &mut u32,
) {
    if *fire_cooldown > 0 {
        *fire_cooldown -= 1;
    }

    let mut fire_pose = None;
    for (_entity, (_ship, pos, vel, heading)) in
        world.query_mut::<(&ShipMarker, &Position, &mut Velocity, &mut Heading)>()
    {
        heading.angle = input.aim_angle;

        let forward = DVec2::new(heading.angle.cos(), heading.angle.sin());
        let left = forward.perp();
        let dv = SHIP_ACCELERATION * DT;

        let mut v = vel.dvec();
        if input.held.forward {
            v += forward * dv;
        }
        if input.held.back {
            v -= forward * dv;
        }
        if input.held.strafe_left {
            v += left * dv;
        }
        if input.held.strafe_right {
            v -= left * dv;
        }

        if input.brake_on {
            let speed = v.length();
            if speed > 0.0 {
                v *= (speed - BRAKE_DECELERATION * DT).max(0.0) / speed;
            }
            if v.length() < BRAKE_STOP_SPEED {
                v = DVec2::ZERO;
                input.brake_on = false;
            }
        }

        *vel = Velocity::from_dvec(v);

        if input.fire_requested && *fire_cooldown == 0 {
            fire_pose = Some((*pos, heading.angle, *vel));
        }
    }
    input.fire_requested = false;

    if let Some((position, heading, ship_velocity)) = fire_pose {
        spawner::spawn_bullet(world, next_render_id, position, heading, ship_velocity);
        *fire_cooldown = FIRE_COOLDOWN_TICKS;
        log::debug!("bullet fired at heading {heading:.3}");
    }
}
