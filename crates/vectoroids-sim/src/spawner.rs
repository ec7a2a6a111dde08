//! Entity spawn factories.
//!
//! Creates the ship, asteroids, bullets, and explosion fragments with
//! randomized parameters from the declarative recipes in the constants
//! table. Every spawned entity gets a fresh `RenderId` so the
//! presentation layer can track it across snapshots.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use vectoroids_core::components::*;
use vectoroids_core::constants::*;
use vectoroids_core::types::{Position, Velocity, WorldBounds};

fn alloc_render_id(next_render_id: &mut u32) -> RenderId {
    let id = RenderId(*next_render_id);
    *next_render_id += 1;
    id
}

/// Spawn the ship at the origin with zero velocity and a full shield.
pub fn spawn_ship(world: &mut World) -> Entity {
    world.spawn((
        ShipMarker,
        Position::default(),
        Velocity::default(),
        Heading::default(),
        Shield::full(),
    ))
}

/// Spawn an asteroid with a random drift velocity.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_render_id: &mut u32,
    size: f64,
    position: Position,
    born_tick: u64,
) -> Entity {
    let direction: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let speed: f64 = rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
    let velocity = Velocity::new(direction.cos() * speed, direction.sin() * speed);
    spawn_asteroid_with_velocity(world, rng, next_render_id, size, position, velocity, born_tick)
}

/// Spawn an asteroid with an explicit velocity (split children inherit
/// theirs from the parent).
pub fn spawn_asteroid_with_velocity(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_render_id: &mut u32,
    size: f64,
    position: Position,
    velocity: Velocity,
    born_tick: u64,
) -> Entity {
    let spin = Spin {
        angle: rng.gen_range(0.0..std::f64::consts::TAU),
        rate: rng.gen_range(-ASTEROID_SPIN_MAX..ASTEROID_SPIN_MAX),
    };

    world.spawn((
        Asteroid::new(size, born_tick),
        position,
        PrevPosition(position),
        velocity,
        spin,
        random_outline(rng, size),
        alloc_render_id(next_render_id),
    ))
}

/// Spawn the `1 + level` asteroids for a new level at random positions,
/// avoiding the area around the ship. Returns the number spawned.
pub fn spawn_level_asteroids(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_render_id: &mut u32,
    level: u32,
    bounds: &WorldBounds,
    ship_position: Position,
    born_tick: u64,
) -> u32 {
    let count = 1 + level;
    for _ in 0..count {
        let size: f64 = rng.gen_range(LEVEL_SIZE_MIN..LEVEL_SIZE_MAX);
        let position = random_spawn_position(rng, bounds, ship_position);
        spawn_asteroid(world, rng, next_render_id, size, position, born_tick);
    }
    count
}

/// Uniform position in bounds, rejecting spots near the ship. Bounded
/// retries keep this total even on a pathological safety/bounds ratio.
fn random_spawn_position(
    rng: &mut ChaCha8Rng,
    bounds: &WorldBounds,
    ship_position: Position,
) -> Position {
    let mut position = Position::default();
    for _ in 0..16 {
        position = Position::new(
            rng.gen_range(-bounds.half_width()..bounds.half_width()),
            rng.gen_range(-bounds.half_height()..bounds.half_height()),
        );
        if position.distance_to(&ship_position) > LEVEL_SAFE_RADIUS {
            break;
        }
    }
    position
}

/// Spawn a bullet at the ship's nose, inheriting the ship's velocity.
pub fn spawn_bullet(
    world: &mut World,
    next_render_id: &mut u32,
    ship_position: Position,
    heading: f64,
    ship_velocity: Velocity,
) -> Entity {
    let forward = DVec2::new(heading.cos(), heading.sin());
    let velocity = Velocity::from_dvec(forward * BULLET_SPEED + ship_velocity.dvec());

    world.spawn((
        Bullet {
            lifetime_ticks: BULLET_LIFETIME_TICKS,
        },
        ship_position,
        PrevPosition(ship_position),
        velocity,
        alloc_render_id(next_render_id),
    ))
}

/// Spawn the debris burst for a destroyed ship: short line segments with
/// small random outward velocities and independent lifetimes.
pub fn spawn_ship_fragments(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_render_id: &mut u32,
    position: Position,
) {
    for _ in 0..FRAGMENT_COUNT {
        let direction: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed: f64 = rng.gen_range(FRAGMENT_MIN_SPEED..FRAGMENT_MAX_SPEED);
        let lifetime: u32 = rng.gen_range(FRAGMENT_MIN_LIFETIME_TICKS..=FRAGMENT_MAX_LIFETIME_TICKS);

        world.spawn((
            Fragment {
                length: rng.gen_range(FRAGMENT_MIN_LENGTH..FRAGMENT_MAX_LENGTH),
            },
            Lifetime { ticks: lifetime },
            position,
            Velocity::new(direction.cos() * speed, direction.sin() * speed),
            Spin {
                angle: rng.gen_range(0.0..std::f64::consts::TAU),
                rate: rng.gen_range(-FRAGMENT_SPIN_MAX..FRAGMENT_SPIN_MAX),
            },
            alloc_render_id(next_render_id),
        ));
    }
}

/// Random closed outline for rendering: 6–12 sides with ±30% per-vertex
/// radius jitter. Purely cosmetic; collision uses the category radius.
fn random_outline(rng: &mut ChaCha8Rng, size: f64) -> Shape {
    let sides: usize = rng.gen_range(ASTEROID_MIN_SIDES..=ASTEROID_MAX_SIDES);
    let mut points = Vec::with_capacity(sides);
    for i in 0..sides {
        let angle = (i as f64 / sides as f64) * std::f64::consts::TAU;
        let jitter: f64 = rng.gen_range(-0.5..0.5) * ASTEROID_RADIUS_JITTER;
        let radius = size * (1.0 + jitter);
        points.push(Position::new(radius * angle.cos(), radius * angle.sin()));
    }
    Shape { points }
}
