//! Snapshot system: queries the ECS world and builds a complete
//! `GameStateSnapshot`. Read-only over the world.

use hecs::World;

use vectoroids_core::components::*;
use vectoroids_core::enums::GamePhase;
use vectoroids_core::events::TelemetryEvent;
use vectoroids_core::state::*;
use vectoroids_core::types::SimTime;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    score: u32,
    lives: u32,
    level: u32,
    insert_coin_visible: bool,
    telemetry: Vec<TelemetryEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        ship: build_ship(world),
        bullets: build_bullets(world),
        asteroids: build_asteroids(world),
        fragments: build_fragments(world),
        hud: HudView {
            score,
            lives,
            level,
            insert_coin_visible,
        },
        telemetry,
    }
}

fn build_ship(world: &World) -> Option<ShipView> {
    world
        .query::<(&ShipMarker, &Position, &Heading, &Shield)>()
        .iter()
        .next()
        .map(|(_, (_, pos, heading, shield))| ShipView {
            position: *pos,
            rotation: heading.angle,
            shield_active: shield.active(),
            shield_visible: shield.active() && shield.visible,
        })
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<BulletView> = world
        .query::<(&Bullet, &Position, &Velocity, &RenderId)>()
        .iter()
        .map(|(_, (_, pos, vel, render_id))| BulletView {
            render_id: render_id.0,
            position: *pos,
            rotation: vel.angle(),
        })
        .collect();
    bullets.sort_by_key(|b| b.render_id);
    bullets
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    let mut asteroids: Vec<AsteroidView> = world
        .query::<(&Asteroid, &Position, &Spin, &Shape, &RenderId)>()
        .iter()
        .map(|(_, (asteroid, pos, spin, shape, render_id))| AsteroidView {
            render_id: render_id.0,
            position: *pos,
            rotation: spin.angle,
            size: asteroid.size,
            category: asteroid.category,
            shape: shape.points.clone(),
        })
        .collect();
    asteroids.sort_by_key(|a| a.render_id);
    asteroids
}

fn build_fragments(world: &World) -> Vec<FragmentView> {
    let mut fragments: Vec<FragmentView> = world
        .query::<(&Fragment, &Position, &Spin, &RenderId)>()
        .iter()
        .map(|(_, (fragment, pos, spin, render_id))| FragmentView {
            render_id: render_id.0,
            position: *pos,
            rotation: spin.angle,
            length: fragment.length,
        })
        .collect();
    fragments.sort_by_key(|f| f.render_id);
    fragments
}
