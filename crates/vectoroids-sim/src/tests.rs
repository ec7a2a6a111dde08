//! Tests for the simulation engine: collision, scoring, splitting,
//! lifecycle, level progression, pause semantics, and determinism.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vectoroids_core::commands::PlayerCommand;
use vectoroids_core::components::{Asteroid, ShipMarker};
use vectoroids_core::config::SimConfig;
use vectoroids_core::constants::*;
use vectoroids_core::enums::{GamePhase, RespawnPolicy, ShipPhase, SizeCategory};
use vectoroids_core::events::TelemetryEvent;
use vectoroids_core::types::{Position, Velocity, WorldBounds};

use crate::engine::GameEngine;
use crate::spawner;

fn engine() -> GameEngine {
    GameEngine::new(SimConfig::default()).unwrap()
}

fn engine_with(config: SimConfig) -> GameEngine {
    GameEngine::new(config).unwrap()
}

/// Start a game directly so the test can seed a controlled field before
/// the first tick (a non-empty field suppresses the level-1 spawn).
fn started_engine() -> GameEngine {
    let mut engine = engine();
    engine.start_game_now();
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = engine_with(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = engine_with(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Spawning and levels ----

#[test]
fn test_start_game_spawns_level_one() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(DT);

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(engine.level(), 1);
    assert_eq!(engine.asteroid_count(), 2, "level 1 spawns 1 + level asteroids");
    assert!(snap.ship.is_some());
    assert!(snap.ship.unwrap().shield_active);
    assert_eq!(snap.hud.lives, STARTING_LIVES);
    assert_eq!(snap.hud.score, 0);
}

/// Spawning N level asteroids and simulating zero ticks yields exactly
/// N asteroids, each with the category its size maps to.
#[test]
fn test_level_spawn_round_trip() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut next_id = 0u32;
    let bounds = WorldBounds::default();

    let count = spawner::spawn_level_asteroids(
        &mut world,
        &mut rng,
        &mut next_id,
        4,
        &bounds,
        Position::default(),
        0,
    );
    assert_eq!(count, 5);

    let mut seen = 0;
    for (_entity, (asteroid, pos)) in world.query::<(&Asteroid, &Position)>().iter() {
        seen += 1;
        assert_eq!(asteroid.category, SizeCategory::from_size(asteroid.size));
        assert!(asteroid.size >= LEVEL_SIZE_MIN && asteroid.size < LEVEL_SIZE_MAX);
        assert!(bounds.contains(pos));
        assert!(
            pos.distance_to(&Position::default()) > LEVEL_SAFE_RADIUS,
            "spawn at {pos:?} violates the ship safety radius"
        );
    }
    assert_eq!(seen, 5);
}

// ---- Swept bullet collision ----

/// A bullet crossing a tiny asteroid in one tick registers a hit even
/// though neither endpoint of its displacement is inside the hit radius.
/// A positional-only check fails this case by construction.
#[test]
fn test_swept_collision_beats_positional_check() {
    let mut engine = started_engine();
    let center = Position::new(30.0, 0.0);
    let asteroid = engine.spawn_test_asteroid(1.0, center, Velocity::default());
    // Tiny hit radius is 2; the bullet covers 5 units per tick.
    assert_eq!(SizeCategory::Tiny.hit_radius(), 2.0);

    let start = Position::new(27.5, 0.0);
    let bullet = engine.spawn_test_bullet(start, Velocity::new(300.0, 0.0));

    // Both segment endpoints sit outside the hit radius.
    let travel = 300.0 * DT;
    let end = Position::new(start.x + travel, 0.0);
    assert!(start.distance_to(&center) > 2.0);
    assert!(end.distance_to(&center) > 2.0);

    engine.tick(DT);

    assert!(!engine.world().contains(asteroid), "swept check must hit");
    assert!(!engine.world().contains(bullet), "bullet is consumed");
    assert_eq!(engine.score(), SizeCategory::Tiny.points());
}

// ---- Scoring and splitting ----

#[test]
fn test_split_produces_two_children_net_plus_one() {
    let mut engine = started_engine();
    let parent_vel = Velocity::new(10.0, 0.0);
    engine.spawn_test_asteroid(5.0, Position::new(50.0, 0.0), parent_vel);
    engine.spawn_test_bullet(Position::new(44.0, 0.0), Velocity::new(300.0, 0.0));
    assert_eq!(engine.asteroid_count(), 1);

    let snap = engine.tick(DT);

    assert_eq!(engine.score(), SizeCategory::Medium.points());
    assert_eq!(engine.asteroid_count(), 2, "parent replaced by two children");
    assert_eq!(snap.asteroids.len(), 2);

    for (_entity, (asteroid, vel)) in engine.world().query::<(&Asteroid, &Velocity)>().iter()
    {
        assert_eq!(asteroid.category, SizeCategory::Small);
        assert_eq!(asteroid.size, SizeCategory::Medium.child_size().unwrap());
        // Children carry the parent velocity plus opposite perpendicular
        // offsets; the parent moved along +X, so the offsets are in Y.
        assert!((vel.x - parent_vel.x).abs() < 1e-9);
        assert!((vel.y.abs() - SPLIT_PERP_SPEED).abs() < 1e-9);
    }

    let hits: Vec<_> = snap
        .telemetry
        .iter()
        .filter(|e| matches!(e, TelemetryEvent::AsteroidHit { split: true, .. }))
        .collect();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_tiny_destruction_net_minus_one() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(1.0, Position::new(50.0, 0.0), Velocity::default());
    engine.spawn_test_asteroid(1.0, Position::new(-50.0, 30.0), Velocity::default());
    engine.spawn_test_bullet(Position::new(46.0, 0.0), Velocity::new(300.0, 0.0));

    engine.tick(DT);

    assert_eq!(engine.asteroid_count(), 1, "tiny asteroid leaves no children");
    assert_eq!(engine.score(), SizeCategory::Tiny.points());
}

/// Score increases by exactly the summed point values of the asteroids
/// destroyed in a tick, and never decreases.
#[test]
fn test_score_monotonic_and_exact() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(1.0, Position::new(40.0, 20.0), Velocity::default());
    engine.spawn_test_asteroid(5.0, Position::new(-40.0, -20.0), Velocity::default());
    engine.spawn_test_bullet(Position::new(36.0, 20.0), Velocity::new(300.0, 0.0));
    engine.spawn_test_bullet(Position::new(-44.0, -20.0), Velocity::new(300.0, 0.0));

    let mut last_score = 0;
    let snap = engine.tick(DT);
    assert_eq!(
        snap.hud.score,
        SizeCategory::Tiny.points() + SizeCategory::Medium.points()
    );
    for _ in 0..30 {
        let snap = engine.tick(DT);
        assert!(snap.hud.score >= last_score, "score must never decrease");
        last_score = snap.hud.score;
    }
}

// ---- Ship lifecycle ----

#[test]
fn test_shield_blocks_life_loss() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());

    let snap = engine.tick(DT);

    assert_eq!(engine.lives(), STARTING_LIVES);
    assert_eq!(engine.ship_phase(), ShipPhase::Alive);
    assert!(snap.ship.is_some());
}

#[test]
fn test_unshielded_hit_kills_exactly_once() {
    let mut engine = started_engine();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());

    let snap = engine.tick(DT);

    assert_eq!(engine.lives(), STARTING_LIVES - 1);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);
    assert!(snap.ship.is_none());
    assert_eq!(snap.fragments.len(), FRAGMENT_COUNT, "debris burst on death");
    assert_eq!(engine.pending_deadline_count(), 1);

    // Dead ship cannot be hit again.
    engine.tick(DT);
    assert_eq!(engine.lives(), STARTING_LIVES - 1);
}

#[test]
fn test_respawn_after_delay_with_fresh_shield() {
    let mut engine = started_engine();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(0.0);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);

    // Not yet due.
    let snap = engine.tick(RESPAWN_DELAY_SECS / 2.0);
    assert!(snap.ship.is_none());

    let snap = engine.tick(RESPAWN_DELAY_SECS / 2.0 + 0.1);
    let ship = snap.ship.expect("ship respawns after the delay");
    assert_eq!(engine.ship_phase(), ShipPhase::Alive);
    assert_eq!(ship.position, Position::default());
    assert!(ship.shield_active, "respawn grants a fresh shield");

    let velocity = engine
        .world()
        .query::<(&ShipMarker, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, vel))| *vel)
        .unwrap();
    assert_eq!(velocity, Velocity::default());
}

#[test]
fn test_game_over_at_zero_lives() {
    let mut engine = started_engine();
    engine.set_lives(1);
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());

    let snap = engine.tick(DT);

    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(engine.lives(), 0);
    assert_eq!(
        engine.pending_deadline_count(),
        0,
        "no respawn scheduled at game over"
    );
    assert!(snap
        .telemetry
        .iter()
        .any(|e| matches!(e, TelemetryEvent::GameOver { .. })));

    // Simulation no longer advances.
    let tick_before = engine.time().tick;
    engine.tick(1.0);
    assert_eq!(engine.time().tick, tick_before);
}

#[test]
fn test_stale_respawn_deadline_is_noop() {
    let mut engine = started_engine();
    engine.set_lives(1);
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(DT);
    assert_eq!(engine.phase(), GamePhase::GameOver);

    // A deadline that outlived its game must be dropped at fire time.
    engine.push_respawn_deadline(0.0);
    let snap = engine.tick(DT);
    assert!(snap.ship.is_none());
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);
    assert_eq!(engine.pending_deadline_count(), 0);
}

#[test]
fn test_insert_coin_prompt_flashes() {
    let mut engine = started_engine();
    engine.set_lives(1);
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(0.0);
    assert_eq!(engine.phase(), GamePhase::GameOver);

    let first = engine.tick(0.0).hud.insert_coin_visible;
    let second = engine.tick(INSERT_COIN_PERIOD_SECS / 2.0).hud.insert_coin_visible;
    assert_ne!(first, second, "prompt flashes on a fixed duty cycle");
}

// ---- Shield timer ----

#[test]
fn test_shield_expires_after_duration() {
    let mut engine = started_engine();
    // A spectator asteroid keeps the level check quiet, far from the ship.
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());

    let mut expired_events = 0;
    let mut last_active = true;
    for _ in 0..(SHIELD_DURATION_TICKS + 10) {
        let snap = engine.tick(DT);
        let ship = snap.ship.expect("ship stays alive");
        last_active = ship.shield_active;
        expired_events += snap
            .telemetry
            .iter()
            .filter(|e| matches!(e, TelemetryEvent::ShieldExpired))
            .count();
    }
    assert!(!last_active, "shield must expire");
    assert_eq!(expired_events, 1);

    // Once expired it stays inactive until the next respawn.
    let snap = engine.tick(DT);
    assert!(!snap.ship.unwrap().shield_active);
}

#[test]
fn test_shield_flashes_near_expiry() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());

    let mut hidden_ticks = 0;
    for tick in 0..SHIELD_DURATION_TICKS {
        let snap = engine.tick(DT);
        let ship = snap.ship.unwrap();
        if !ship.shield_active {
            break;
        }
        let remaining = SHIELD_DURATION_TICKS - 1 - tick;
        if remaining >= SHIELD_FLASH_WINDOW_TICKS {
            assert!(ship.shield_visible, "steady outside the flash window");
        } else if !ship.shield_visible {
            hidden_ticks += 1;
        }
    }
    assert!(hidden_ticks > 0, "terminal window must blank some ticks");
}

// ---- Level progression ----

#[test]
fn test_level_advances_once_for_simultaneous_clear() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(1.0, Position::new(40.0, 20.0), Velocity::default());
    engine.spawn_test_asteroid(1.0, Position::new(-40.0, -20.0), Velocity::default());
    engine.spawn_test_bullet(Position::new(36.0, 20.0), Velocity::new(300.0, 0.0));
    engine.spawn_test_bullet(Position::new(-44.0, -20.0), Velocity::new(300.0, 0.0));
    assert_eq!(engine.level(), 0);

    let snap = engine.tick(DT);

    assert_eq!(engine.level(), 1, "exactly one advance for a double kill");
    let starts = snap
        .telemetry
        .iter()
        .filter(|e| matches!(e, TelemetryEvent::LevelStarted { .. }))
        .count();
    assert_eq!(starts, 1);
    assert_eq!(engine.asteroid_count(), 2, "fresh field spawns 1 + level");
}

#[test]
fn test_level_held_while_ship_dead() {
    let mut engine = started_engine();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(0.0);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);

    // Empty the field while the ship is down: no advance until respawn.
    engine.despawn_all_asteroids();
    engine.tick(0.0);
    assert_eq!(engine.level(), 0);
    assert_eq!(engine.asteroid_count(), 0);

    engine.tick(RESPAWN_DELAY_SECS + 0.1);
    assert_eq!(engine.ship_phase(), ShipPhase::Alive);
    assert_eq!(engine.level(), 1, "advance resumes once the ship is back");
    assert_eq!(engine.asteroid_count(), 2);
}

// ---- Pause ----

#[test]
fn test_pause_freezes_simulation_exactly() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(8.0, Position::new(40.0, 10.0), Velocity::new(33.0, -12.0));
    for _ in 0..5 {
        engine.tick(DT);
    }

    engine.queue_command(PlayerCommand::Pause);
    let frozen = engine.tick(DT);
    assert_eq!(frozen.phase, GamePhase::Paused);

    for _ in 0..10 {
        let snap = engine.tick(DT);
        assert_eq!(snap.time.tick, frozen.time.tick);
        assert_eq!(snap.hud.score, frozen.hud.score);
        assert_eq!(snap.asteroids.len(), frozen.asteroids.len());
        for (a, b) in snap.asteroids.iter().zip(frozen.asteroids.iter()) {
            assert_eq!(a.position, b.position);
        }
    }

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick(DT);
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, frozen.time.tick + 1);
    assert_ne!(
        resumed.asteroids[0].position, frozen.asteroids[0].position,
        "motion resumes from the exact prior state"
    );
}

/// Reference behavior: the respawn countdown is wall-clock and keeps
/// running while paused, so the ship can come back mid-pause.
#[test]
fn test_respawn_wallclock_policy_counts_through_pause() {
    let mut engine = started_engine();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(0.0);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);

    engine.queue_command(PlayerCommand::Pause);
    engine.tick(RESPAWN_DELAY_SECS / 2.0);
    let snap = engine.tick(RESPAWN_DELAY_SECS / 2.0 + 0.1);

    assert_eq!(snap.phase, GamePhase::Paused);
    assert_eq!(engine.ship_phase(), ShipPhase::Alive);
    assert!(snap.ship.is_some(), "wall-clock respawn fires during pause");
}

#[test]
fn test_respawn_suspend_policy_holds_through_pause() {
    let mut engine = engine_with(SimConfig {
        respawn_policy: RespawnPolicy::SuspendOnPause,
        ..Default::default()
    });
    engine.start_game_now();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    engine.tick(0.0);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);

    engine.queue_command(PlayerCommand::Pause);
    engine.tick(RESPAWN_DELAY_SECS * 2.0);
    engine.tick(RESPAWN_DELAY_SECS * 2.0);
    assert_eq!(
        engine.ship_phase(),
        ShipPhase::Dead,
        "suspended countdown never elapses while paused"
    );

    engine.queue_command(PlayerCommand::Resume);
    engine.tick(RESPAWN_DELAY_SECS + 0.1);
    assert_eq!(engine.ship_phase(), ShipPhase::Alive);
}

// ---- Asteroid pair collision ----

#[test]
fn test_overlapping_asteroids_separate() {
    let mut engine = started_engine();
    let a = engine.spawn_test_asteroid(5.0, Position::new(40.0, 0.0), Velocity::default());
    let b = engine.spawn_test_asteroid(5.0, Position::new(43.0, 0.0), Velocity::default());
    let before = 3.0;

    engine.tick(DT);

    let pos_a = *engine.world().get::<&Position>(a).unwrap();
    let pos_b = *engine.world().get::<&Position>(b).unwrap();
    assert!(
        pos_a.distance_to(&pos_b) > before,
        "overlap correction must push the pair apart"
    );
}

#[test]
fn test_asteroid_speeds_capped_after_impulse() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(30.0, 0.0), Velocity::new(110.0, 0.0));
    engine.spawn_test_asteroid(5.0, Position::new(36.0, 0.0), Velocity::new(-110.0, 0.0));

    for _ in 0..10 {
        engine.tick(DT);
    }

    for (_entity, (_asteroid, vel)) in engine.world().query::<(&Asteroid, &Velocity)>().iter()
    {
        assert!(
            vel.speed() <= ASTEROID_SPEED_CAP + 1e-9,
            "speed {} exceeds cap",
            vel.speed()
        );
    }
}

// ---- Input and firing ----

#[test]
fn test_fire_is_rate_limited() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());

    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick(DT);
    assert_eq!(snap.bullets.len(), 1);

    // A second request inside the cooldown window is ignored.
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick(DT);
    assert_eq!(snap.bullets.len(), 1);

    for _ in 0..FIRE_COOLDOWN_TICKS {
        engine.tick(DT);
    }
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick(DT);
    assert_eq!(snap.bullets.len(), 2);
}

#[test]
fn test_thrust_accelerates_along_aim() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());

    engine.queue_command(PlayerCommand::SetAim { angle: 0.0 });
    engine.queue_command(PlayerCommand::SetHeld {
        forward: true,
        back: false,
        strafe_left: false,
        strafe_right: false,
    });
    for _ in 0..30 {
        engine.tick(DT);
    }

    let snap = engine.tick(DT);
    let ship = snap.ship.unwrap();
    assert!(ship.position.x > 0.0, "ship drifts along +X");
    assert!((ship.position.y).abs() < 1e-6);

    let velocity = engine
        .world()
        .query::<(&ShipMarker, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, vel))| *vel)
        .unwrap();
    assert!(velocity.x > 0.0);
}

#[test]
fn test_brake_stops_ship_and_clears_itself() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());

    engine.queue_command(PlayerCommand::SetHeld {
        forward: true,
        back: false,
        strafe_left: false,
        strafe_right: false,
    });
    for _ in 0..30 {
        engine.tick(DT);
    }
    engine.queue_command(PlayerCommand::SetHeld {
        forward: false,
        back: false,
        strafe_left: false,
        strafe_right: false,
    });
    engine.queue_command(PlayerCommand::ToggleBrake);
    for _ in 0..(TICK_RATE * 3) {
        engine.tick(DT);
    }

    let velocity = engine
        .world()
        .query::<(&ShipMarker, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (_, vel))| *vel)
        .unwrap();
    assert_eq!(velocity, Velocity::default(), "brake decays to a full stop");
}

// ---- Wrapping and expiry ----

#[test]
fn test_asteroid_wraps_around_world_edge() {
    let mut engine = started_engine();
    let bounds = WorldBounds::default();
    let edge = Position::new(bounds.half_width() - 0.1, 0.0);
    let asteroid = engine.spawn_test_asteroid(5.0, edge, Velocity::new(60.0, 0.0));

    engine.tick(DT);

    let pos = *engine.world().get::<&Position>(asteroid).unwrap();
    assert!(pos.x < 0.0, "asteroid re-enters from the opposite edge");
}

#[test]
fn test_bullet_expires_after_lifetime() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::new(60.0, 30.0), Velocity::default());
    engine.spawn_test_bullet(Position::new(-60.0, -30.0), Velocity::default());

    for _ in 0..(BULLET_LIFETIME_TICKS - 1) {
        let snap = engine.tick(DT);
        assert_eq!(snap.bullets.len(), 1);
    }
    let snap = engine.tick(DT);
    assert!(snap.bullets.is_empty(), "bullet despawns when lifetime ends");
}

#[test]
fn test_fragments_expire_individually() {
    let mut engine = started_engine();
    engine.expire_shield();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());
    let snap = engine.tick(DT);
    assert_eq!(snap.fragments.len(), FRAGMENT_COUNT);

    let mut last = FRAGMENT_COUNT;
    let mut shrank_gradually = false;
    for _ in 0..(FRAGMENT_MAX_LIFETIME_TICKS + 1) {
        let snap = engine.tick(DT);
        assert!(snap.fragments.len() <= last);
        if snap.fragments.len() < last && !snap.fragments.is_empty() {
            shrank_gradually = true;
        }
        last = snap.fragments.len();
    }
    assert_eq!(last, 0, "all fragments expire");
    assert!(shrank_gradually, "lifetimes are independent, not shared");
}

// ---- Snapshot integrity ----

#[test]
fn test_snapshot_render_ids_unique_and_shapes_bounded() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick(DT);

    let mut ids: Vec<u32> = snap
        .asteroids
        .iter()
        .map(|a| a.render_id)
        .chain(snap.bullets.iter().map(|b| b.render_id))
        .chain(snap.fragments.iter().map(|f| f.render_id))
        .collect();
    ids.sort_unstable();
    let len = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), len, "render ids must be unique");

    for asteroid in &snap.asteroids {
        assert!(asteroid.shape.len() >= ASTEROID_MIN_SIDES);
        assert!(asteroid.shape.len() <= ASTEROID_MAX_SIDES);
    }
}

#[test]
fn test_shield_immunity_ends_with_shield() {
    let mut engine = started_engine();
    engine.spawn_test_asteroid(5.0, Position::default(), Velocity::default());

    // Survive the entire shield window while overlapping an asteroid.
    for _ in 0..SHIELD_DURATION_TICKS {
        engine.tick(DT);
        if engine.ship_phase() == ShipPhase::Dead {
            break;
        }
    }
    // The first unshielded tick kills.
    engine.tick(DT);
    assert_eq!(engine.ship_phase(), ShipPhase::Dead);
    assert_eq!(engine.lives(), STARTING_LIVES - 1);
}
