//! Simulation engine — the core of the game.
//!
//! `GameEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless (no Tauri or renderer dependency), enabling
//! deterministic testing.
//!
//! One tick is `tick(wall_dt_secs)`: commands apply at the boundary, the
//! wall clock and deadline scheduler always advance (pause freezes the
//! simulation body, not wall-clock timers), and the system pipeline runs
//! only in the Active phase.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vectoroids_core::commands::{HeldDirections, PlayerCommand};
use vectoroids_core::components::{Asteroid, ShipMarker};
use vectoroids_core::config::{ConfigError, SimConfig};
use vectoroids_core::constants::*;
use vectoroids_core::enums::{GamePhase, RespawnPolicy, ShipPhase};
use vectoroids_core::events::TelemetryEvent;
use vectoroids_core::state::GameStateSnapshot;
use vectoroids_core::types::{Position, SimTime};

use crate::scheduler::{DeadlineList, ScheduledAction};
use crate::spawner;
use crate::systems;
use crate::systems::input::InputState;

/// The simulation engine. Owns the ECS world and all game state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    /// Monotonic wall-clock seconds, fed by the caller's clock.
    wall_secs: f64,
    phase: GamePhase,
    ship_phase: ShipPhase,
    lives: u32,
    score: u32,
    level: u32,
    rng: ChaCha8Rng,
    input: InputState,
    fire_cooldown: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    telemetry: Vec<TelemetryEvent>,
    deadlines: DeadlineList,
    next_render_id: u32,
    config: SimConfig,
}

impl GameEngine {
    /// Create a new engine. Fails on invalid configuration.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            wall_secs: 0.0,
            phase: GamePhase::default(),
            ship_phase: ShipPhase::default(),
            lives: STARTING_LIVES,
            score: 0,
            level: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            input: InputState::default(),
            fire_cooldown: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            telemetry: Vec::new(),
            deadlines: DeadlineList::new(),
            next_render_id: 0,
            config,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one tick and return the resulting snapshot.
    ///
    /// `wall_dt_secs` is the measured wall-clock time since the previous
    /// call; it drives the respawn deadline and game-over flashing, which
    /// keep running while the simulation is paused.
    pub fn tick(&mut self, wall_dt_secs: f64) -> GameStateSnapshot {
        self.process_commands();
        self.advance_wall_clock(wall_dt_secs);
        self.fire_due_deadlines();

        if self.phase == GamePhase::Active {
            self.time.advance();
            self.run_systems();
            self.check_level_advance();
        }

        let telemetry = std::mem::take(&mut self.telemetry);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.score,
            self.lives,
            self.level,
            self.insert_coin_visible(),
            telemetry,
        )
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn ship_phase(&self) -> ShipPhase {
        self.ship_phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn asteroid_count(&self) -> usize {
        self.world.query::<&Asteroid>().iter().count()
    }

    // --- Command handling ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_game();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetHeld {
                forward,
                back,
                strafe_left,
                strafe_right,
            } => {
                self.input.held = HeldDirections {
                    forward,
                    back,
                    strafe_left,
                    strafe_right,
                };
            }
            PlayerCommand::SetAim { angle } => {
                if angle.is_finite() {
                    self.input.aim_angle = angle;
                }
            }
            PlayerCommand::Fire => {
                self.input.fire_requested = true;
            }
            PlayerCommand::ToggleBrake => {
                self.input.brake_on = !self.input.brake_on;
            }
        }
    }

    fn start_game(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.ship_phase = ShipPhase::Alive;
        self.lives = STARTING_LIVES;
        self.score = 0;
        // Level 1 spawns through the regular clear-check on the first tick.
        self.level = 0;
        self.input = InputState::default();
        self.fire_cooldown = 0;
        self.deadlines.clear();
        self.telemetry.clear();
        spawner::spawn_ship(&mut self.world);
        self.phase = GamePhase::Active;
        log::info!("game started");
    }

    // --- Wall clock and deadlines ---

    fn advance_wall_clock(&mut self, wall_dt_secs: f64) {
        let dt = wall_dt_secs.max(0.0);
        self.wall_secs += dt;
        if self.phase == GamePhase::Paused
            && self.config.respawn_policy == RespawnPolicy::SuspendOnPause
        {
            // Shifting pending deadlines by the paused duration is
            // equivalent to suspending their countdown.
            self.deadlines.shift(dt);
        }
    }

    fn fire_due_deadlines(&mut self) {
        for event in self.deadlines.drain_due(self.wall_secs) {
            match event.action {
                ScheduledAction::RespawnShip => self.try_respawn(),
            }
        }
    }

    /// Respawn the ship if the deadline is still valid. A deadline that
    /// outlived its game (restart, game over) is dropped.
    fn try_respawn(&mut self) {
        let valid = self.lives > 0
            && self.ship_phase == ShipPhase::Dead
            && matches!(self.phase, GamePhase::Active | GamePhase::Paused);
        if !valid {
            log::debug!("dropping stale respawn deadline");
            return;
        }
        spawner::spawn_ship(&mut self.world);
        self.ship_phase = ShipPhase::Alive;
        self.telemetry.push(TelemetryEvent::ShipRespawned);
        log::info!("ship respawned, {} lives left", self.lives);
    }

    // --- Per-tick pipeline ---

    fn run_systems(&mut self) {
        // 1. Held-input thrust/aim/brake and rate-limited fire.
        systems::input::run(
            &mut self.world,
            &mut self.input,
            &mut self.fire_cooldown,
            &mut self.next_render_id,
        );
        // 2. Integrate ship, bullets, fragments; record bullet segments.
        systems::movement::run_primary(&mut self.world, &self.config.bounds);
        // 3. Swept bullet–asteroid collision, scoring, splitting.
        systems::collision::bullets::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_render_id,
            self.time.tick,
            &mut self.score,
            &mut self.telemetry,
        );
        // 4. Ship–asteroid contact.
        if self.ship_phase == ShipPhase::Alive && systems::collision::ship::run(&self.world) {
            self.handle_ship_death();
        }
        // 5. Integrate asteroids (split children included) and record
        //    their displacement segments.
        systems::movement::run_asteroids(&mut self.world, &self.config.bounds);
        // 6. Pairwise asteroid collision response.
        systems::collision::asteroids::run(&mut self.world, self.time.tick);
        // 7. Shield timers and flash cue.
        systems::shield::run(&mut self.world, &mut self.telemetry);
        // 8. Expire bullets and fragments.
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    fn handle_ship_death(&mut self) {
        let ship = self
            .world
            .query::<(&ShipMarker, &Position)>()
            .iter()
            .next()
            .map(|(entity, (_, pos))| (entity, *pos));
        // The caller only reports a hit while a ship entity exists.
        debug_assert!(ship.is_some());
        let Some((entity, position)) = ship else {
            return;
        };

        let _ = self.world.despawn(entity);
        self.ship_phase = ShipPhase::Dead;
        self.lives = self.lives.saturating_sub(1);
        spawner::spawn_ship_fragments(
            &mut self.world,
            &mut self.rng,
            &mut self.next_render_id,
            position,
        );
        self.telemetry.push(TelemetryEvent::ShipDestroyed {
            lives_remaining: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.telemetry.push(TelemetryEvent::GameOver { score: self.score });
            log::info!("game over, final score {}", self.score);
        } else {
            self.deadlines
                .schedule(self.wall_secs + RESPAWN_DELAY_SECS, ScheduledAction::RespawnShip);
            log::info!("ship destroyed, {} lives left", self.lives);
        }
    }

    /// Advance the level when the field has been cleared. Runs once per
    /// tick, after all removals and insertions have settled, so clearing
    /// the last two asteroids simultaneously advances exactly once.
    fn check_level_advance(&mut self) {
        if self.ship_phase != ShipPhase::Alive || self.asteroid_count() > 0 {
            return;
        }

        self.level += 1;
        let ship_position = self.ship_position().unwrap_or_default();
        let spawned = spawner::spawn_level_asteroids(
            &mut self.world,
            &mut self.rng,
            &mut self.next_render_id,
            self.level,
            &self.config.bounds,
            ship_position,
            self.time.tick,
        );
        self.telemetry.push(TelemetryEvent::LevelStarted {
            level: self.level,
            asteroid_count: spawned,
        });
        log::info!("level {} started with {} asteroids", self.level, spawned);
    }

    fn ship_position(&self) -> Option<Position> {
        self.world
            .query::<(&ShipMarker, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
    }

    fn insert_coin_visible(&self) -> bool {
        self.phase == GamePhase::GameOver
            && self.wall_secs.rem_euclid(INSERT_COIN_PERIOD_SECS)
                < INSERT_COIN_PERIOD_SECS / 2.0
    }

    // --- Test support ---

    /// Start a game immediately, bypassing the command queue, so tests
    /// can seed a controlled field before the first tick.
    #[cfg(test)]
    pub fn start_game_now(&mut self) {
        self.start_game();
    }

    #[cfg(test)]
    pub fn despawn_all_asteroids(&mut self) {
        let entities: Vec<Entity> = self
            .world
            .query::<&Asteroid>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in entities {
            let _ = self.world.despawn(entity);
        }
    }

    /// Spawn an asteroid with explicit kinematics (for tests).
    #[cfg(test)]
    pub fn spawn_test_asteroid(
        &mut self,
        size: f64,
        position: Position,
        velocity: vectoroids_core::types::Velocity,
    ) -> Entity {
        spawner::spawn_asteroid_with_velocity(
            &mut self.world,
            &mut self.rng,
            &mut self.next_render_id,
            size,
            position,
            velocity,
            self.time.tick,
        )
    }

    /// Spawn a bullet with explicit kinematics (for tests).
    #[cfg(test)]
    pub fn spawn_test_bullet(
        &mut self,
        position: Position,
        velocity: vectoroids_core::types::Velocity,
    ) -> Entity {
        use vectoroids_core::components::{Bullet, PrevPosition, RenderId};
        let id = RenderId(self.next_render_id);
        self.next_render_id += 1;
        self.world.spawn((
            Bullet {
                lifetime_ticks: BULLET_LIFETIME_TICKS,
            },
            position,
            PrevPosition(position),
            velocity,
            id,
        ))
    }

    /// Force the ship's shield to expire immediately (for tests).
    #[cfg(test)]
    pub fn expire_shield(&mut self) {
        use vectoroids_core::components::Shield;
        for (_entity, shield) in self.world.query_mut::<&mut Shield>() {
            shield.timer_ticks = 0;
            shield.visible = false;
        }
    }

    #[cfg(test)]
    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives.min(STARTING_LIVES);
    }

    #[cfg(test)]
    pub fn pending_deadline_count(&self) -> usize {
        self.deadlines.len()
    }

    /// Inject a respawn deadline directly (for stale-deadline tests).
    #[cfg(test)]
    pub fn push_respawn_deadline(&mut self, due_wall_secs: f64) {
        self.deadlines
            .schedule(due_wall_secs, ScheduledAction::RespawnShip);
    }
}
