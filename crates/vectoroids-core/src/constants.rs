//! Simulation constants and tuning parameters.
//!
//! Velocities are world units per second; durations that gate discrete
//! per-tick logic (lifetimes, cooldowns, shield timers) are tick counts.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Default play field width in world units (16:9 field of view).
pub const WORLD_WIDTH: f64 = 178.0;

/// Default play field height in world units.
pub const WORLD_HEIGHT: f64 = 100.0;

// --- Ship ---

/// Collision radius of the ship (world units).
pub const SHIP_RADIUS: f64 = 1.0;

/// Thrust acceleration (units/s²) applied while a direction is held.
pub const SHIP_ACCELERATION: f64 = 72.0;

/// Braking deceleration (units/s²) while the slow-stop toggle is active.
pub const BRAKE_DECELERATION: f64 = 36.0;

/// Speed below which an active brake snaps the ship to a full stop.
pub const BRAKE_STOP_SPEED: f64 = 0.6;

/// Starting (and maximum) number of lives.
pub const STARTING_LIVES: u32 = 3;

/// Wall-clock delay between ship destruction and respawn (seconds).
pub const RESPAWN_DELAY_SECS: f64 = 3.0;

// --- Shield ---

/// Post-spawn shield duration in ticks (3 seconds).
pub const SHIELD_DURATION_TICKS: u32 = 180;

/// Remaining-time window in which the shield flashes before expiry.
pub const SHIELD_FLASH_WINDOW_TICKS: u32 = 60;

/// Length of one shield flash cycle in ticks.
pub const SHIELD_FLASH_CYCLE_TICKS: u32 = 10;

/// Visible fraction of the flash cycle as the timer reaches zero.
pub const SHIELD_FLASH_MIN_DUTY: f64 = 0.1;

// --- Bullets ---

/// Bullet muzzle speed (units/s), added to the ship's velocity.
pub const BULLET_SPEED: f64 = 300.0;

/// Bullet lifetime in ticks (1 second).
pub const BULLET_LIFETIME_TICKS: u32 = 60;

/// Minimum ticks between shots.
pub const FIRE_COOLDOWN_TICKS: u32 = 15;

// --- Asteroids ---

/// Spawn speed band for new asteroids (units/s).
pub const ASTEROID_MIN_SPEED: f64 = 30.0;
pub const ASTEROID_MAX_SPEED: f64 = 60.0;

/// Hard speed cap applied after collision impulses (units/s).
pub const ASTEROID_SPEED_CAP: f64 = 120.0;

/// Magnitude of the perpendicular velocity offset given to split children.
pub const SPLIT_PERP_SPEED: f64 = 12.0;

/// Maximum spin rate assigned at spawn (rad/s, either direction).
pub const ASTEROID_SPIN_MAX: f64 = 1.5;

/// Polygon side count range for the rendered outline.
pub const ASTEROID_MIN_SIDES: usize = 6;
pub const ASTEROID_MAX_SIDES: usize = 12;

/// Per-vertex radius jitter for the rendered outline (±30%).
pub const ASTEROID_RADIUS_JITTER: f64 = 0.3;

/// Restitution for asteroid pairs already overlapping at tick start.
pub const RESTITUTION_OVERLAP: f64 = 0.3;

/// Restitution for asteroid pairs meeting via the swept test.
/// Deliberately distinct from [`RESTITUTION_OVERLAP`]; tune as a pair.
pub const RESTITUTION_SWEPT: f64 = 0.5;

// --- Level progression ---

/// Size range for level-start asteroids.
pub const LEVEL_SIZE_MIN: f64 = 5.0;
pub const LEVEL_SIZE_MAX: f64 = 12.0;

/// Level spawns are rejected within this radius of the ship.
pub const LEVEL_SAFE_RADIUS: f64 = 20.0;

// --- Fragments ---

/// Number of debris segments spawned when the ship is destroyed.
pub const FRAGMENT_COUNT: usize = 10;

/// Fragment lifetime band in ticks.
pub const FRAGMENT_MIN_LIFETIME_TICKS: u32 = 30;
pub const FRAGMENT_MAX_LIFETIME_TICKS: u32 = 90;

/// Fragment outward speed band (units/s).
pub const FRAGMENT_MIN_SPEED: f64 = 6.0;
pub const FRAGMENT_MAX_SPEED: f64 = 30.0;

/// Fragment spin rate cap (rad/s, either direction).
pub const FRAGMENT_SPIN_MAX: f64 = 6.0;

/// Fragment segment length band (world units).
pub const FRAGMENT_MIN_LENGTH: f64 = 0.5;
pub const FRAGMENT_MAX_LENGTH: f64 = 1.5;

// --- Game over ---

/// Full on/off period of the "insert coin" prompt (wall-clock seconds).
pub const INSERT_COIN_PERIOD_SECS: f64 = 1.0;

// --- Numerics ---

/// Squared-length threshold below which a swept segment is degenerate.
pub const GEOM_EPSILON: f64 = 1e-9;
